use super::*;

impl_repo!(AdRepo {
    fn create_ad(&self, ad: &AdPlacement) -> Result<()>;
    fn update_ad(&self, ad: &AdPlacement) -> Result<()>;
    fn delete_ad(&self, id: &str) -> Result<()>;
    fn get_ad(&self, id: &str) -> Result<AdPlacement>;
    fn all_ads(&self) -> Result<Vec<AdPlacement>>;
});

fn into_new_ad(ad: &AdPlacement) -> models::NewAdPlacement<'_> {
    models::NewAdPlacement {
        id: ad.id.as_str(),
        name: &ad.name,
        position: AdPositionPrimitive::from(ad.position),
        image_url: ad.image_url.as_str(),
        target_url: ad.target_url.as_str(),
        active: from_flag(ad.active),
        starts_at: ad.starts_at.map(Timestamp::as_millis),
        ends_at: ad.ends_at.map(Timestamp::as_millis),
    }
}

fn load_ad(ad: models::AdPlacementEntity) -> Result<AdPlacement> {
    let models::AdPlacementEntity {
        id,
        name,
        position,
        image_url,
        target_url,
        active,
        starts_at,
        ends_at,
    } = ad;
    let position = AdPosition::try_from(position).map_err(anyhow::Error::from)?;
    let image_url = image_url
        .parse()
        .map_err(|err| anyhow::anyhow!("Invalid image URL of ad {id}: {err}"))?;
    let target_url = target_url
        .parse()
        .map_err(|err| anyhow::anyhow!("Invalid target URL of ad {id}: {err}"))?;
    Ok(AdPlacement {
        id: id.into(),
        name,
        position,
        image_url,
        target_url,
        active: into_flag(active),
        starts_at: starts_at.map(Timestamp::from_millis),
        ends_at: ends_at.map(Timestamp::from_millis),
    })
}

fn create_ad(conn: &mut SqliteConnection, ad: &AdPlacement) -> Result<()> {
    diesel::insert_into(schema::ad_placements::table)
        .values(&into_new_ad(ad))
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn update_ad(conn: &mut SqliteConnection, ad: &AdPlacement) -> Result<()> {
    use schema::ad_placements::dsl;
    let count = diesel::update(dsl::ad_placements.filter(dsl::id.eq(ad.id.as_str())))
        .set(&into_new_ad(ad))
        .execute(conn)
        .map_err(from_diesel_err)?;
    if count == 0 {
        return Err(repo::Error::NotFound);
    }
    Ok(())
}

fn delete_ad(conn: &mut SqliteConnection, id: &str) -> Result<()> {
    use schema::ad_placements::dsl;
    let count = diesel::delete(dsl::ad_placements.filter(dsl::id.eq(id)))
        .execute(conn)
        .map_err(from_diesel_err)?;
    if count == 0 {
        return Err(repo::Error::NotFound);
    }
    Ok(())
}

fn get_ad(conn: &mut SqliteConnection, id: &str) -> Result<AdPlacement> {
    use schema::ad_placements::dsl;
    load_ad(
        schema::ad_placements::table
            .filter(dsl::id.eq(id))
            .first::<models::AdPlacementEntity>(conn)
            .map_err(from_diesel_err)?,
    )
}

fn all_ads(conn: &mut SqliteConnection) -> Result<Vec<AdPlacement>> {
    use schema::ad_placements::dsl;
    schema::ad_placements::table
        .order_by(dsl::name)
        .load::<models::AdPlacementEntity>(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(load_ad)
        .collect()
}
