use super::*;

impl_repo!(CityRepo {
    fn create_city(&self, city: &City) -> Result<()>;
    fn get_city(&self, id: &str) -> Result<City>;
    fn get_city_by_slug(&self, slug: &str) -> Result<City>;
    fn all_cities(&self) -> Result<Vec<City>>;
});

fn create_city(conn: &mut SqliteConnection, city: &City) -> Result<()> {
    let new_city = models::NewCity {
        id: city.id.as_str(),
        name: &city.name,
        slug: &city.slug,
        province: &city.province,
        lat: city.center.map(MapPoint::lat),
        lng: city.center.map(MapPoint::lng),
        description: city.description.as_deref(),
    };
    diesel::insert_into(schema::cities::table)
        .values(&new_city)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn get_city(conn: &mut SqliteConnection, id: &str) -> Result<City> {
    use schema::cities::dsl;
    Ok(load_city(
        schema::cities::table
            .filter(dsl::id.eq(id))
            .first::<models::CityEntity>(conn)
            .map_err(from_diesel_err)?,
    ))
}

fn get_city_by_slug(conn: &mut SqliteConnection, slug: &str) -> Result<City> {
    use schema::cities::dsl;
    Ok(load_city(
        schema::cities::table
            .filter(dsl::slug.eq(slug))
            .first::<models::CityEntity>(conn)
            .map_err(from_diesel_err)?,
    ))
}

fn all_cities(conn: &mut SqliteConnection) -> Result<Vec<City>> {
    use schema::cities::dsl;
    Ok(schema::cities::table
        .order_by(dsl::name)
        .load::<models::CityEntity>(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(load_city)
        .collect())
}
