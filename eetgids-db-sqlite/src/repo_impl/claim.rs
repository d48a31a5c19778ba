use super::*;

impl_repo!(ClaimRepo {
    fn create_claim(&self, claim: &RestaurantClaim) -> Result<()>;
    fn get_claim(&self, id: &str) -> Result<RestaurantClaim>;
    fn claims_by_status(&self, status: Option<ClaimStatus>, pagination: &Pagination) -> Result<Vec<RestaurantClaim>>;
    fn update_claim(&self, claim: &RestaurantClaim) -> Result<()>;
});

fn into_new_claim(claim: &RestaurantClaim) -> models::NewRestaurantClaim<'_> {
    let RestaurantClaim {
        id,
        restaurant_id,
        user_id,
        business_email,
        phone,
        message,
        status,
        rejection_reason,
        reviewed_by,
        reviewed_at,
        created_at,
    } = claim;
    models::NewRestaurantClaim {
        id: id.as_str(),
        restaurant_id: restaurant_id.as_str(),
        user_id: user_id.as_str(),
        business_email: business_email.as_str(),
        phone: phone.as_deref(),
        message: message.as_deref(),
        status: ClaimStatusPrimitive::from(*status),
        rejection_reason: rejection_reason.as_deref(),
        reviewed_by: reviewed_by.as_ref().map(Id::as_str),
        reviewed_at: reviewed_at.map(Timestamp::as_millis),
        created_at: created_at.as_millis(),
    }
}

fn load_claim(claim: models::RestaurantClaimEntity) -> Result<RestaurantClaim> {
    let models::RestaurantClaimEntity {
        id,
        restaurant_id,
        user_id,
        business_email,
        phone,
        message,
        status,
        rejection_reason,
        reviewed_by,
        reviewed_at,
        created_at,
    } = claim;
    let status = ClaimStatus::try_from(status).map_err(anyhow::Error::from)?;
    let business_email = business_email
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid business e-mail address of claim {id}"))?;
    Ok(RestaurantClaim {
        id: id.into(),
        restaurant_id: restaurant_id.into(),
        user_id: user_id.into(),
        business_email,
        phone,
        message,
        status,
        rejection_reason,
        reviewed_by: reviewed_by.map(Into::into),
        reviewed_at: reviewed_at.map(Timestamp::from_millis),
        created_at: Timestamp::from_millis(created_at),
    })
}

// The partial unique index on (restaurant_id, user_id)
// rejects a second pending or approved claim.
fn create_claim(conn: &mut SqliteConnection, claim: &RestaurantClaim) -> Result<()> {
    diesel::insert_into(schema::restaurant_claims::table)
        .values(&into_new_claim(claim))
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn get_claim(conn: &mut SqliteConnection, id: &str) -> Result<RestaurantClaim> {
    use schema::restaurant_claims::dsl;
    load_claim(
        schema::restaurant_claims::table
            .filter(dsl::id.eq(id))
            .first::<models::RestaurantClaimEntity>(conn)
            .map_err(from_diesel_err)?,
    )
}

fn claims_by_status(
    conn: &mut SqliteConnection,
    status: Option<ClaimStatus>,
    pagination: &Pagination,
) -> Result<Vec<RestaurantClaim>> {
    use schema::restaurant_claims::dsl;
    let mut query = schema::restaurant_claims::table
        .order_by(dsl::created_at)
        .then_order_by(dsl::id)
        .into_boxed();
    if let Some(status) = status {
        query = query.filter(dsl::status.eq(ClaimStatusPrimitive::from(status)));
    }
    let (limit, offset) = limit_offset(pagination);
    if let Some(limit) = limit {
        query = query.limit(limit);
    }
    if let Some(offset) = offset {
        query = query.offset(offset);
    }
    query
        .load::<models::RestaurantClaimEntity>(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(load_claim)
        .collect()
}

fn update_claim(conn: &mut SqliteConnection, claim: &RestaurantClaim) -> Result<()> {
    use schema::restaurant_claims::dsl;
    let count = diesel::update(dsl::restaurant_claims.filter(dsl::id.eq(claim.id.as_str())))
        .set(&into_new_claim(claim))
        .execute(conn)
        .map_err(from_diesel_err)?;
    if count == 0 {
        return Err(repo::Error::NotFound);
    }
    Ok(())
}
