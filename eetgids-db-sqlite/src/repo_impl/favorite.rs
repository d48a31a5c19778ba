use super::*;

impl_repo!(FavoriteRepo {
    fn is_favorite(&self, user_id: &str, restaurant_id: &str) -> Result<bool>;
    fn add_favorite(&self, favorite: &Favorite) -> Result<()>;
    fn remove_favorite(&self, user_id: &str, restaurant_id: &str) -> Result<()>;
    fn favorites_of_user(&self, user_id: &str) -> Result<Vec<Favorite>>;
});

fn is_favorite(conn: &mut SqliteConnection, user_id: &str, restaurant_id: &str) -> Result<bool> {
    use schema::favorites::dsl;
    let count = schema::favorites::table
        .filter(dsl::user_id.eq(user_id))
        .filter(dsl::restaurant_id.eq(restaurant_id))
        .select(diesel::dsl::count_star())
        .first::<i64>(conn)
        .map_err(from_diesel_err)?;
    Ok(count > 0)
}

fn add_favorite(conn: &mut SqliteConnection, favorite: &Favorite) -> Result<()> {
    let new_favorite = models::NewFavorite {
        user_id: favorite.user_id.as_str(),
        restaurant_id: favorite.restaurant_id.as_str(),
        created_at: favorite.created_at.as_millis(),
    };
    diesel::insert_into(schema::favorites::table)
        .values(&new_favorite)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn remove_favorite(conn: &mut SqliteConnection, user_id: &str, restaurant_id: &str) -> Result<()> {
    use schema::favorites::dsl;
    diesel::delete(
        dsl::favorites
            .filter(dsl::user_id.eq(user_id))
            .filter(dsl::restaurant_id.eq(restaurant_id)),
    )
    .execute(conn)
    .map_err(from_diesel_err)?;
    Ok(())
}

fn favorites_of_user(conn: &mut SqliteConnection, user_id: &str) -> Result<Vec<Favorite>> {
    use schema::favorites::dsl;
    Ok(schema::favorites::table
        .filter(dsl::user_id.eq(user_id))
        .order_by(dsl::created_at.desc())
        .load::<models::FavoriteEntity>(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(
            |models::FavoriteEntity {
                 user_id,
                 restaurant_id,
                 created_at,
             }| Favorite {
                user_id: user_id.into(),
                restaurant_id: restaurant_id.into(),
                created_at: Timestamp::from_millis(created_at),
            },
        )
        .collect())
}
