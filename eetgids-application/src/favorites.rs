use super::*;

pub fn toggle_favorite(
    connections: &sqlite::Connections,
    user_id: Option<&Id>,
    restaurant_id: &str,
) -> Result<FavoriteState> {
    Ok(connections
        .exclusive()?
        .transaction(|conn| usecases::toggle_favorite(conn, user_id, restaurant_id))?)
}
