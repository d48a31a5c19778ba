use super::prelude::*;

/// Adds the restaurant to the favorites of the user or removes it
/// if it is already a favorite.
///
/// Should run inside a single transaction.
pub fn toggle_favorite<R>(repo: &R, user_id: Option<&Id>, restaurant_id: &str) -> Result<FavoriteState>
where
    R: FavoriteRepo + RestaurantRepo,
{
    let user_id = user_id.ok_or(Error::Unauthorized)?;
    if repo.is_favorite(user_id.as_str(), restaurant_id)? {
        repo.remove_favorite(user_id.as_str(), restaurant_id)?;
        log::debug!("Removed restaurant {restaurant_id} from the favorites of {user_id}");
        return Ok(FavoriteState::Removed);
    }
    let restaurant = repo.get_restaurant(restaurant_id)?;
    repo.add_favorite(&Favorite {
        user_id: user_id.clone(),
        restaurant_id: restaurant.id,
        created_at: Timestamp::now(),
    })?;
    log::debug!("Added restaurant {restaurant_id} to the favorites of {user_id}");
    Ok(FavoriteState::Added)
}

pub fn favorite_restaurants<R>(repo: &R, user_id: &Id) -> Result<Vec<RestaurantWithRelations>>
where
    R: FavoriteRepo + RestaurantRepo,
{
    let favorites = repo.favorites_of_user(user_id.as_str())?;
    let mut restaurants = Vec::with_capacity(favorites.len());
    for favorite in favorites {
        match repo.get_restaurant_with_relations(favorite.restaurant_id.as_str()) {
            Ok(restaurant) => restaurants.push(restaurant),
            Err(RepoError::NotFound) => {
                log::warn!(
                    "Favorite restaurant {} of user {} not found",
                    favorite.restaurant_id,
                    user_id
                );
            }
            Err(err) => return Err(err.into()),
        }
    }
    Ok(restaurants)
}
