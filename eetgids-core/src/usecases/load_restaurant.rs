use super::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub struct RestaurantDetails {
    pub restaurant: RestaurantWithRelations,
    /// Approved only, primary first
    pub photos: Vec<RestaurantPhoto>,
    /// Approved only, newest first
    pub reviews: Vec<Review>,
}

pub fn load_restaurant_details<R>(
    repo: &R,
    city_slug: &str,
    restaurant_slug: &str,
) -> Result<RestaurantDetails>
where
    R: CityRepo + RestaurantRepo + PhotoRepo + ReviewRepo,
{
    let city = repo.get_city_by_slug(city_slug)?;
    let restaurant = repo.get_restaurant_by_slug(city.id.as_str(), restaurant_slug)?;
    let id = restaurant.restaurant.id.as_str();
    let photos = repo.approved_photos_of_restaurant(id)?;
    let reviews = repo.approved_reviews_of_restaurant(id)?;
    Ok(RestaurantDetails {
        restaurant,
        photos,
        reviews,
    })
}
