use crate::{
    address::Address, city::City, contact::Contact, cuisine::CuisineType, geo::MapPoint, id::Id,
    price::PriceRange, rating::AvgRating, time::Timestamp,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Restaurant {
    pub id: Id,
    pub name: String,
    /// Unique within the city.
    pub slug: String,
    pub address: Address,
    /// Imported restaurants may lack coordinates.
    pub pos: Option<MapPoint>,
    pub contact: Contact,
    pub price_range: Option<PriceRange>,
    /// Derived from approved reviews.
    pub rating: Option<AvgRating>,
    /// Derived from approved reviews.
    pub review_count: u32,
    pub verified: bool,
    pub claimed: bool,
    pub owner: Option<Id>,
    pub features: Vec<String>,
    pub specialties: Vec<String>,
    pub description: Option<String>,
    pub city_id: Option<Id>,
    pub created_at: Timestamp,
}

/// A restaurant together with its resolved relations.
#[derive(Debug, Clone, PartialEq)]
pub struct RestaurantWithRelations {
    pub restaurant: Restaurant,
    pub city: Option<City>,
    pub cuisines: Vec<CuisineType>,
}

impl RestaurantWithRelations {
    pub fn city_slug(&self) -> Option<&str> {
        self.city.as_ref().map(|c| c.slug.as_str())
    }
}

/// A restaurant annotated with its distance from a reference position.
#[derive(Debug, Clone, PartialEq)]
pub struct NearbyRestaurant {
    pub restaurant: RestaurantWithRelations,
    pub distance: crate::geo::Distance,
}
