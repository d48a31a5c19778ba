use serde::Serialize;

use crate::core::entities::RestaurantWithRelations;

#[derive(Debug, Serialize)]
pub struct RestaurantRecord {
    pub id: String,
    pub created_at: i64,
    pub name: String,
    pub slug: String,
    pub city: Option<String>,
    pub city_slug: Option<String>,
    pub province: Option<String>,
    pub street: Option<String>,
    pub postal_code: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub price_range: Option<String>,
    pub rating: Option<f64>,
    pub review_count: u32,
    pub verified: bool,
    pub claimed: bool,
    pub cuisines: String,
    pub features: String,
    pub specialties: String,
}

impl From<RestaurantWithRelations> for RestaurantRecord {
    fn from(from: RestaurantWithRelations) -> Self {
        let RestaurantWithRelations {
            restaurant,
            city,
            cuisines,
        } = from;

        let cuisines = cuisines
            .into_iter()
            .map(|c| c.name)
            .collect::<Vec<_>>()
            .join(",");
        let features = restaurant.features.join(",");
        let specialties = restaurant.specialties.join(",");

        let (city_name, city_slug, province) = match city {
            Some(c) => (Some(c.name), Some(c.slug), Some(c.province)),
            None => (restaurant.address.city, None, None),
        };

        RestaurantRecord {
            id: restaurant.id.into(),
            created_at: restaurant.created_at.as_millis(),
            name: restaurant.name,
            slug: restaurant.slug,
            city: city_name,
            city_slug,
            province,
            street: restaurant.address.street,
            postal_code: restaurant.address.postal_code,
            lat: restaurant.pos.map(|p| p.lat()),
            lng: restaurant.pos.map(|p| p.lng()),
            phone: restaurant.contact.phone,
            email: restaurant.contact.email.map(|e| e.into_string()),
            website: restaurant.contact.website.map(|u| u.to_string()),
            price_range: restaurant.price_range.map(|p| p.symbol().to_owned()),
            rating: restaurant.rating.map(|r| f64::from(r.rounded())),
            review_count: restaurant.review_count,
            verified: restaurant.verified,
            claimed: restaurant.claimed,
            cuisines,
            features,
            specialties,
        }
    }
}
