use super::{parse_email, parse_web_url, prelude::*};
use crate::util::{slug::*, validate::non_blank};

#[derive(Debug, Clone, Default)]
pub struct NewRestaurant {
    pub name: String,
    pub city_slug: String,
    pub lat: f64,
    pub lng: f64,
    pub street: Option<String>,
    pub postal_code: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub price_range: Option<String>,
    pub cuisine_slugs: Vec<String>,
    pub description: Option<String>,
    pub features: Vec<String>,
    pub specialties: Vec<String>,
}

fn non_blank_list(list: Vec<String>) -> Vec<String> {
    let mut list: Vec<_> = list.into_iter().filter_map(|s| non_blank(Some(s))).collect();
    list.dedup();
    list
}

/// Creates a new listing owned by the registering user.
///
/// The slug is derived from the name and made unique within the
/// city, so this should run inside a single transaction.
pub fn register_restaurant<R>(repo: &R, owner: Option<&Id>, new: NewRestaurant) -> Result<Restaurant>
where
    R: CityRepo + CuisineRepo + RestaurantRepo,
{
    let owner = owner.ok_or(Error::Unauthorized)?;
    let NewRestaurant {
        name,
        city_slug,
        lat,
        lng,
        street,
        postal_code,
        phone,
        email,
        website,
        price_range,
        cuisine_slugs,
        description,
        features,
        specialties,
    } = new;
    let name = non_blank(Some(name)).ok_or(Error::Name)?;
    let base_slug = slugify(&name);
    if base_slug.is_empty() {
        return Err(Error::Name);
    }
    let pos = MapPoint::try_from_lat_lng_deg(lat, lng)?;
    let city = match repo.get_city_by_slug(city_slug.trim()) {
        Ok(city) => city,
        Err(RepoError::NotFound) => return Err(Error::UnknownCity),
        Err(err) => return Err(err.into()),
    };
    let mut cuisine_ids = Vec::with_capacity(cuisine_slugs.len());
    for slug in non_blank_list(cuisine_slugs) {
        match repo.get_cuisine_by_slug(&slug) {
            Ok(cuisine) => cuisine_ids.push(cuisine.id),
            Err(RepoError::NotFound) => return Err(Error::UnknownCuisine),
            Err(err) => return Err(err.into()),
        }
    }
    let price_range = non_blank(price_range)
        .map(|p| p.parse::<PriceRange>())
        .transpose()?;
    let email = non_blank(email).map(|e| parse_email(&e)).transpose()?;
    let website = parse_web_url(website.as_deref())?;
    let slug = unique_slug(&base_slug, |slug| {
        repo.restaurant_slug_exists(city.id.as_str(), slug)
    })?;
    let restaurant = Restaurant {
        id: Id::new(),
        name,
        slug,
        address: Address {
            street: non_blank(street),
            postal_code: non_blank(postal_code),
            city: Some(city.name.clone()),
        },
        pos: Some(pos),
        contact: Contact {
            phone: non_blank(phone),
            email,
            website,
        },
        price_range,
        rating: None,
        review_count: 0,
        verified: false,
        claimed: true,
        owner: Some(owner.clone()),
        features: non_blank_list(features),
        specialties: non_blank_list(specialties),
        description: non_blank(description),
        city_id: Some(city.id),
        created_at: Timestamp::now(),
    };
    repo.create_restaurant(&restaurant, &cuisine_ids)?;
    log::info!(
        "User {} registered restaurant {} ({})",
        owner,
        restaurant.id,
        restaurant.slug
    );
    Ok(restaurant)
}
