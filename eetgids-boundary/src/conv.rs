use super::*;
use eetgids_entities as e;

fn millis(ts: e::time::Timestamp) -> i64 {
    ts.as_millis()
}

impl From<e::cuisine::CuisineType> for Cuisine {
    fn from(from: e::cuisine::CuisineType) -> Self {
        let e::cuisine::CuisineType {
            id,
            name,
            slug,
            icon,
        } = from;
        Self {
            id: id.into(),
            name,
            slug,
            icon,
        }
    }
}

impl From<e::city::City> for City {
    fn from(from: e::city::City) -> Self {
        let e::city::City {
            id,
            name,
            slug,
            province,
            center,
            description,
        } = from;
        Self {
            id: id.into(),
            name,
            slug,
            province,
            lat: center.map(|c| c.lat()),
            lng: center.map(|c| c.lng()),
            description,
        }
    }
}

impl From<e::city::Province> for Province {
    fn from(from: e::city::Province) -> Self {
        Self {
            name: from.name,
            cities: from.cities.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<e::restaurant::Restaurant> for Restaurant {
    fn from(from: e::restaurant::Restaurant) -> Self {
        let e::restaurant::Restaurant {
            id,
            name,
            slug,
            address,
            pos,
            contact,
            price_range,
            rating,
            review_count,
            verified,
            claimed,
            owner,
            features,
            specialties,
            description,
            city_id: _,
            created_at,
        } = from;
        let e::address::Address {
            street,
            postal_code,
            city,
        } = address;
        let e::contact::Contact {
            phone,
            email,
            website,
        } = contact;
        Self {
            id: id.into(),
            name,
            slug,
            street,
            postal_code,
            city,
            lat: pos.map(|p| p.lat()),
            lng: pos.map(|p| p.lng()),
            phone,
            email: email.map(e::email::EmailAddress::into_string),
            website: website.map(|url| url.to_string()),
            price_range: price_range.map(|p| p.symbol().to_owned()),
            rating: rating.map(|r| f64::from(r.rounded())),
            review_count,
            verified,
            claimed,
            owner: owner.map(Into::into),
            features,
            specialties,
            description,
            city_slug: None,
            cuisines: vec![],
            created_at: millis(created_at),
        }
    }
}

impl From<e::restaurant::RestaurantWithRelations> for Restaurant {
    fn from(from: e::restaurant::RestaurantWithRelations) -> Self {
        let e::restaurant::RestaurantWithRelations {
            restaurant,
            city,
            cuisines,
        } = from;
        let mut restaurant = Restaurant::from(restaurant);
        if let Some(city) = city {
            restaurant.city_slug = Some(city.slug);
            if restaurant.city.is_none() {
                restaurant.city = Some(city.name);
            }
        }
        restaurant.cuisines = cuisines.into_iter().map(Into::into).collect();
        restaurant
    }
}

impl From<e::restaurant::NearbyRestaurant> for NearbyRestaurant {
    fn from(from: e::restaurant::NearbyRestaurant) -> Self {
        Self {
            restaurant: from.restaurant.into(),
            distance_km: from.distance.to_km(),
        }
    }
}

impl TryFrom<e::restaurant::RestaurantWithRelations> for RestaurantLocation {
    type Error = e::restaurant::RestaurantWithRelations;

    /// Fails for restaurants without a position.
    fn try_from(from: e::restaurant::RestaurantWithRelations) -> Result<Self, Self::Error> {
        let Some(pos) = from.restaurant.pos else {
            return Err(from);
        };
        let city_slug = from.city_slug().map(ToOwned::to_owned);
        let e::restaurant::Restaurant {
            id,
            name,
            slug,
            rating,
            ..
        } = from.restaurant;
        Ok(Self {
            id: id.into(),
            name,
            slug,
            city_slug,
            lat: pos.lat(),
            lng: pos.lng(),
            rating: rating.map(|r| f64::from(r.rounded())),
        })
    }
}

impl From<e::review::Review> for Review {
    fn from(from: e::review::Review) -> Self {
        let e::review::Review {
            id,
            restaurant_id,
            rating,
            title,
            content,
            author,
            approved,
            verified,
            created_at,
        } = from;
        let (user_id, guest_name) = match author {
            e::review::Author::User(id) => (Some(id.into()), None),
            e::review::Author::Guest { name, email: _ } => (None, Some(name)),
        };
        Self {
            id: id.into(),
            restaurant_id: restaurant_id.into(),
            rating: rating.to_u8(),
            title,
            content,
            user_id,
            guest_name,
            approved,
            verified,
            created_at: millis(created_at),
        }
    }
}

impl From<e::claim::RestaurantClaim> for Claim {
    fn from(from: e::claim::RestaurantClaim) -> Self {
        let e::claim::RestaurantClaim {
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
        } = from;
        Self {
            id: id.into(),
            restaurant_id: restaurant_id.into(),
            user_id: user_id.into(),
            business_email: business_email.into_string(),
            phone,
            message,
            status: status.as_str().to_owned(),
            rejection_reason,
            reviewed_by: reviewed_by.map(Into::into),
            reviewed_at: reviewed_at.map(millis),
            created_at: millis(created_at),
        }
    }
}

impl From<e::photo::RestaurantPhoto> for Photo {
    fn from(from: e::photo::RestaurantPhoto) -> Self {
        let e::photo::RestaurantPhoto {
            id,
            restaurant_id,
            url,
            caption,
            is_primary,
            approved,
            uploaded_by: _,
            created_at,
        } = from;
        Self {
            id: id.into(),
            restaurant_id: restaurant_id.into(),
            url: url.to_string(),
            caption,
            is_primary,
            approved,
            created_at: millis(created_at),
        }
    }
}

impl From<e::import_job::ImportJobCounters> for ImportJobCounters {
    fn from(from: e::import_job::ImportJobCounters) -> Self {
        let e::import_job::ImportJobCounters {
            processed_cities,
            imported_restaurants,
            imported_reviews,
            skipped_restaurants,
        } = from;
        Self {
            processed_cities,
            imported_restaurants,
            imported_reviews,
            skipped_restaurants,
        }
    }
}

impl From<ImportJobCounters> for e::import_job::ImportJobCounters {
    fn from(from: ImportJobCounters) -> Self {
        let ImportJobCounters {
            processed_cities,
            imported_restaurants,
            imported_reviews,
            skipped_restaurants,
        } = from;
        Self {
            processed_cities,
            imported_restaurants,
            imported_reviews,
            skipped_restaurants,
        }
    }
}

impl From<e::import_job::ImportJob> for ImportJob {
    fn from(from: e::import_job::ImportJob) -> Self {
        let e::import_job::ImportJob {
            id,
            status,
            counters,
            last_city,
            errors,
            created_at,
            started_at,
            updated_at,
            finished_at,
        } = from;
        Self {
            id: id.into(),
            status: status.as_str().to_owned(),
            counters: counters.into(),
            last_city,
            errors,
            created_at: millis(created_at),
            started_at: started_at.map(millis),
            updated_at: millis(updated_at),
            finished_at: finished_at.map(millis),
        }
    }
}

impl From<e::ad::AdPlacement> for Ad {
    fn from(from: e::ad::AdPlacement) -> Self {
        let e::ad::AdPlacement {
            id,
            name,
            position,
            image_url,
            target_url,
            active,
            starts_at,
            ends_at,
        } = from;
        Self {
            id: id.into(),
            name,
            position: position.as_str().to_owned(),
            image_url: image_url.to_string(),
            target_url: target_url.to_string(),
            active,
            starts_at: starts_at.map(millis),
            ends_at: ends_at.map(millis),
        }
    }
}

impl From<e::user::Role> for UserRole {
    fn from(from: e::user::Role) -> Self {
        match from {
            e::user::Role::User => Self::User,
            e::user::Role::Admin => Self::Admin,
        }
    }
}

impl From<UserRole> for e::user::Role {
    fn from(from: UserRole) -> Self {
        match from {
            UserRole::User => Self::User,
            UserRole::Admin => Self::Admin,
        }
    }
}

impl From<e::user::User> for User {
    fn from(from: e::user::User) -> Self {
        let e::user::User { id, email, role } = from;
        Self {
            id: id.into(),
            email: email.into_string(),
            role: role.into(),
        }
    }
}

impl From<e::favorite::FavoriteState> for FavoriteState {
    fn from(from: e::favorite::FavoriteState) -> Self {
        Self {
            favorite: from.is_favorite(),
        }
    }
}
