pub use eetgids_boundary::*;

use crate::core::{entities as e, repositories as r, usecases};

pub mod from_json {
    //! JSON -> Entity

    use super::*;

    // NOTE:
    // We cannot impl From<T> here, because the JSON structs
    // and the use case parameters both are outside this crate.

    /// Splits off the human verification token.
    pub fn new_review(restaurant_id: &str, from: NewReview) -> (usecases::NewReview, Option<String>) {
        let NewReview {
            rating,
            title,
            content,
            guest_name,
            guest_email,
            verification_token,
        } = from;
        let review = usecases::NewReview {
            restaurant_id: restaurant_id.to_owned(),
            rating,
            title,
            content,
            guest_name,
            guest_email,
        };
        (review, verification_token)
    }

    pub fn new_claim(restaurant_id: &str, from: NewClaim) -> (usecases::NewClaim, Option<String>) {
        let NewClaim {
            business_email,
            phone,
            message,
            verification_token,
        } = from;
        let claim = usecases::NewClaim {
            restaurant_id: restaurant_id.to_owned(),
            business_email,
            phone,
            message,
        };
        (claim, verification_token)
    }

    pub fn new_photo(restaurant_id: &str, from: NewPhoto) -> (usecases::NewPhoto, Option<String>) {
        let NewPhoto {
            url,
            caption,
            verification_token,
        } = from;
        let photo = usecases::NewPhoto {
            restaurant_id: restaurant_id.to_owned(),
            url,
            caption,
        };
        (photo, verification_token)
    }

    pub fn new_contact_message(
        from: ContactMessage,
    ) -> (usecases::NewContactMessage, Option<String>) {
        let ContactMessage {
            name,
            email,
            subject,
            message,
            verification_token,
        } = from;
        let message = usecases::NewContactMessage {
            name,
            email,
            subject,
            message,
        };
        (message, verification_token)
    }

    pub fn new_restaurant(from: NewRestaurant) -> usecases::NewRestaurant {
        let NewRestaurant {
            name,
            city,
            lat,
            lng,
            street,
            postal_code,
            phone,
            email,
            website,
            price_range,
            cuisines,
            description,
            features,
            specialties,
        } = from;
        usecases::NewRestaurant {
            name,
            city_slug: city,
            lat,
            lng,
            street,
            postal_code,
            phone,
            email,
            website,
            price_range,
            cuisine_slugs: cuisines,
            description,
            features,
            specialties,
        }
    }

    pub fn new_ad(from: NewAd) -> usecases::NewAdPlacement {
        let NewAd {
            name,
            position,
            image_url,
            target_url,
            active,
            starts_at,
            ends_at,
        } = from;
        usecases::NewAdPlacement {
            name,
            position,
            image_url,
            target_url,
            active,
            starts_at: starts_at.map(e::Timestamp::from_millis),
            ends_at: ends_at.map(e::Timestamp::from_millis),
        }
    }

    pub fn import_job_progress(
        from: ImportJobProgress,
    ) -> Result<usecases::ImportJobProgress, UnknownValue> {
        let ImportJobProgress {
            status,
            counters,
            last_city,
            errors,
        } = from;
        let status = status
            .parse::<e::ImportJobStatus>()
            .map_err(|_| UnknownValue::new("import job status", &status))?;
        Ok(usecases::ImportJobProgress {
            status,
            counters: counters.map(Into::into),
            last_city,
            errors,
        })
    }

    pub fn photo_refresh_params(from: PhotoRefreshRequest) -> usecases::PhotoRefreshParams {
        let PhotoRefreshRequest { batch_size, offset } = from;
        usecases::PhotoRefreshParams { batch_size, offset }
    }

    pub fn sort_by(from: &str) -> Result<r::SortBy, UnknownValue> {
        match from.trim().to_ascii_lowercase().as_str() {
            "rating" => Ok(r::SortBy::Rating),
            "reviews" | "review_count" => Ok(r::SortBy::Reviews),
            "name" => Ok(r::SortBy::Name),
            _ => Err(UnknownValue::new("sort field", from)),
        }
    }

    pub fn sort_order(from: &str) -> Result<r::SortOrder, UnknownValue> {
        match from.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(r::SortOrder::Asc),
            "desc" => Ok(r::SortOrder::Desc),
            _ => Err(UnknownValue::new("sort order", from)),
        }
    }

    /// Comma separated euro symbols or tier numbers, e.g. `€€,€€€` or `2,3`.
    pub fn price_ranges(from: &str) -> Result<Vec<e::PriceRange>, e::PriceRangeParseError> {
        from.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::parse)
            .collect()
    }

    /// A textual enum value that could not be recognized.
    #[derive(Debug, thiserror::Error)]
    #[error("Unknown {kind}: '{value}'")]
    pub struct UnknownValue {
        kind: &'static str,
        value: String,
    }

    impl UnknownValue {
        pub fn new(kind: &'static str, value: &str) -> Self {
            Self {
                kind,
                value: value.to_owned(),
            }
        }
    }
}

pub mod to_json {
    //! Use case results -> JSON

    use super::*;

    pub fn restaurant_page(from: usecases::RestaurantPage) -> RestaurantPage {
        let usecases::RestaurantPage {
            restaurants,
            total,
            page,
            limit,
        } = from;
        RestaurantPage {
            restaurants: restaurants.into_iter().map(Into::into).collect(),
            total,
            page,
            limit,
        }
    }

    pub fn listing_stats(from: usecases::ListingStats) -> ListingStats {
        let usecases::ListingStats {
            restaurant_count,
            average_rating,
            top_cuisines,
            price_distribution,
        } = from;
        ListingStats {
            restaurant_count,
            average_rating,
            top_cuisines: top_cuisines
                .into_iter()
                .map(|usecases::CuisineFrequency { name, slug, count }| CuisineFrequency {
                    name,
                    slug,
                    count,
                })
                .collect(),
            price_distribution: price_distribution
                .into_iter()
                .map(
                    |usecases::PriceShare {
                         price_range,
                         count,
                         percentage,
                     }| PriceShare {
                        price_range: price_range.symbol().to_owned(),
                        count,
                        percentage,
                    },
                )
                .collect(),
        }
    }

    pub fn restaurant_details(from: usecases::RestaurantDetails) -> RestaurantDetails {
        let usecases::RestaurantDetails {
            restaurant,
            photos,
            reviews,
        } = from;
        RestaurantDetails {
            restaurant: restaurant.into(),
            photos: photos.into_iter().map(Into::into).collect(),
            reviews: reviews.into_iter().map(Into::into).collect(),
        }
    }

    pub fn photo_refresh_result(from: usecases::PhotoRefreshBatch) -> PhotoRefreshResult {
        let usecases::PhotoRefreshBatch {
            processed,
            photos_downloaded,
            errors,
            has_more,
            next_offset,
            total_restaurants,
        } = from;
        PhotoRefreshResult {
            processed,
            photos_downloaded,
            errors,
            has_more,
            next_offset,
            total_restaurants,
        }
    }

    pub fn restaurant_locations(from: Vec<e::RestaurantWithRelations>) -> Vec<RestaurantLocation> {
        from.into_iter()
            .filter_map(|r| RestaurantLocation::try_from(r).ok())
            .collect()
    }
}
