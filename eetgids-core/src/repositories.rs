// Low-level database access traits.
// Each repository is responsible for a single entity and
// its relationships. Related entities are only referenced
// by their id and never modified by another repository.

use crate::entities::*;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("The requested object could not be found")]
    NotFound,
    #[error("The object already exists")]
    AlreadyExists,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pagination {
    pub offset: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortBy {
    #[default]
    Rating,
    Reviews,
    Name,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Store-level restaurant query with all slugs resolved into ids.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RestaurantQuery {
    pub city_id: Option<Id>,
    pub cuisine_id: Option<Id>,
    /// Inclusive
    pub min_rating: Option<f64>,
    /// Inclusive
    pub min_reviews: Option<u32>,
    /// Empty means any (including unknown) price range.
    pub price_ranges: Vec<PriceRange>,
    /// Case-insensitive substring of the name.
    pub name_contains: Option<String>,
    pub sort_by: SortBy,
    pub sort_order: SortOrder,
}

pub trait CityRepo {
    fn create_city(&self, city: &City) -> Result<()>;
    fn get_city(&self, id: &str) -> Result<City>;
    fn get_city_by_slug(&self, slug: &str) -> Result<City>;
    fn all_cities(&self) -> Result<Vec<City>>;
}

pub trait CuisineRepo {
    fn create_cuisine(&self, cuisine: &CuisineType) -> Result<()>;
    fn get_cuisine_by_slug(&self, slug: &str) -> Result<CuisineType>;
    fn all_cuisines(&self) -> Result<Vec<CuisineType>>;
}

pub trait RestaurantRepo {
    fn create_restaurant(&self, restaurant: &Restaurant, cuisine_ids: &[Id]) -> Result<()>;

    fn get_restaurant(&self, id: &str) -> Result<Restaurant>;
    fn get_restaurant_with_relations(&self, id: &str) -> Result<RestaurantWithRelations>;
    fn get_restaurant_by_slug(&self, city_id: &str, slug: &str)
        -> Result<RestaurantWithRelations>;
    fn restaurant_slug_exists(&self, city_id: &str, slug: &str) -> Result<bool>;

    /// Returns the requested page and the total number of matches.
    fn query_restaurants(
        &self,
        query: &RestaurantQuery,
        pagination: &Pagination,
    ) -> Result<(Vec<RestaurantWithRelations>, u64)>;

    /// All restaurants that have a position, in no particular order.
    fn restaurants_with_position(&self) -> Result<Vec<RestaurantWithRelations>>;

    /// Ordered by id for stable batching.
    fn list_restaurants(&self, pagination: &Pagination) -> Result<Vec<Restaurant>>;
    fn count_restaurants(&self) -> Result<u64>;

    fn set_restaurant_owner(&self, id: &str, owner: &Id) -> Result<()>;
    fn set_restaurant_rating(
        &self,
        id: &str,
        rating: Option<AvgRating>,
        review_count: u32,
    ) -> Result<()>;
}

pub trait ReviewRepo {
    fn create_review(&self, review: &Review) -> Result<()>;
    fn get_review(&self, id: &str) -> Result<Review>;
    /// Newest first
    fn approved_reviews_of_restaurant(&self, restaurant_id: &str) -> Result<Vec<Review>>;
    /// Oldest first
    fn pending_reviews(&self, pagination: &Pagination) -> Result<Vec<Review>>;
    fn approve_review(&self, id: &str) -> Result<()>;
    fn delete_review(&self, id: &str) -> Result<()>;
}

pub trait FavoriteRepo {
    fn is_favorite(&self, user_id: &str, restaurant_id: &str) -> Result<bool>;
    fn add_favorite(&self, favorite: &Favorite) -> Result<()>;
    fn remove_favorite(&self, user_id: &str, restaurant_id: &str) -> Result<()>;
    /// Most recently added first
    fn favorites_of_user(&self, user_id: &str) -> Result<Vec<Favorite>>;
}

pub trait ClaimRepo {
    /// Fails with [`Error::AlreadyExists`] if the user already
    /// holds a pending or approved claim for the restaurant.
    fn create_claim(&self, claim: &RestaurantClaim) -> Result<()>;
    fn get_claim(&self, id: &str) -> Result<RestaurantClaim>;
    fn claims_by_status(
        &self,
        status: Option<ClaimStatus>,
        pagination: &Pagination,
    ) -> Result<Vec<RestaurantClaim>>;
    fn update_claim(&self, claim: &RestaurantClaim) -> Result<()>;
}

pub trait PhotoRepo {
    fn create_photo(&self, photo: &RestaurantPhoto) -> Result<()>;
    fn get_photo(&self, id: &str) -> Result<RestaurantPhoto>;
    /// Primary photo first, then oldest first.
    fn approved_photos_of_restaurant(&self, restaurant_id: &str) -> Result<Vec<RestaurantPhoto>>;
    /// Approved or not
    fn all_photos_of_restaurant(&self, restaurant_id: &str) -> Result<Vec<RestaurantPhoto>>;
    fn pending_photos(&self, pagination: &Pagination) -> Result<Vec<RestaurantPhoto>>;
    fn approve_photo(&self, id: &str) -> Result<()>;
    /// Clears the flag of all other photos of the same restaurant.
    fn set_primary_photo(&self, restaurant_id: &str, photo_id: &str) -> Result<()>;
    fn delete_photo(&self, id: &str) -> Result<()>;
}

pub trait ImportJobRepo {
    fn create_import_job(&self, job: &ImportJob) -> Result<()>;
    fn get_import_job(&self, id: &str) -> Result<ImportJob>;
    fn latest_import_job(&self) -> Result<Option<ImportJob>>;
    fn update_import_job(&self, job: &ImportJob) -> Result<()>;
}

pub trait AdRepo {
    fn create_ad(&self, ad: &AdPlacement) -> Result<()>;
    fn update_ad(&self, ad: &AdPlacement) -> Result<()>;
    fn delete_ad(&self, id: &str) -> Result<()>;
    fn get_ad(&self, id: &str) -> Result<AdPlacement>;
    fn all_ads(&self) -> Result<Vec<AdPlacement>>;
}

pub trait UserRepo {
    fn create_user(&self, user: &User) -> Result<()>;
    fn update_user(&self, user: &User) -> Result<()>;
    fn try_get_user(&self, id: &str) -> Result<Option<User>>;
    fn try_get_user_by_email(&self, email: &str) -> Result<Option<User>>;
}
