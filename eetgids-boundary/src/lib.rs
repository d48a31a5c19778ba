use serde::{Deserialize, Serialize};

#[cfg(feature = "entity-conversions")]
mod conv;

#[rustfmt::skip]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct Restaurant {
    pub id            : String,
    pub name          : String,
    pub slug          : String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street        : Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code   : Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city          : Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat           : Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lng           : Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone         : Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email         : Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website       : Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_range   : Option<String>,
    pub rating        : Option<f64>,
    pub review_count  : u32,
    pub verified      : bool,
    pub claimed       : bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner         : Option<String>,
    pub features      : Vec<String>,
    pub specialties   : Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description   : Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city_slug     : Option<String>,
    pub cuisines      : Vec<Cuisine>,
    pub created_at    : i64,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone))]
pub struct RestaurantPage {
    pub restaurants: Vec<Restaurant>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone))]
pub struct NearbyRestaurant {
    #[serde(flatten)]
    pub restaurant: Restaurant,
    pub distance_km: f64,
}

/// A pin on the map of all restaurants.
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct RestaurantLocation {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub city_slug: Option<String>,
    pub lat: f64,
    pub lng: f64,
    pub rating: Option<f64>,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone))]
pub struct RestaurantDetails {
    pub restaurant: Restaurant,
    pub photos: Vec<Photo>,
    pub reviews: Vec<Review>,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone))]
pub struct NewRestaurant {
    pub name: String,
    pub city: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub price_range: Option<String>,
    #[serde(default)]
    pub cuisines: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub specialties: Vec<String>,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone))]
pub struct CuisineFrequency {
    pub name: String,
    pub slug: String,
    pub count: usize,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone))]
pub struct PriceShare {
    pub price_range: String,
    pub count: usize,
    pub percentage: f64,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone))]
pub struct ListingStats {
    pub restaurant_count: usize,
    pub average_rating: Option<f64>,
    pub top_cuisines: Vec<CuisineFrequency>,
    pub price_distribution: Vec<PriceShare>,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct City {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub province: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone))]
pub struct Province {
    pub name: String,
    pub cities: Vec<City>,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct Cuisine {
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// The e-mail address of guests is never published.
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone))]
pub struct Review {
    pub id: String,
    pub restaurant_id: String,
    pub rating: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_name: Option<String>,
    pub approved: bool,
    pub verified: bool,
    pub created_at: i64,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone))]
pub struct NewReview {
    pub rating: i64,
    #[serde(default)]
    pub title: Option<String>,
    pub content: String,
    #[serde(default)]
    pub guest_name: Option<String>,
    #[serde(default)]
    pub guest_email: Option<String>,
    #[serde(default)]
    pub verification_token: Option<String>,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, Copy, PartialEq))]
pub struct FavoriteState {
    pub favorite: bool,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone))]
pub struct NewClaim {
    pub business_email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub verification_token: Option<String>,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone))]
pub struct Claim {
    pub id: String,
    pub restaurant_id: String,
    pub user_id: String,
    pub business_email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewed_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewed_at: Option<i64>,
    pub created_at: i64,
}

#[derive(Serialize, Deserialize, Default)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone))]
pub struct ClaimRejection {
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone))]
pub struct Photo {
    pub id: String,
    pub restaurant_id: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    pub is_primary: bool,
    pub approved: bool,
    pub created_at: i64,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone))]
pub struct NewPhoto {
    pub url: String,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub verification_token: Option<String>,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone))]
pub struct ImportJobControl {
    pub action: String,
}

#[derive(Serialize, Deserialize, Default)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct ImportJobCounters {
    pub processed_cities: u32,
    pub imported_restaurants: u32,
    pub imported_reviews: u32,
    pub skipped_restaurants: u32,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone))]
pub struct ImportJob {
    pub id: String,
    pub status: String,
    pub counters: ImportJobCounters,
    pub last_city: Option<String>,
    pub errors: Vec<String>,
    pub created_at: i64,
    pub started_at: Option<i64>,
    pub updated_at: i64,
    pub finished_at: Option<i64>,
}

/// Sent by the worker that executes an import job.
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone))]
pub struct ImportJobProgress {
    pub status: String,
    #[serde(default)]
    pub counters: Option<ImportJobCounters>,
    #[serde(default)]
    pub last_city: Option<String>,
    #[serde(default)]
    pub errors: Vec<String>,
}

#[derive(Serialize, Deserialize, Default)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, Copy))]
#[serde(rename_all = "camelCase")]
pub struct PhotoRefreshRequest {
    #[serde(default)]
    pub batch_size: Option<u64>,
    #[serde(default)]
    pub offset: Option<u64>,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone))]
#[serde(rename_all = "camelCase")]
pub struct PhotoRefreshResult {
    pub processed: u64,
    pub photos_downloaded: u64,
    pub errors: Vec<String>,
    pub has_more: bool,
    pub next_offset: u64,
    pub total_restaurants: u64,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone))]
pub struct Ad {
    pub id: String,
    pub name: String,
    pub position: String,
    pub image_url: String,
    pub target_url: String,
    pub active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starts_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ends_at: Option<i64>,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone))]
pub struct NewAd {
    pub name: String,
    pub position: String,
    pub image_url: String,
    pub target_url: String,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub starts_at: Option<i64>,
    #[serde(default)]
    pub ends_at: Option<i64>,
}

const fn default_true() -> bool {
    true
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone))]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub subject: Option<String>,
    pub message: String,
    #[serde(default)]
    pub verification_token: Option<String>,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone))]
pub struct User {
    pub id: String,
    pub email: String,
    pub role: UserRole,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, Copy, PartialEq, Eq))]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    User,
    Admin,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, Copy))]
pub struct RoleChange {
    pub role: UserRole,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, thiserror::Error))]
#[cfg_attr(feature = "extra-derive", error("{message}"))]
pub struct Error {
    /// The HTTP status code of the response.
    pub http_status: u16,
    pub message: String,
}
