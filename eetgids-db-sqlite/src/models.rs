#![allow(clippy::extra_unused_lifetimes)]

// NOTE:
// All timestamps with the `_at` postfix are stored
// as unix timestamp in **milli**seconds.

use super::schema::*;

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = users, treat_none_as_null = true)]
pub struct NewUser<'a> {
    pub id: &'a str,
    pub email: &'a str,
    pub role: i16,
}

#[derive(Queryable)]
pub struct UserEntity {
    pub id: String,
    pub email: String,
    pub role: i16,
}

#[derive(Insertable)]
#[diesel(table_name = cities)]
pub struct NewCity<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub slug: &'a str,
    pub province: &'a str,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub description: Option<&'a str>,
}

#[derive(Queryable)]
pub struct CityEntity {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub province: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub description: Option<String>,
}

#[derive(Insertable)]
#[diesel(table_name = cuisine_types)]
pub struct NewCuisineType<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub slug: &'a str,
    pub icon: Option<&'a str>,
}

#[derive(Queryable)]
pub struct CuisineTypeEntity {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub icon: Option<String>,
}

#[derive(Insertable)]
#[diesel(table_name = restaurants)]
pub struct NewRestaurant<'a> {
    pub id: &'a str,
    pub city_id: Option<&'a str>,
    pub name: &'a str,
    pub name_search: String,
    pub slug: &'a str,
    pub street: Option<&'a str>,
    pub postal_code: Option<&'a str>,
    pub city_name: Option<&'a str>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub phone: Option<&'a str>,
    pub email: Option<&'a str>,
    pub website: Option<&'a str>,
    pub price_range: Option<i16>,
    pub rating: Option<f64>,
    pub review_count: i32,
    pub verified: i16,
    pub claimed: i16,
    pub owner_id: Option<&'a str>,
    pub features: String,
    pub specialties: String,
    pub description: Option<&'a str>,
    pub created_at: i64,
}

#[derive(Queryable)]
pub struct RestaurantEntity {
    pub id: String,
    pub city_id: Option<String>,
    pub name: String,
    pub name_search: String,
    pub slug: String,
    pub street: Option<String>,
    pub postal_code: Option<String>,
    pub city_name: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub price_range: Option<i16>,
    pub rating: Option<f64>,
    pub review_count: i32,
    pub verified: i16,
    pub claimed: i16,
    pub owner_id: Option<String>,
    pub features: String,
    pub specialties: String,
    pub description: Option<String>,
    pub created_at: i64,
}

#[derive(Insertable)]
#[diesel(table_name = restaurant_cuisines)]
pub struct NewRestaurantCuisine<'a> {
    pub restaurant_id: &'a str,
    pub cuisine_id: &'a str,
}

#[derive(Insertable)]
#[diesel(table_name = reviews)]
pub struct NewReview<'a> {
    pub id: &'a str,
    pub restaurant_id: &'a str,
    pub rating: i16,
    pub title: Option<&'a str>,
    pub content: &'a str,
    pub user_id: Option<&'a str>,
    pub guest_name: Option<&'a str>,
    pub guest_email: Option<&'a str>,
    pub approved: i16,
    pub verified: i16,
    pub created_at: i64,
}

#[derive(Queryable)]
pub struct ReviewEntity {
    pub id: String,
    pub restaurant_id: String,
    pub rating: i16,
    pub title: Option<String>,
    pub content: String,
    pub user_id: Option<String>,
    pub guest_name: Option<String>,
    pub guest_email: Option<String>,
    pub approved: i16,
    pub verified: i16,
    pub created_at: i64,
}

#[derive(Insertable)]
#[diesel(table_name = favorites)]
pub struct NewFavorite<'a> {
    pub user_id: &'a str,
    pub restaurant_id: &'a str,
    pub created_at: i64,
}

#[derive(Queryable)]
pub struct FavoriteEntity {
    pub user_id: String,
    pub restaurant_id: String,
    pub created_at: i64,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = restaurant_claims, treat_none_as_null = true)]
pub struct NewRestaurantClaim<'a> {
    pub id: &'a str,
    pub restaurant_id: &'a str,
    pub user_id: &'a str,
    pub business_email: &'a str,
    pub phone: Option<&'a str>,
    pub message: Option<&'a str>,
    pub status: i16,
    pub rejection_reason: Option<&'a str>,
    pub reviewed_by: Option<&'a str>,
    pub reviewed_at: Option<i64>,
    pub created_at: i64,
}

#[derive(Queryable)]
pub struct RestaurantClaimEntity {
    pub id: String,
    pub restaurant_id: String,
    pub user_id: String,
    pub business_email: String,
    pub phone: Option<String>,
    pub message: Option<String>,
    pub status: i16,
    pub rejection_reason: Option<String>,
    pub reviewed_by: Option<String>,
    pub reviewed_at: Option<i64>,
    pub created_at: i64,
}

#[derive(Insertable)]
#[diesel(table_name = restaurant_photos)]
pub struct NewRestaurantPhoto<'a> {
    pub id: &'a str,
    pub restaurant_id: &'a str,
    pub url: &'a str,
    pub caption: Option<&'a str>,
    pub is_primary: i16,
    pub approved: i16,
    pub uploaded_by: Option<&'a str>,
    pub created_at: i64,
}

#[derive(Queryable)]
pub struct RestaurantPhotoEntity {
    pub id: String,
    pub restaurant_id: String,
    pub url: String,
    pub caption: Option<String>,
    pub is_primary: i16,
    pub approved: i16,
    pub uploaded_by: Option<String>,
    pub created_at: i64,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = import_jobs, treat_none_as_null = true)]
pub struct NewImportJob<'a> {
    pub id: &'a str,
    pub status: i16,
    pub processed_cities: i32,
    pub imported_restaurants: i32,
    pub imported_reviews: i32,
    pub skipped_restaurants: i32,
    pub last_city: Option<&'a str>,
    pub errors: String,
    pub created_at: i64,
    pub started_at: Option<i64>,
    pub updated_at: i64,
    pub finished_at: Option<i64>,
}

#[derive(Queryable)]
pub struct ImportJobEntity {
    pub id: String,
    pub status: i16,
    pub processed_cities: i32,
    pub imported_restaurants: i32,
    pub imported_reviews: i32,
    pub skipped_restaurants: i32,
    pub last_city: Option<String>,
    pub errors: String,
    pub created_at: i64,
    pub started_at: Option<i64>,
    pub updated_at: i64,
    pub finished_at: Option<i64>,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = ad_placements, treat_none_as_null = true)]
pub struct NewAdPlacement<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub position: i16,
    pub image_url: &'a str,
    pub target_url: &'a str,
    pub active: i16,
    pub starts_at: Option<i64>,
    pub ends_at: Option<i64>,
}

#[derive(Queryable)]
pub struct AdPlacementEntity {
    pub id: String,
    pub name: String,
    pub position: i16,
    pub image_url: String,
    pub target_url: String,
    pub active: i16,
    pub starts_at: Option<i64>,
    pub ends_at: Option<i64>,
}
