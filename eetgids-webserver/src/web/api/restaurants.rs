use rocket::FromForm;

use super::*;

/// Filter parameters shared by the JSON listing and the HTML pages.
#[derive(FromForm, Debug, Default, Clone)]
pub struct ListingQuery {
    pub city: Option<String>,
    pub cuisine: Option<String>,
    pub min_rating: Option<f64>,
    pub min_reviews: Option<u32>,
    /// Comma separated price tiers, e.g. `€€,€€€` or `2,3`
    pub price: Option<String>,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.map(|s| s.trim().to_owned()).filter(|s| !s.is_empty())
}

impl ListingQuery {
    pub fn into_filter(self) -> result::Result<usecases::RestaurantFilter, ApiError> {
        let Self {
            city,
            cuisine,
            min_rating,
            min_reviews,
            price,
            search,
            sort_by,
            sort_order,
            page,
            limit,
        } = self;
        let price_ranges = match non_empty(price) {
            Some(price) => from_json::price_ranges(&price)?,
            None => vec![],
        };
        let sort_by = non_empty(sort_by)
            .map(|s| from_json::sort_by(&s))
            .transpose()?;
        let sort_order = non_empty(sort_order)
            .map(|s| from_json::sort_order(&s))
            .transpose()?;
        Ok(usecases::RestaurantFilter {
            city_slug: non_empty(city),
            cuisine_slug: non_empty(cuisine),
            min_rating,
            min_reviews,
            price_ranges,
            search: non_empty(search),
            sort_by,
            sort_order,
            page,
            limit,
        })
    }
}

#[get("/restaurants?<query..>")]
pub fn get_restaurants(
    db: sqlite::Connections,
    query: ListingQuery,
) -> Result<json::RestaurantPage> {
    let filter = query.into_filter()?;
    let page = usecases::query_restaurants(&db.shared()?, &filter)?;
    Ok(Json(to_json::restaurant_page(page)))
}

#[get("/restaurants/nearby?<lat>&<lng>&<limit>")]
pub fn get_nearby_restaurants(
    db: sqlite::Connections,
    lat: Option<f64>,
    lng: Option<f64>,
    limit: Option<usize>,
) -> Result<Vec<json::NearbyRestaurant>> {
    if lat.is_none() || lng.is_none() {
        return Ok(Json(vec![]));
    }
    let nearby = usecases::nearby_restaurants(&db.shared()?, lat, lng, limit)?;
    Ok(Json(nearby.into_iter().map(Into::into).collect()))
}

#[get("/restaurants/stats?<query..>")]
pub fn get_listing_stats(db: sqlite::Connections, query: ListingQuery) -> Result<json::ListingStats> {
    let filter = query.into_filter()?;
    let stats = usecases::listing_stats(&db.shared()?, &filter)?;
    Ok(Json(to_json::listing_stats(stats)))
}

#[get("/restaurants/locations")]
pub fn get_restaurant_locations(
    db: sqlite::Connections,
) -> Result<Vec<json::RestaurantLocation>> {
    let restaurants = db.shared()?.restaurants_with_position()?;
    Ok(Json(to_json::restaurant_locations(restaurants)))
}

#[get("/cities/<city>/restaurants/<slug>")]
pub fn get_restaurant_details(
    db: sqlite::Connections,
    city: &str,
    slug: &str,
) -> Result<json::RestaurantDetails> {
    let details = usecases::load_restaurant_details(&db.shared()?, city, slug)?;
    Ok(Json(to_json::restaurant_details(details)))
}

#[post("/restaurants", format = "application/json", data = "<restaurant>")]
pub fn post_restaurant(
    db: sqlite::Connections,
    notify: &State<Notify>,
    auth: Auth,
    restaurant: JsonResult<json::NewRestaurant>,
) -> Result<json::Restaurant> {
    let new_restaurant = from_json::new_restaurant(restaurant?.into_inner());
    let restaurant =
        flows::register_restaurant(&db, &***notify, auth.user_id(), new_restaurant)?;
    Ok(Json(restaurant.into()))
}
