use std::sync::Arc;

use super::*;
use crate::web::reference_data_cache::ReferenceData;

fn reference_data(
    db: &sqlite::Connections,
    cache: &ReferenceDataCache,
) -> result::Result<Arc<ReferenceData>, ApiError> {
    Ok(cache.get_or_load(&db.shared()?)?)
}

#[get("/cities")]
pub fn get_cities(
    db: sqlite::Connections,
    cache: &State<ReferenceDataCache>,
) -> Result<Vec<json::City>> {
    let data = reference_data(&db, cache)?;
    Ok(Json(data.cities.iter().cloned().map(Into::into).collect()))
}

#[get("/cities/<slug>")]
pub fn get_city(
    db: sqlite::Connections,
    cache: &State<ReferenceDataCache>,
    slug: &str,
) -> Result<json::City> {
    let data = reference_data(&db, cache)?;
    let city = data.city(slug).cloned().ok_or(RepoError::NotFound)?;
    Ok(Json(city.into()))
}

#[get("/provinces")]
pub fn get_provinces(
    db: sqlite::Connections,
    cache: &State<ReferenceDataCache>,
) -> Result<Vec<json::Province>> {
    let data = reference_data(&db, cache)?;
    Ok(Json(data.provinces().into_iter().map(Into::into).collect()))
}

#[get("/cuisines")]
pub fn get_cuisines(
    db: sqlite::Connections,
    cache: &State<ReferenceDataCache>,
) -> Result<Vec<json::Cuisine>> {
    let data = reference_data(&db, cache)?;
    Ok(Json(data.cuisines.iter().cloned().map(Into::into).collect()))
}

#[get("/cuisines/<slug>")]
pub fn get_cuisine(
    db: sqlite::Connections,
    cache: &State<ReferenceDataCache>,
    slug: &str,
) -> Result<json::Cuisine> {
    let data = reference_data(&db, cache)?;
    let cuisine = data.cuisine(slug).cloned().ok_or(RepoError::NotFound)?;
    Ok(Json(cuisine.into()))
}
