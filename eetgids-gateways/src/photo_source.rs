use anyhow::{anyhow, Result};
use eetgids_core::{entities::*, gateways::photo_source::PhotoSourceGateway};
use serde::Deserialize;

/// Looks up restaurant photos at an HTTP places API.
#[derive(Debug, Clone)]
pub struct HttpPhotoSource {
    pub api_url: Url,
    pub api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PhotosResponse {
    #[serde(default)]
    photos: Vec<String>,
}

impl PhotosResponse {
    /// Malformed URLs are skipped.
    fn into_urls(self) -> Vec<Url> {
        self.photos
            .into_iter()
            .filter_map(|photo| match photo.parse() {
                Ok(url) => Some(url),
                Err(err) => {
                    log::debug!("Skipping invalid photo URL '{photo}': {err}");
                    None
                }
            })
            .collect()
    }
}

fn query_params(restaurant: &Restaurant) -> Vec<(&'static str, String)> {
    let mut params = vec![("name", restaurant.name.clone())];
    if let Some(city) = &restaurant.address.city {
        params.push(("city", city.clone()));
    }
    if let Some(pos) = restaurant.pos {
        params.push(("lat", pos.lat().to_string()));
        params.push(("lng", pos.lng().to_string()));
    }
    params
}

impl PhotoSourceGateway for HttpPhotoSource {
    fn find_photos(&self, restaurant: &Restaurant) -> Result<Vec<Url>> {
        let mut request = reqwest::blocking::Client::new()
            .get(self.api_url.as_str())
            .query(&query_params(restaurant));
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }
        let response = request.send()?;
        if !response.status().is_success() {
            return Err(anyhow!(
                "Photo source responded with {} for restaurant {}",
                response.status(),
                restaurant.id
            ));
        }
        let photos: PhotosResponse = response.json()?;
        Ok(photos.into_urls())
    }
}

/// A photo source that never finds anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPhotoSource;

impl PhotoSourceGateway for NoPhotoSource {
    fn find_photos(&self, _: &Restaurant) -> Result<Vec<Url>> {
        Ok(vec![])
    }
}
