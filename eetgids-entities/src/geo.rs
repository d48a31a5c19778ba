use std::{fmt, str::FromStr};

use thiserror::Error;

/// Mean earth radius used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6_371.0;

const LAT_DEG_MIN: f64 = -90.0;
const LAT_DEG_MAX: f64 = 90.0;
const LNG_DEG_MIN: f64 = -180.0;
const LNG_DEG_MAX: f64 = 180.0;

/// A WGS-84 position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct MapPoint {
    lat: f64,
    lng: f64,
}

impl MapPoint {
    /// Creates a point without validating the coordinate ranges.
    pub const fn from_lat_lng_deg(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn try_from_lat_lng_deg(lat: f64, lng: f64) -> Result<Self, MapPointError> {
        if !(LAT_DEG_MIN..=LAT_DEG_MAX).contains(&lat) {
            return Err(MapPointError::Latitude(lat));
        }
        if !(LNG_DEG_MIN..=LNG_DEG_MAX).contains(&lng) {
            return Err(MapPointError::Longitude(lng));
        }
        Ok(Self { lat, lng })
    }

    pub const fn lat(self) -> f64 {
        self.lat
    }

    pub const fn lng(self) -> f64 {
        self.lng
    }

    pub fn is_valid(self) -> bool {
        (LAT_DEG_MIN..=LAT_DEG_MAX).contains(&self.lat)
            && (LNG_DEG_MIN..=LNG_DEG_MAX).contains(&self.lng)
    }

    /// Great-circle distance between two points (haversine formula).
    pub fn distance(p1: Self, p2: Self) -> Distance {
        let lat1 = p1.lat.to_radians();
        let lat2 = p2.lat.to_radians();
        let d_lat = (p2.lat - p1.lat).to_radians();
        let d_lng = (p2.lng - p1.lng).to_radians();
        let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        Distance::from_km(EARTH_RADIUS_KM * c)
    }

    pub fn distance_to(self, other: Self) -> Distance {
        Self::distance(self, other)
    }
}

impl fmt::Display for MapPoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum MapPointError {
    #[error("Latitude out of range: {0}")]
    Latitude(f64),
    #[error("Longitude out of range: {0}")]
    Longitude(f64),
    #[error("Malformed position")]
    Malformed,
}

/// Parses "lat,lng" in degrees.
impl FromStr for MapPoint {
    type Err = MapPointError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lng) = s.split_once(',').ok_or(MapPointError::Malformed)?;
        let lat = lat.trim().parse().map_err(|_| MapPointError::Malformed)?;
        let lng = lng.trim().parse().map_err(|_| MapPointError::Malformed)?;
        Self::try_from_lat_lng_deg(lat, lng)
    }
}

/// A non-negative distance in kilometers.
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
pub struct Distance(f64);

impl Distance {
    pub const fn from_km(km: f64) -> Self {
        Self(km)
    }

    pub fn from_meters(meters: f64) -> Self {
        Self(meters / 1_000.0)
    }

    pub const fn to_km(self) -> f64 {
        self.0
    }

    pub fn to_meters(self) -> f64 {
        self.0 * 1_000.0
    }

    pub fn is_valid(self) -> bool {
        self.0 >= 0.0
    }

    /// Total order for sorting, NaN last.
    pub fn total_cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.0 < 1.0 {
            write!(f, "{:.0} m", self.to_meters())
        } else {
            write!(f, "{:.1} km", self.0)
        }
    }
}
