use crate::{geo::MapPoint, id::Id};

#[derive(Debug, Clone, PartialEq)]
pub struct City {
    pub id: Id,
    pub name: String,
    pub slug: String,
    /// Free text grouping key, e.g. "Noord-Holland".
    pub province: String,
    pub center: Option<MapPoint>,
    pub description: Option<String>,
}

/// Cities sharing the same province name.
#[derive(Debug, Clone, PartialEq)]
pub struct Province {
    pub name: String,
    pub cities: Vec<City>,
}
