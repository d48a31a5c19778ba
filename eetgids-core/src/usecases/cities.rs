use std::collections::BTreeMap;

use super::prelude::*;

/// Name of the group for cities without a province.
pub const UNKNOWN_PROVINCE: &str = "Overig";

/// Groups cities by their province name, both sorted by name.
pub fn group_by_province(cities: Vec<City>) -> Vec<Province> {
    let mut provinces: BTreeMap<String, Vec<City>> = BTreeMap::new();
    for city in cities {
        let name = match city.province.trim() {
            "" => UNKNOWN_PROVINCE.to_owned(),
            name => name.to_owned(),
        };
        provinces.entry(name).or_default().push(city);
    }
    provinces
        .into_iter()
        .map(|(name, mut cities)| {
            cities.sort_by(|a, b| a.name.cmp(&b.name));
            Province { name, cities }
        })
        .collect()
}

pub fn cities_by_province<R: CityRepo>(repo: &R) -> Result<Vec<Province>> {
    Ok(group_by_province(repo.all_cities()?))
}
