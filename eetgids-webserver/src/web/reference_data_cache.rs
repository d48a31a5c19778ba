use std::sync::Arc;

use parking_lot::RwLock;

use crate::core::{entities::*, repositories::*, usecases};

/// Cities and cuisine types rarely change but are needed
/// by almost every page.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceData {
    /// Ordered by name
    pub cities: Vec<City>,
    /// Ordered by name
    pub cuisines: Vec<CuisineType>,
}

impl ReferenceData {
    fn load<R>(repo: &R) -> Result<Self, Error>
    where
        R: CityRepo + CuisineRepo,
    {
        let mut cities = repo.all_cities()?;
        cities.sort_by(|a, b| a.name.cmp(&b.name));
        let mut cuisines = repo.all_cuisines()?;
        cuisines.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(Self { cities, cuisines })
    }

    pub fn city(&self, slug: &str) -> Option<&City> {
        self.cities.iter().find(|c| c.slug == slug)
    }

    pub fn cuisine(&self, slug: &str) -> Option<&CuisineType> {
        self.cuisines.iter().find(|c| c.slug == slug)
    }

    pub fn provinces(&self) -> Vec<Province> {
        usecases::group_by_province(self.cities.clone())
    }
}

/// Lazily (re)loaded after each invalidation.
#[derive(Default)]
pub struct ReferenceDataCache {
    data: RwLock<Option<Arc<ReferenceData>>>,
}

impl ReferenceDataCache {
    pub fn new_from_db<R>(repo: &R) -> Result<Self, Error>
    where
        R: CityRepo + CuisineRepo,
    {
        let data = ReferenceData::load(repo)?;
        Ok(Self {
            data: RwLock::new(Some(Arc::new(data))),
        })
    }

    pub fn get_or_load<R>(&self, repo: &R) -> Result<Arc<ReferenceData>, Error>
    where
        R: CityRepo + CuisineRepo,
    {
        if let Some(data) = self.data.read().as_ref() {
            return Ok(Arc::clone(data));
        }
        let mut locked = self.data.write();
        // Another request might have loaded the data in the meantime
        if let Some(data) = locked.as_ref() {
            return Ok(Arc::clone(data));
        }
        let data = Arc::new(ReferenceData::load(repo)?);
        debug!(
            "Cached {} cities and {} cuisines",
            data.cities.len(),
            data.cuisines.len()
        );
        *locked = Some(Arc::clone(&data));
        Ok(data)
    }

    pub fn invalidate(&self) {
        debug!("Invalidating cached reference data");
        *self.data.write() = None;
    }
}
