use std::collections::HashSet;

use super::prelude::*;

pub const DEFAULT_PHOTO_BATCH_SIZE: u64 = 10;
pub const MAX_PHOTO_BATCH_SIZE: u64 = 50;

#[derive(Debug, Clone, Copy, Default)]
pub struct PhotoRefreshParams {
    pub batch_size: Option<u64>,
    pub offset: Option<u64>,
}

/// A slice of all restaurants whose photos should be refreshed.
#[derive(Debug, Clone)]
pub struct PhotoRefreshPlan {
    pub restaurants: Vec<Restaurant>,
    pub offset: u64,
    pub total_restaurants: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoRefreshBatch {
    pub processed: u64,
    pub photos_downloaded: u64,
    pub errors: Vec<String>,
    pub has_more: bool,
    pub next_offset: u64,
    pub total_restaurants: u64,
}

impl PhotoRefreshPlan {
    pub fn finish(&self, photos_downloaded: u64, errors: Vec<String>) -> PhotoRefreshBatch {
        let processed = self.restaurants.len() as u64;
        let next_offset = self.offset.saturating_add(processed);
        PhotoRefreshBatch {
            processed,
            photos_downloaded,
            errors,
            has_more: processed > 0 && next_offset < self.total_restaurants,
            next_offset,
            total_restaurants: self.total_restaurants,
        }
    }
}

pub fn plan_photo_refresh<R: RestaurantRepo>(repo: &R, params: PhotoRefreshParams) -> Result<PhotoRefreshPlan> {
    let batch_size = params
        .batch_size
        .unwrap_or(DEFAULT_PHOTO_BATCH_SIZE)
        .clamp(1, MAX_PHOTO_BATCH_SIZE);
    let offset = params.offset.unwrap_or(0);
    let total_restaurants = repo.count_restaurants()?;
    let restaurants = repo.list_restaurants(&Pagination {
        offset: Some(offset),
        limit: Some(batch_size),
    })?;
    Ok(PhotoRefreshPlan {
        restaurants,
        offset,
        total_restaurants,
    })
}

/// Stores photo URLs found for a restaurant that are not yet known.
///
/// Found photos are approved. The first one becomes primary if the
/// restaurant has no primary photo. Returns the number of new photos.
pub fn store_found_photos<R: PhotoRepo>(repo: &R, restaurant: &Restaurant, urls: Vec<Url>) -> Result<u64> {
    let existing = repo.all_photos_of_restaurant(restaurant.id.as_str())?;
    let mut known: HashSet<String> = existing.iter().map(|p| p.url.to_string()).collect();
    let mut has_primary = existing.iter().any(|p| p.is_primary && p.approved);
    let mut added = 0;
    for url in urls {
        if !known.insert(url.to_string()) {
            continue;
        }
        let photo = RestaurantPhoto {
            id: Id::new(),
            restaurant_id: restaurant.id.clone(),
            url,
            caption: None,
            is_primary: !has_primary,
            approved: true,
            uploaded_by: None,
            created_at: Timestamp::now(),
        };
        repo.create_photo(&photo)?;
        has_primary = true;
        added += 1;
    }
    Ok(added)
}

#[cfg(test)]
mod tests {
    use super::{super::tests::MockDb, *};
    use eetgids_entities::builders::*;

    fn db(n: usize) -> MockDb {
        let db = MockDb::default();
        for i in 0..n {
            db.restaurants
                .borrow_mut()
                .push(Restaurant::build().id(&format!("r{i:02}")).finish());
        }
        db
    }

    #[test]
    fn page_through_all_restaurants() {
        let db = db(25);
        let mut offset = 0;
        let mut batches = 0;
        loop {
            let plan = plan_photo_refresh(
                &db,
                PhotoRefreshParams {
                    batch_size: Some(10),
                    offset: Some(offset),
                },
            )
            .unwrap();
            let batch = plan.finish(0, vec![]);
            assert_eq!(25, batch.total_restaurants);
            batches += 1;
            offset = batch.next_offset;
            if !batch.has_more {
                assert_eq!(5, batch.processed);
                break;
            }
            assert_eq!(10, batch.processed);
        }
        assert_eq!(3, batches);
        assert_eq!(25, offset);
    }

    #[test]
    fn offset_beyond_end() {
        let db = db(3);
        let plan = plan_photo_refresh(
            &db,
            PhotoRefreshParams {
                batch_size: None,
                offset: Some(7),
            },
        )
        .unwrap();
        let batch = plan.finish(0, vec![]);
        assert_eq!(0, batch.processed);
        assert!(!batch.has_more);
        assert_eq!(7, batch.next_offset);
    }

    #[test]
    fn offset_at_the_end_of_the_number_range() {
        let db = db(3);
        let plan = plan_photo_refresh(
            &db,
            PhotoRefreshParams {
                batch_size: Some(2),
                offset: Some(u64::MAX),
            },
        )
        .unwrap();
        assert!(plan.restaurants.is_empty());
        let batch = plan.finish(0, vec![]);
        assert_eq!(u64::MAX, batch.next_offset);
        assert!(!batch.has_more);

        let plan = PhotoRefreshPlan {
            restaurants: vec![Restaurant::build().id("r99").finish()],
            offset: u64::MAX,
            total_restaurants: 3,
        };
        assert_eq!(u64::MAX, plan.finish(0, vec![]).next_offset);
    }

    #[test]
    fn batch_size_is_clamped() {
        let db = db(80);
        let plan = plan_photo_refresh(
            &db,
            PhotoRefreshParams {
                batch_size: Some(500),
                offset: None,
            },
        )
        .unwrap();
        assert_eq!(MAX_PHOTO_BATCH_SIZE as usize, plan.restaurants.len());
    }

    #[test]
    fn skip_known_photos() {
        let db = db(1);
        let restaurant = db.get_restaurant("r00").unwrap();
        let urls: Vec<Url> = ["https://p.example/1.jpg", "https://p.example/2.jpg", "https://p.example/1.jpg"]
            .into_iter()
            .map(|u| u.parse().unwrap())
            .collect();
        assert_eq!(2, store_found_photos(&db, &restaurant, urls.clone()).unwrap());
        assert_eq!(0, store_found_photos(&db, &restaurant, urls).unwrap());
        let photos = db.approved_photos_of_restaurant("r00").unwrap();
        assert_eq!(2, photos.len());
        assert_eq!(1, photos.iter().filter(|p| p.is_primary).count());
    }
}
