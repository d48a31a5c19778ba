use super::prelude::*;

pub const DEFAULT_NEARBY_LIMIT: usize = 10;
pub const MAX_NEARBY_LIMIT: usize = 100;

/// Number of positioned restaurants up to which ranking by a full
/// scan is acceptable. Beyond that a spatial index is needed.
pub const NEARBY_CANDIDATE_CEILING: usize = 10_000;

/// The restaurants closest to the given position, nearest first.
///
/// Without both coordinates the result is empty and the
/// store is not accessed at all.
pub fn nearby_restaurants<R>(
    repo: &R,
    lat: Option<f64>,
    lng: Option<f64>,
    limit: Option<usize>,
) -> Result<Vec<NearbyRestaurant>>
where
    R: RestaurantRepo,
{
    let (Some(lat), Some(lng)) = (lat, lng) else {
        return Ok(vec![]);
    };
    let origin = MapPoint::try_from_lat_lng_deg(lat, lng)?;
    let limit = limit.unwrap_or(DEFAULT_NEARBY_LIMIT).min(MAX_NEARBY_LIMIT);
    if limit == 0 {
        return Err(Error::InvalidLimit);
    }
    let candidates = repo.restaurants_with_position()?;
    if candidates.len() > NEARBY_CANDIDATE_CEILING {
        log::warn!(
            "Ranking {} restaurants by distance exceeds the full scan ceiling of {}",
            candidates.len(),
            NEARBY_CANDIDATE_CEILING
        );
    }
    Ok(rank_by_distance(origin, candidates, limit))
}

/// Sorts by ascending distance from `origin` and keeps the first `limit`.
///
/// Equal distances are ordered by restaurant id. Restaurants
/// without a position are skipped.
pub fn rank_by_distance(
    origin: MapPoint,
    candidates: Vec<RestaurantWithRelations>,
    limit: usize,
) -> Vec<NearbyRestaurant> {
    let mut ranked: Vec<_> = candidates
        .into_iter()
        .filter_map(|r| {
            let pos = r.restaurant.pos?;
            Some(NearbyRestaurant {
                distance: origin.distance_to(pos),
                restaurant: r,
            })
        })
        .collect();
    ranked.sort_by(|a, b| {
        a.distance
            .total_cmp(&b.distance)
            .then_with(|| a.restaurant.restaurant.id.cmp(&b.restaurant.restaurant.id))
    });
    ranked.truncate(limit);
    ranked
}

#[cfg(test)]
mod tests {
    use super::{super::tests::MockDb, *};
    use eetgids_entities::builders::*;

    fn with_relations(restaurant: Restaurant) -> RestaurantWithRelations {
        RestaurantWithRelations {
            restaurant,
            city: None,
            cuisines: vec![],
        }
    }

    fn grid_db() -> MockDb {
        let db = MockDb::default();
        for i in 0..15 {
            let restaurant = Restaurant::build()
                .id(&format!("r{i:02}"))
                .lat_lng(52.0 + f64::from(i) * 0.01, 5.0 - f64::from(i) * 0.005)
                .finish();
            db.restaurants.borrow_mut().push(restaurant);
        }
        for i in 0..3 {
            db.restaurants.borrow_mut().push(
                Restaurant::build()
                    .id(&format!("nopos{i}"))
                    .no_pos()
                    .finish(),
            );
        }
        db
    }

    #[test]
    fn no_coordinates_no_fetch() {
        let db = grid_db();
        assert!(nearby_restaurants(&db, None, None, None).unwrap().is_empty());
        assert!(nearby_restaurants(&db, Some(52.0), None, None).unwrap().is_empty());
        assert!(nearby_restaurants(&db, None, Some(5.0), Some(3)).unwrap().is_empty());
        assert_eq!(0, db.position_scans.get());
    }

    #[test]
    fn sorted_by_distance_and_truncated() {
        let db = grid_db();
        let nearby = nearby_restaurants(&db, Some(52.07), Some(4.96), None).unwrap();
        assert_eq!(DEFAULT_NEARBY_LIMIT, nearby.len());
        assert_eq!(1, db.position_scans.get());
        assert!(nearby
            .windows(2)
            .all(|w| w[0].distance.to_km() <= w[1].distance.to_km()));
        assert_eq!("r07", nearby[0].restaurant.restaurant.id.as_str());
    }

    #[test]
    fn size_is_limited_by_positioned_restaurants() {
        let db = grid_db();
        let nearby = nearby_restaurants(&db, Some(52.0), Some(5.0), Some(50)).unwrap();
        assert_eq!(15, nearby.len());
        let nearby = nearby_restaurants(&db, Some(52.0), Some(5.0), Some(4)).unwrap();
        assert_eq!(4, nearby.len());
    }

    #[test]
    fn equal_distances_are_ordered_by_id() {
        let origin = MapPoint::from_lat_lng_deg(52.0, 5.0);
        let candidates = ["b", "c", "a"]
            .into_iter()
            .map(|id| with_relations(Restaurant::build().id(id).lat_lng(52.01, 5.0).finish()))
            .collect();
        let ranked = rank_by_distance(origin, candidates, 10);
        let ids: Vec<_> = ranked
            .iter()
            .map(|n| n.restaurant.restaurant.id.as_str())
            .collect();
        assert_eq!(vec!["a", "b", "c"], ids);
    }

    #[test]
    fn reject_invalid_position_and_zero_limit() {
        let db = grid_db();
        assert!(matches!(
            nearby_restaurants(&db, Some(95.0), Some(5.0), None),
            Err(Error::InvalidPosition)
        ));
        assert!(matches!(
            nearby_restaurants(&db, Some(52.0), Some(5.0), Some(0)),
            Err(Error::InvalidLimit)
        ));
    }
}
