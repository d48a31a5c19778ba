use super::*;

/// Looks up photos for a slice of all restaurants.
///
/// The database is not locked while the photo source is queried.
/// Failures of single restaurants are collected and do not abort the batch.
pub fn refresh_photos<P>(
    connections: &sqlite::Connections,
    photo_source: &P,
    params: usecases::PhotoRefreshParams,
) -> Result<usecases::PhotoRefreshBatch>
where
    P: PhotoSourceGateway + ?Sized,
{
    let plan = usecases::plan_photo_refresh(&connections.shared()?, params)?;
    let mut photos_downloaded = 0;
    let mut errors = vec![];
    for restaurant in &plan.restaurants {
        let urls = match photo_source.find_photos(restaurant) {
            Ok(urls) => urls,
            Err(err) => {
                warn!("Failed to find photos of restaurant {}: {err}", restaurant.id);
                errors.push(format!("{}: {err}", restaurant.name));
                continue;
            }
        };
        if urls.is_empty() {
            continue;
        }
        let stored = connections
            .exclusive()?
            .transaction(|conn| usecases::store_found_photos(conn, restaurant, urls));
        match stored {
            Ok(count) => photos_downloaded += count,
            Err(err) => {
                warn!("Failed to store photos of restaurant {}: {err}", restaurant.id);
                errors.push(format!("{}: {err}", restaurant.name));
            }
        }
    }
    let batch = plan.finish(photos_downloaded, errors);
    info!(
        "Refreshed photos of {} restaurants: {} new photos, {} errors",
        batch.processed,
        batch.photos_downloaded,
        batch.errors.len()
    );
    Ok(batch)
}

#[cfg(test)]
mod tests {
    use super::super::tests::prelude::*;

    struct FakePhotoSource;

    impl PhotoSourceGateway for FakePhotoSource {
        fn find_photos(&self, restaurant: &Restaurant) -> anyhow::Result<Vec<Url>> {
            if restaurant.name.starts_with("Kapot") {
                anyhow::bail!("service unavailable");
            }
            Ok(vec![
                format!("https://img.example.com/{}/1.jpg", restaurant.slug).parse()?,
                format!("https://img.example.com/{}/2.jpg", restaurant.slug).parse()?,
            ])
        }
    }

    fn params(batch_size: u64, offset: u64) -> usecases::PhotoRefreshParams {
        usecases::PhotoRefreshParams {
            batch_size: Some(batch_size),
            offset: Some(offset),
        }
    }

    #[test]
    fn page_through_all_restaurants() {
        let fixture = BackendFixture::new();
        let a = fixture.create_restaurant("amsterdam", "Aap");
        fixture.create_restaurant("amsterdam", "Kapot");
        fixture.create_restaurant("amsterdam", "Noot");
        let db = &fixture.db_connections;

        let first = flows::refresh_photos(db, &FakePhotoSource, params(2, 0)).unwrap();
        assert_eq!(2, first.processed);
        assert!(first.has_more);
        assert_eq!(2, first.next_offset);
        assert_eq!(3, first.total_restaurants);

        let second = flows::refresh_photos(db, &FakePhotoSource, params(2, 2)).unwrap();
        assert_eq!(1, second.processed);
        assert!(!second.has_more);
        assert_eq!(3, second.next_offset);

        assert_eq!(4, first.photos_downloaded + second.photos_downloaded);
        assert_eq!(1, first.errors.len() + second.errors.len());

        // Known photos are skipped
        let again = flows::refresh_photos(db, &FakePhotoSource, params(3, 0)).unwrap();
        assert_eq!(0, again.photos_downloaded);

        let photos = fixture.approved_photos(a.id.as_str());
        assert_eq!(2, photos.len());
        assert_eq!(1, photos.iter().filter(|p| p.is_primary).count());
    }
}
