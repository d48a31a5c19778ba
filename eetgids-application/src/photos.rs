use super::*;

pub fn submit_photo<G>(
    connections: &sqlite::Connections,
    verification: &G,
    user_id: Option<&Id>,
    new_photo: usecases::NewPhoto,
    verification_token: Option<&str>,
    remote_ip: Option<&str>,
) -> Result<RestaurantPhoto>
where
    G: HumanVerificationGateway + ?Sized,
{
    if user_id.is_none() {
        return Err(usecases::Error::Unauthorized.into());
    }
    usecases::verify_human(verification, verification_token, remote_ip)?;
    Ok(connections
        .exclusive()?
        .transaction(|conn| usecases::submit_photo(conn, user_id, new_photo))?)
}

pub fn approve_photo(connections: &sqlite::Connections, photo_id: &str) -> Result<RestaurantPhoto> {
    Ok(connections
        .exclusive()?
        .transaction(|conn| usecases::approve_photo(conn, photo_id))?)
}

pub fn reject_photo(connections: &sqlite::Connections, photo_id: &str) -> Result<()> {
    Ok(connections
        .exclusive()?
        .transaction(|conn| usecases::reject_photo(conn, photo_id))?)
}

pub fn set_primary_photo(
    connections: &sqlite::Connections,
    photo_id: &str,
) -> Result<RestaurantPhoto> {
    Ok(connections
        .exclusive()?
        .transaction(|conn| usecases::set_primary_photo(conn, photo_id))?)
}

#[cfg(test)]
mod tests {
    use super::super::tests::prelude::*;

    fn submit(fixture: &BackendFixture, restaurant_id: &str, n: usize) -> RestaurantPhoto {
        flows::submit_photo(
            &fixture.db_connections,
            &fixture.verification,
            Some(&"u1".into()),
            usecases::NewPhoto {
                restaurant_id: restaurant_id.into(),
                url: format!("https://img.example.com/{n}.jpg"),
                caption: None,
            },
            Some(VALID_TOKEN),
            None,
        )
        .unwrap()
    }

    #[test]
    fn single_primary_photo_per_restaurant() {
        let fixture = BackendFixture::new();
        let restaurant = fixture.create_restaurant("amsterdam", "De Gouden Lepel");
        let id = restaurant.id.as_str();
        let p1 = submit(&fixture, id, 1);
        let p2 = submit(&fixture, id, 2);
        let p3 = submit(&fixture, id, 3);
        assert!(fixture.approved_photos(id).is_empty());

        let p1 = flows::approve_photo(&fixture.db_connections, p1.id.as_str()).unwrap();
        assert!(p1.is_primary);
        let p2 = flows::approve_photo(&fixture.db_connections, p2.id.as_str()).unwrap();
        assert!(!p2.is_primary);

        flows::set_primary_photo(&fixture.db_connections, p2.id.as_str()).unwrap();
        flows::reject_photo(&fixture.db_connections, p3.id.as_str()).unwrap();

        let photos = fixture.approved_photos(id);
        assert_eq!(2, photos.len());
        assert_eq!(p2.id, photos[0].id);
        assert!(photos[0].is_primary);
        assert!(!photos[1].is_primary);
    }
}
