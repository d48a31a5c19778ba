use super::{parse_web_url, prelude::*};
use crate::util::validate::non_blank;

#[derive(Debug, Clone, Default)]
pub struct NewPhoto {
    pub restaurant_id: String,
    pub url: String,
    pub caption: Option<String>,
}

pub fn submit_photo<R>(repo: &R, user_id: Option<&Id>, new_photo: NewPhoto) -> Result<RestaurantPhoto>
where
    R: RestaurantRepo + PhotoRepo,
{
    let user_id = user_id.ok_or(Error::Unauthorized)?;
    let url = parse_web_url(Some(&new_photo.url))?.ok_or(Error::Url)?;
    let restaurant = repo.get_restaurant(&new_photo.restaurant_id)?;
    let photo = RestaurantPhoto {
        id: Id::new(),
        restaurant_id: restaurant.id,
        url,
        caption: non_blank(new_photo.caption),
        is_primary: false,
        approved: false,
        uploaded_by: Some(user_id.clone()),
        created_at: Timestamp::now(),
    };
    repo.create_photo(&photo)?;
    log::info!(
        "User {} submitted photo {} of restaurant {}",
        user_id,
        photo.id,
        photo.restaurant_id
    );
    Ok(photo)
}

/// Approves a photo. The first approved photo of a
/// restaurant becomes its primary photo.
pub fn approve_photo<R: PhotoRepo>(repo: &R, id: &str) -> Result<RestaurantPhoto> {
    let mut photo = repo.get_photo(id)?;
    if !photo.approved {
        repo.approve_photo(id)?;
        photo.approved = true;
    }
    let has_primary = repo
        .approved_photos_of_restaurant(photo.restaurant_id.as_str())?
        .iter()
        .any(|p| p.is_primary);
    if !has_primary {
        repo.set_primary_photo(photo.restaurant_id.as_str(), id)?;
        photo.is_primary = true;
    }
    log::info!("Approved photo {id}");
    Ok(photo)
}

pub fn reject_photo<R: PhotoRepo>(repo: &R, id: &str) -> Result<()> {
    let photo = repo.get_photo(id)?;
    repo.delete_photo(id)?;
    log::info!("Rejected photo {} of restaurant {}", id, photo.restaurant_id);
    Ok(())
}

/// Approves the photo if needed and makes it the only primary
/// photo of its restaurant.
pub fn set_primary_photo<R: PhotoRepo>(repo: &R, id: &str) -> Result<RestaurantPhoto> {
    let mut photo = repo.get_photo(id)?;
    if !photo.approved {
        repo.approve_photo(id)?;
        photo.approved = true;
    }
    repo.set_primary_photo(photo.restaurant_id.as_str(), id)?;
    photo.is_primary = true;
    Ok(photo)
}

pub fn pending_photos<R: PhotoRepo>(repo: &R, pagination: &Pagination) -> Result<Vec<RestaurantPhoto>> {
    Ok(repo.pending_photos(pagination)?)
}

#[cfg(test)]
mod tests {
    use super::{super::tests::MockDb, *};
    use eetgids_entities::builders::*;

    fn db() -> MockDb {
        let db = MockDb::default();
        db.restaurants
            .borrow_mut()
            .push(Restaurant::build().id("r1").finish());
        db
    }

    fn submit(db: &MockDb, url: &str) -> RestaurantPhoto {
        let photo = NewPhoto {
            restaurant_id: "r1".into(),
            url: url.into(),
            caption: None,
        };
        submit_photo(db, Some(&"u1".into()), photo).unwrap()
    }

    #[test]
    fn submitted_photos_await_approval() {
        let db = db();
        let photo = submit(&db, "https://img.example.nl/1.jpg");
        assert!(!photo.approved);
        assert_eq!(1, pending_photos(&db, &Pagination::default()).unwrap().len());
        assert!(db.approved_photos_of_restaurant("r1").unwrap().is_empty());
    }

    #[test]
    fn first_approved_photo_becomes_primary() {
        let db = db();
        let p1 = submit(&db, "https://img.example.nl/1.jpg");
        let p2 = submit(&db, "https://img.example.nl/2.jpg");
        assert!(approve_photo(&db, p1.id.as_str()).unwrap().is_primary);
        assert!(!approve_photo(&db, p2.id.as_str()).unwrap().is_primary);
        set_primary_photo(&db, p2.id.as_str()).unwrap();
        let approved = db.approved_photos_of_restaurant("r1").unwrap();
        assert_eq!(p2.id, approved[0].id);
        assert_eq!(1, approved.iter().filter(|p| p.is_primary).count());
    }

    #[test]
    fn reject_invalid_urls() {
        let db = db();
        let photo = NewPhoto {
            restaurant_id: "r1".into(),
            url: "javascript:alert(1)".into(),
            caption: None,
        };
        assert!(matches!(
            submit_photo(&db, Some(&"u1".into()), photo),
            Err(Error::Url)
        ));
    }
}
