use super::{parse_email, prelude::*};
use crate::util::validate::non_blank;

#[derive(Debug, Clone, Default)]
pub struct NewReview {
    pub restaurant_id: String,
    pub rating: i64,
    pub title: Option<String>,
    pub content: String,
    /// Required if the author is not signed in.
    pub guest_name: Option<String>,
    /// Required if the author is not signed in.
    pub guest_email: Option<String>,
}

/// Validates a submitted review and returns it together
/// with the reviewed restaurant.
///
/// The review is not approved and stays invisible until moderated.
pub fn prepare_new_review<R>(
    repo: &R,
    new_review: NewReview,
    user_id: Option<&Id>,
) -> Result<(Review, Restaurant)>
where
    R: RestaurantRepo,
{
    let NewReview {
        restaurant_id,
        rating,
        title,
        content,
        guest_name,
        guest_email,
    } = new_review;
    let content = non_blank(Some(content)).ok_or(Error::EmptyContent)?;
    let rating = RatingValue::try_from(rating).map_err(|_| Error::RatingValue)?;
    let author = match user_id {
        Some(id) => Author::User(id.clone()),
        None => {
            let name = non_blank(guest_name).ok_or(Error::GuestName)?;
            let email = non_blank(guest_email).ok_or(Error::Email)?;
            let email = parse_email(&email)?;
            Author::Guest { name, email }
        }
    };
    let restaurant = repo.get_restaurant(&restaurant_id)?;
    let review = Review {
        id: Id::new(),
        restaurant_id: restaurant.id.clone(),
        rating,
        title: non_blank(title),
        content,
        verified: !author.is_guest(),
        author,
        approved: false,
        created_at: Timestamp::now(),
    };
    Ok((review, restaurant))
}

pub fn store_new_review<R: ReviewRepo>(repo: &R, review: &Review) -> Result<()> {
    debug_assert!(!review.approved);
    repo.create_review(review)?;
    log::info!(
        "New review {} for restaurant {} awaits moderation",
        review.id,
        review.restaurant_id
    );
    Ok(())
}
