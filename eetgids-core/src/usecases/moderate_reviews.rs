use super::prelude::*;

/// Recomputes rating and review count of a restaurant from
/// its approved reviews.
pub fn recalculate_restaurant_rating<R>(repo: &R, restaurant_id: &str) -> Result<(Option<AvgRating>, u32)>
where
    R: ReviewRepo + RestaurantRepo,
{
    let reviews = repo.approved_reviews_of_restaurant(restaurant_id)?;
    let mut builder = AvgRatingBuilder::default();
    builder.extend(reviews.iter().map(|r| r.rating));
    let count = builder.count();
    let rating = builder.build();
    repo.set_restaurant_rating(restaurant_id, rating, count)?;
    Ok((rating, count))
}

pub fn approve_review<R>(repo: &R, id: &str) -> Result<Review>
where
    R: ReviewRepo + RestaurantRepo,
{
    let mut review = repo.get_review(id)?;
    if !review.approved {
        repo.approve_review(id)?;
        review.approved = true;
    }
    let (rating, count) = recalculate_restaurant_rating(repo, review.restaurant_id.as_str())?;
    log::info!(
        "Approved review {} of restaurant {} (rating = {:?}, reviews = {})",
        review.id,
        review.restaurant_id,
        rating.map(f64::from),
        count
    );
    Ok(review)
}

/// Deletes the review.
pub fn reject_review<R>(repo: &R, id: &str) -> Result<Review>
where
    R: ReviewRepo + RestaurantRepo,
{
    let review = repo.get_review(id)?;
    repo.delete_review(id)?;
    if review.approved {
        recalculate_restaurant_rating(repo, review.restaurant_id.as_str())?;
    }
    log::info!("Rejected review {} of restaurant {}", review.id, review.restaurant_id);
    Ok(review)
}

pub fn pending_reviews<R: ReviewRepo>(repo: &R, pagination: &Pagination) -> Result<Vec<Review>> {
    Ok(repo.pending_reviews(pagination)?)
}
