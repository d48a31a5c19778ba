use super::*;

pub fn submit_review<G, N>(
    connections: &sqlite::Connections,
    verification: &G,
    notify: &N,
    new_review: usecases::NewReview,
    user_id: Option<&Id>,
    verification_token: Option<&str>,
    remote_ip: Option<&str>,
) -> Result<Review>
where
    G: HumanVerificationGateway + ?Sized,
    N: NotificationGateway + ?Sized,
{
    // Nothing is written for unverified requests
    usecases::verify_human(verification, verification_token, remote_ip)?;

    let (review, restaurant) = connections.exclusive()?.transaction(|conn| {
        let (review, restaurant) = usecases::prepare_new_review(conn, new_review, user_id)?;
        usecases::store_new_review(conn, &review)?;
        Ok::<_, usecases::Error>((review, restaurant))
    })?;

    notify.notify(NotificationEvent::ReviewSubmitted {
        review: &review,
        restaurant: &restaurant,
    });
    Ok(review)
}

pub fn approve_review(connections: &sqlite::Connections, review_id: &str) -> Result<Review> {
    Ok(connections.exclusive()?.transaction(|conn| {
        usecases::approve_review(conn, review_id).inspect_err(|err| {
            warn!("Failed to approve review {review_id}: {err}");
        })
    })?)
}

pub fn reject_review(connections: &sqlite::Connections, review_id: &str) -> Result<Review> {
    Ok(connections.exclusive()?.transaction(|conn| {
        usecases::reject_review(conn, review_id).inspect_err(|err| {
            warn!("Failed to reject review {review_id}: {err}");
        })
    })?)
}
