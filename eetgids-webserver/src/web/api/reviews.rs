use super::*;

#[post("/restaurants/<id>/reviews", format = "application/json", data = "<review>")]
pub async fn post_review(
    db: sqlite::Connections,
    verification: &State<HumanVerification>,
    notify: &State<Notify>,
    auth: Auth,
    id: &str,
    review: JsonResult<'_, json::NewReview>,
) -> Result<json::Review> {
    let (new_review, token) = from_json::new_review(id, review?.into_inner());
    let verification = verification.inner().clone();
    let notify = notify.inner().clone();
    let user_id = auth.user_id().cloned();
    let remote_ip = auth.remote_ip();
    let review = run_blocking(move || {
        flows::submit_review(
            &db,
            &*verification,
            &*notify,
            new_review,
            user_id.as_ref(),
            token.as_deref(),
            remote_ip.as_deref(),
        )
    })
    .await?;
    Ok(Json(review.into()))
}

#[get("/reviews/pending?<offset>&<limit>")]
pub fn get_pending_reviews(
    db: sqlite::Connections,
    auth: Auth,
    offset: Option<u64>,
    limit: Option<u64>,
) -> Result<Vec<json::Review>> {
    require_admin(&db, &auth)?;
    let pagination = Pagination { offset, limit };
    let reviews = usecases::pending_reviews(&db.shared()?, &pagination)?;
    Ok(Json(reviews.into_iter().map(Into::into).collect()))
}

#[post("/reviews/<id>/approve")]
pub fn post_approve_review(db: sqlite::Connections, auth: Auth, id: &str) -> Result<json::Review> {
    require_admin(&db, &auth)?;
    let review = flows::approve_review(&db, id)?;
    Ok(Json(review.into()))
}

#[post("/reviews/<id>/reject")]
pub fn post_reject_review(db: sqlite::Connections, auth: Auth, id: &str) -> Result<json::Review> {
    require_admin(&db, &auth)?;
    let review = flows::reject_review(&db, id)?;
    Ok(Json(review.into()))
}
