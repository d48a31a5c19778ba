use super::*;

#[post("/restaurants/<id>/photos", format = "application/json", data = "<photo>")]
pub async fn post_photo(
    db: sqlite::Connections,
    verification: &State<HumanVerification>,
    auth: Auth,
    id: &str,
    photo: JsonResult<'_, json::NewPhoto>,
) -> Result<json::Photo> {
    let (new_photo, token) = from_json::new_photo(id, photo?.into_inner());
    let user_id = auth.identity()?.user_id.clone();
    let verification = verification.inner().clone();
    let remote_ip = auth.remote_ip();
    let photo = run_blocking(move || {
        flows::submit_photo(
            &db,
            &*verification,
            Some(&user_id),
            new_photo,
            token.as_deref(),
            remote_ip.as_deref(),
        )
    })
    .await?;
    Ok(Json(photo.into()))
}

#[get("/photos/pending?<offset>&<limit>")]
pub fn get_pending_photos(
    db: sqlite::Connections,
    auth: Auth,
    offset: Option<u64>,
    limit: Option<u64>,
) -> Result<Vec<json::Photo>> {
    require_admin(&db, &auth)?;
    let pagination = Pagination { offset, limit };
    let photos = usecases::pending_photos(&db.shared()?, &pagination)?;
    Ok(Json(photos.into_iter().map(Into::into).collect()))
}

#[post("/photos/<id>/approve")]
pub fn post_approve_photo(db: sqlite::Connections, auth: Auth, id: &str) -> Result<json::Photo> {
    require_admin(&db, &auth)?;
    let photo = flows::approve_photo(&db, id)?;
    Ok(Json(photo.into()))
}

#[post("/photos/<id>/reject")]
pub fn post_reject_photo(db: sqlite::Connections, auth: Auth, id: &str) -> StatusResult {
    require_admin(&db, &auth)?;
    flows::reject_photo(&db, id)?;
    Ok(Status::NoContent)
}

#[post("/photos/<id>/primary")]
pub fn post_primary_photo(db: sqlite::Connections, auth: Auth, id: &str) -> Result<json::Photo> {
    require_admin(&db, &auth)?;
    let photo = flows::set_primary_photo(&db, id)?;
    Ok(Json(photo.into()))
}
