use super::*;

#[get("/ads?<position>")]
pub fn get_ads(db: sqlite::Connections, position: Option<&str>) -> Result<Vec<json::Ad>> {
    let position = position
        .map(|p| p.parse::<AdPosition>().map_err(|_| ParameterError::AdPosition))
        .transpose()?;
    let ads = usecases::active_ads(&db.shared()?, position, Timestamp::now())?;
    Ok(Json(ads.into_iter().map(Into::into).collect()))
}

#[post("/ads", format = "application/json", data = "<ad>")]
pub fn post_ad(
    db: sqlite::Connections,
    auth: Auth,
    ad: JsonResult<json::NewAd>,
) -> Result<json::Ad> {
    let new_ad = from_json::new_ad(ad?.into_inner());
    require_admin(&db, &auth)?;
    let ad = usecases::create_ad(&db.exclusive()?, new_ad)?;
    Ok(Json(ad.into()))
}

#[put("/ads/<id>", format = "application/json", data = "<ad>")]
pub fn put_ad(
    db: sqlite::Connections,
    auth: Auth,
    id: &str,
    ad: JsonResult<json::NewAd>,
) -> Result<json::Ad> {
    let new_ad = from_json::new_ad(ad?.into_inner());
    require_admin(&db, &auth)?;
    let ad = usecases::update_ad(&db.exclusive()?, id, new_ad)?;
    Ok(Json(ad.into()))
}

#[delete("/ads/<id>")]
pub fn delete_ad(db: sqlite::Connections, auth: Auth, id: &str) -> StatusResult {
    require_admin(&db, &auth)?;
    usecases::delete_ad(&db.exclusive()?, id)?;
    Ok(Status::NoContent)
}
