use super::*;

#[post("/restaurants/<id>/favorite")]
pub fn post_toggle_favorite(
    db: sqlite::Connections,
    auth: Auth,
    id: &str,
) -> Result<json::FavoriteState> {
    let state = flows::toggle_favorite(&db, auth.user_id(), id)?;
    Ok(Json(state.into()))
}

#[get("/favorites")]
pub fn get_favorites(db: sqlite::Connections, account: Account) -> Result<Vec<json::Restaurant>> {
    let restaurants = usecases::favorite_restaurants(&db.shared()?, account.user_id())?;
    Ok(Json(restaurants.into_iter().map(Into::into).collect()))
}

#[get("/users/current")]
pub fn get_current_user(db: sqlite::Connections, account: Account) -> Result<json::User> {
    let user = db
        .shared()?
        .try_get_user(account.user_id().as_str())?
        .ok_or(RepoError::NotFound)?;
    Ok(Json(user.into()))
}

#[put("/users/<id>/role", format = "application/json", data = "<change>")]
pub fn put_user_role(
    db: sqlite::Connections,
    auth: Auth,
    id: &str,
    change: JsonResult<json::RoleChange>,
) -> Result<json::User> {
    let role = Role::from(change?.into_inner().role);
    let admin = require_admin(&db, &auth)?;
    let user = flows::change_user_role(&db, &admin.id, id, role)?;
    Ok(Json(user.into()))
}
