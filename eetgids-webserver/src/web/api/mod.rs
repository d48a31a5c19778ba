use std::{fmt::Display, result};

use eetgids_boundary::Error as JsonErrorResponse;
use rocket::serde::json::{Error as JsonError, Json};
use rocket::{
    self, catch, catchers, delete, get,
    http::{ContentType, Status},
    post, put,
    response::{self, Responder},
    routes, Catcher, Request, Route, State,
};

use super::guards::*;
use crate::{
    adapters::{
        self,
        json::{self, from_json, to_json},
    },
    core::{prelude::*, usecases},
    web::{reference_data_cache::ReferenceDataCache, sqlite, Cfg},
};
use eetgids_application::prelude as flows;
use eetgids_core::usecases::Error as ParameterError;

mod ads;
mod claims;
mod contact;
mod error;
mod export;
mod import;
mod photos;
mod reference;
pub mod restaurants;
mod reviews;
mod users;
mod util;

pub use self::error::{business_error_status, Error as ApiError, RepoError};

#[cfg(test)]
pub mod tests;

type Result<T> = result::Result<Json<T>, ApiError>;
type JsonResult<'a, T> = result::Result<Json<T>, JsonError<'a>>;
type StatusResult = result::Result<Status, ApiError>;

pub fn routes() -> Vec<Route> {
    routes![
        // ---   restaurants   --- //
        restaurants::get_restaurants,
        restaurants::get_nearby_restaurants,
        restaurants::get_listing_stats,
        restaurants::get_restaurant_locations,
        restaurants::get_restaurant_details,
        restaurants::post_restaurant,
        // ---   reference data   --- //
        reference::get_cities,
        reference::get_city,
        reference::get_provinces,
        reference::get_cuisines,
        reference::get_cuisine,
        // ---   reviews   --- //
        reviews::post_review,
        reviews::get_pending_reviews,
        reviews::post_approve_review,
        reviews::post_reject_review,
        // ---   favorites   --- //
        users::post_toggle_favorite,
        users::get_favorites,
        // ---   claims   --- //
        claims::post_claim,
        claims::get_claims,
        claims::post_approve_claim,
        claims::post_reject_claim,
        // ---   photos   --- //
        photos::post_photo,
        photos::get_pending_photos,
        photos::post_approve_photo,
        photos::post_reject_photo,
        photos::post_primary_photo,
        // ---   import   --- //
        import::post_import_job,
        import::put_import_job_progress,
        import::post_photo_refresh,
        // ---   ads   --- //
        ads::get_ads,
        ads::post_ad,
        ads::put_ad,
        ads::delete_ad,
        // ---   misc   --- //
        contact::post_contact,
        users::put_user_role,
        users::get_current_user,
        export::csv_export,
        util::get_version,
    ]
}

pub fn catchers() -> Vec<Catcher> {
    catchers![not_found, unprocessable_entity, default_catcher]
}

fn error_body(status: Status, message: String) -> (Status, Json<JsonErrorResponse>) {
    let body = JsonErrorResponse {
        http_status: status.code,
        message,
    };
    (status, Json(body))
}

#[catch(404)]
fn not_found(req: &Request) -> (Status, Json<JsonErrorResponse>) {
    error_body(
        Status::NotFound,
        format!("No such resource: {}", req.uri().path()),
    )
}

#[catch(422)]
fn unprocessable_entity() -> (Status, Json<JsonErrorResponse>) {
    error_body(
        Status::UnprocessableEntity,
        "The request body could not be parsed".into(),
    )
}

#[catch(default)]
fn default_catcher(status: Status, _: &Request) -> (Status, Json<JsonErrorResponse>) {
    error_body(status, status.reason_lossy().to_owned())
}

fn json_error_response<'r, 'o: 'r, E: Display>(
    req: &'r rocket::Request<'_>,
    err: &E,
    status: Status,
) -> response::Result<'o> {
    let message = err.to_string();
    let boundary_error = JsonErrorResponse {
        http_status: status.code,
        message,
    };
    Json(boundary_error).respond_to(req).map(|mut res| {
        res.set_status(status);
        res
    })
}

/// Runs a flow that talks to external services on the blocking pool.
pub(crate) async fn run_blocking<T, F>(f: F) -> result::Result<T, ApiError>
where
    F: FnOnce() -> result::Result<T, AppError> + Send + 'static,
    T: Send + 'static,
{
    Ok(rocket::tokio::task::spawn_blocking(f).await??)
}

/// Only admins may pass.
pub(crate) fn require_admin(db: &sqlite::Connections, auth: &Auth) -> result::Result<User, ApiError> {
    Ok(auth.user_with_min_role(&db.shared()?, Role::Admin)?)
}
