use std::result;

use maud::Markup;
use rocket::{
    self, catch, catchers,
    form::Form,
    get,
    http::Status,
    post,
    request::FlashMessage,
    response::{
        content::{RawCss, RawJavaScript},
        Flash, Redirect,
    },
    routes, uri, Catcher, FromForm, Request, Responder, Route, State,
};

use crate::{
    core::{prelude::*, usecases},
    web::{
        api::{self, restaurants::ListingQuery, run_blocking, ApiError, RepoError},
        guards::*,
        reference_data_cache::ReferenceDataCache,
        sqlite, Cfg,
    },
};
use eetgids_application::prelude as flows;
use eetgids_core::usecases::Error as ParameterError;

mod admin;
mod view;

#[cfg(test)]
mod tests;

const MAIN_CSS: &str = include_str!("main.css");
const NEARBY_JS: &str = include_str!("nearby.js");
const ADMIN_JS: &str = include_str!("admin.js");

const TOP_RATED_LIMIT: u64 = 6;

/// Restaurants with fewer approved reviews are not
/// listed among the best ones.
const BEST_RESTAURANTS_MIN_REVIEWS: u32 = 5;

#[derive(Responder)]
#[allow(clippy::large_enum_variant)]
pub enum PageError {
    #[response(status = 404)]
    NotFound(Markup),
    #[response(status = 400)]
    BadRequest(Markup),
    Redirect(Redirect),
    Api(ApiError),
}

impl From<ApiError> for PageError {
    fn from(err: ApiError) -> Self {
        let status = err.status();
        if status == Status::NotFound {
            Self::NotFound(view::not_found(
                &view::Viewer::default(),
                "De pagina die je zoekt bestaat niet (meer).",
            ))
        } else if status == Status::BadRequest {
            debug!("Invalid page request: {err}");
            Self::BadRequest(view::bad_request(&view::Viewer::default(), &err.to_string()))
        } else {
            Self::Api(err)
        }
    }
}

macro_rules! page_error_from {
    ($($from:ty),*) => {
        $(
            impl From<$from> for PageError {
                fn from(err: $from) -> Self {
                    ApiError::from(err).into()
                }
            }
        )*
    };
}

page_error_from!(AppError, RepoError, ParameterError, anyhow::Error);

type Page = result::Result<Markup, PageError>;
type FormResult = result::Result<Flash<Redirect>, PageError>;

fn viewer<'a, R: UserRepo>(repo: &R, auth: &Auth, cfg: &'a Cfg) -> result::Result<view::Viewer<'a>, PageError> {
    let user = match auth.user_id() {
        Some(id) => repo.try_get_user(id.as_str())?,
        None => None,
    };
    Ok(view::Viewer {
        user,
        sign_in_url: cfg.sign_in_url.as_deref(),
    })
}

fn sign_in_redirect(cfg: &Cfg) -> PageError {
    PageError::Redirect(Redirect::to(
        cfg.sign_in_url.clone().unwrap_or_else(|| "/".to_owned()),
    ))
}

fn restaurant_id(db: &sqlite::Connections, city: &str, slug: &str) -> result::Result<Id, PageError> {
    let db = db.shared()?;
    let city = db.get_city_by_slug(city)?;
    Ok(db.get_restaurant_by_slug(city.id.as_str(), slug)?.restaurant.id)
}

/// Client errors are shown to the visitor on the target page.
fn form_error(err: ApiError, target: String) -> FormResult {
    if err.status().code < 500 {
        debug!("Rejected form submission: {err}");
        Ok(Flash::error(Redirect::to(target), view::error_message(&err)))
    } else {
        Err(err.into())
    }
}

#[get("/")]
pub fn get_index(
    db: sqlite::Connections,
    cache: &State<ReferenceDataCache>,
    cfg: &State<Cfg>,
    auth: Auth,
) -> Page {
    let db = db.shared()?;
    let reference = cache.get_or_load(&db)?;
    let filter = usecases::RestaurantFilter {
        limit: Some(TOP_RATED_LIMIT),
        ..Default::default()
    };
    let top_rated = usecases::query_restaurants(&db, &filter)?;
    let banners = usecases::active_ads(&db, Some(AdPosition::Banner), Timestamp::now())?;
    let viewer = viewer(&db, &auth, cfg)?;
    Ok(view::index(
        &viewer,
        &reference.provinces(),
        &reference.cuisines,
        &top_rated.restaurants,
        &banners,
    ))
}

#[get("/main.css")]
pub fn get_main_css() -> RawCss<&'static str> {
    RawCss(MAIN_CSS)
}

#[get("/nearby.js")]
pub fn get_nearby_js() -> RawJavaScript<&'static str> {
    RawJavaScript(NEARBY_JS)
}

#[get("/admin.js")]
pub fn get_admin_js() -> RawJavaScript<&'static str> {
    RawJavaScript(ADMIN_JS)
}

#[get("/<city>?<query..>")]
pub fn get_city(
    db: sqlite::Connections,
    cache: &State<ReferenceDataCache>,
    cfg: &State<Cfg>,
    auth: Auth,
    city: &str,
    query: ListingQuery,
) -> Page {
    let db = db.shared()?;
    let reference = cache.get_or_load(&db)?;
    let viewer = viewer(&db, &auth, cfg)?;
    let Some(city) = reference.city(city) else {
        return Err(PageError::NotFound(view::not_found(
            &viewer,
            "Deze stad staat (nog) niet in onze gids.",
        )));
    };
    let filter = usecases::RestaurantFilter {
        city_slug: Some(city.slug.clone()),
        ..query.clone().into_filter()?
    };
    let listing = usecases::query_restaurants(&db, &filter)?;
    let stats = usecases::listing_stats(&db, &filter)?;
    let ads = usecases::active_ads(&db, Some(AdPosition::Sidebar), Timestamp::now())?;
    Ok(view::city(
        &viewer,
        view::CityListing {
            city,
            cuisines: &reference.cuisines,
            query: &query,
            listing: &listing,
            stats: &stats,
            ads: &ads,
        },
    ))
}

#[get("/<city>/<restaurant>")]
pub fn get_restaurant(
    db: sqlite::Connections,
    cfg: &State<Cfg>,
    auth: Auth,
    flash: Option<FlashMessage<'_>>,
    city: &str,
    restaurant: &str,
) -> Page {
    let db = db.shared()?;
    let viewer = viewer(&db, &auth, cfg)?;
    let details = match usecases::load_restaurant_details(&db, city, restaurant) {
        Ok(details) => details,
        Err(ParameterError::Repo(RepoError::NotFound)) => {
            return Err(PageError::NotFound(view::not_found(
                &viewer,
                "Dit restaurant konden we niet vinden.",
            )));
        }
        Err(err) => return Err(err.into()),
    };
    let is_favorite = match auth.user_id() {
        Some(user_id) => {
            db.is_favorite(user_id.as_str(), details.restaurant.restaurant.id.as_str())?
        }
        None => false,
    };
    Ok(view::restaurant(
        &viewer,
        flash,
        &details,
        is_favorite,
        cfg.human_verification_site_key.as_deref(),
    ))
}

#[derive(FromForm)]
pub struct ReviewForm {
    rating: i64,
    title: Option<String>,
    content: String,
    guest_name: Option<String>,
    guest_email: Option<String>,
    verification_token: Option<String>,
}

#[post("/<city>/<restaurant>/reviews", data = "<review>", rank = 2)]
pub async fn post_review(
    db: sqlite::Connections,
    verification: &State<HumanVerification>,
    notify: &State<Notify>,
    auth: Auth,
    city: &str,
    restaurant: &str,
    review: Form<ReviewForm>,
) -> FormResult {
    let id = restaurant_id(&db, city, restaurant)?;
    let ReviewForm {
        rating,
        title,
        content,
        guest_name,
        guest_email,
        verification_token,
    } = review.into_inner();
    let new_review = usecases::NewReview {
        restaurant_id: id.into(),
        rating,
        title,
        content,
        guest_name,
        guest_email,
    };
    let verification = verification.inner().clone();
    let notify = notify.inner().clone();
    let user_id = auth.user_id().cloned();
    let remote_ip = auth.remote_ip();
    let result = run_blocking(move || {
        flows::submit_review(
            &db,
            &*verification,
            &*notify,
            new_review,
            user_id.as_ref(),
            verification_token.as_deref(),
            remote_ip.as_deref(),
        )
    })
    .await;
    let target = uri!(get_restaurant(city, restaurant)).to_string();
    match result {
        Ok(_) => Ok(Flash::success(
            Redirect::to(target),
            "Bedankt voor je review! Na controle verschijnt hij op deze pagina.",
        )),
        Err(err) => form_error(err, target),
    }
}

#[post("/<city>/<restaurant>/favorite", rank = 2)]
pub fn post_favorite(
    db: sqlite::Connections,
    cfg: &State<Cfg>,
    auth: Auth,
    city: &str,
    restaurant: &str,
) -> FormResult {
    if auth.user_id().is_none() {
        return Err(sign_in_redirect(cfg));
    }
    let id = restaurant_id(&db, city, restaurant)?;
    let state = flows::toggle_favorite(&db, auth.user_id(), id.as_str())?;
    let message = if state.is_favorite() {
        "Toegevoegd aan je favorieten."
    } else {
        "Verwijderd uit je favorieten."
    };
    Ok(Flash::success(
        Redirect::to(uri!(get_restaurant(city, restaurant))),
        message,
    ))
}

#[get("/keukens/<cuisine>?<page>")]
pub fn get_cuisine(
    db: sqlite::Connections,
    cache: &State<ReferenceDataCache>,
    cfg: &State<Cfg>,
    auth: Auth,
    cuisine: &str,
    page: Option<u64>,
) -> Page {
    let db = db.shared()?;
    let reference = cache.get_or_load(&db)?;
    let viewer = viewer(&db, &auth, cfg)?;
    let Some(cuisine) = reference.cuisine(cuisine) else {
        return Err(PageError::NotFound(view::not_found(
            &viewer,
            "Deze keuken kennen we niet.",
        )));
    };
    let filter = usecases::RestaurantFilter {
        cuisine_slug: Some(cuisine.slug.clone()),
        page,
        ..Default::default()
    };
    let listing = usecases::query_restaurants(&db, &filter)?;
    Ok(view::cuisine(&viewer, cuisine, &reference.cities, &listing))
}

#[get("/beste-restaurants?<page>")]
pub fn get_best_restaurants(
    db: sqlite::Connections,
    cfg: &State<Cfg>,
    auth: Auth,
    page: Option<u64>,
) -> Page {
    let db = db.shared()?;
    let filter = usecases::RestaurantFilter {
        min_reviews: Some(BEST_RESTAURANTS_MIN_REVIEWS),
        sort_by: Some(SortBy::Rating),
        sort_order: Some(SortOrder::Desc),
        page,
        ..Default::default()
    };
    let listing = usecases::query_restaurants(&db, &filter)?;
    let viewer = viewer(&db, &auth, cfg)?;
    Ok(view::best_restaurants(
        &viewer,
        &listing,
        BEST_RESTAURANTS_MIN_REVIEWS,
    ))
}

#[get("/in-de-buurt?<lat>&<lng>")]
pub fn get_nearby(
    db: sqlite::Connections,
    cfg: &State<Cfg>,
    auth: Auth,
    lat: Option<f64>,
    lng: Option<f64>,
) -> Page {
    let db = db.shared()?;
    let nearby = usecases::nearby_restaurants(&db, lat, lng, None)?;
    let viewer = viewer(&db, &auth, cfg)?;
    let origin = lat.zip(lng);
    Ok(view::nearby(&viewer, origin, &nearby))
}

#[get("/claimen/<city>/<restaurant>")]
pub fn get_claim(
    db: sqlite::Connections,
    cfg: &State<Cfg>,
    auth: Auth,
    flash: Option<FlashMessage<'_>>,
    city: &str,
    restaurant: &str,
) -> Page {
    let db = db.shared()?;
    let viewer = viewer(&db, &auth, cfg)?;
    let restaurant = db
        .get_city_by_slug(city)
        .and_then(|city| db.get_restaurant_by_slug(city.id.as_str(), restaurant));
    let restaurant = match restaurant {
        Ok(restaurant) => restaurant,
        Err(RepoError::NotFound) => {
            return Err(PageError::NotFound(view::not_found(
                &viewer,
                "Dit restaurant konden we niet vinden.",
            )));
        }
        Err(err) => return Err(err.into()),
    };
    Ok(view::claim(
        &viewer,
        flash,
        &restaurant,
        cfg.human_verification_site_key.as_deref(),
    ))
}

#[derive(FromForm)]
pub struct ClaimForm {
    business_email: String,
    phone: Option<String>,
    message: Option<String>,
    verification_token: Option<String>,
}

#[post("/claimen/<city>/<restaurant>", data = "<claim>")]
pub async fn post_claim(
    db: sqlite::Connections,
    verification: &State<HumanVerification>,
    notify: &State<Notify>,
    cfg: &State<Cfg>,
    auth: Auth,
    city: &str,
    restaurant: &str,
    claim: Form<ClaimForm>,
) -> FormResult {
    let Some(user_id) = auth.user_id().cloned() else {
        return Err(sign_in_redirect(cfg));
    };
    let id = restaurant_id(&db, city, restaurant)?;
    let ClaimForm {
        business_email,
        phone,
        message,
        verification_token,
    } = claim.into_inner();
    let new_claim = usecases::NewClaim {
        restaurant_id: id.into(),
        business_email,
        phone,
        message,
    };
    let verification = verification.inner().clone();
    let notify = notify.inner().clone();
    let remote_ip = auth.remote_ip();
    let result = run_blocking(move || {
        flows::submit_claim(
            &db,
            &*verification,
            &*notify,
            Some(&user_id),
            new_claim,
            verification_token.as_deref(),
            remote_ip.as_deref(),
        )
    })
    .await;
    match result {
        Ok(_) => Ok(Flash::success(
            Redirect::to(uri!(get_restaurant(city, restaurant))),
            "Je claim is ontvangen. We nemen zo snel mogelijk contact met je op.",
        )),
        Err(err) => form_error(err, uri!(get_claim(city, restaurant)).to_string()),
    }
}

pub fn routes() -> Vec<Route> {
    routes![
        get_index,
        get_main_css,
        get_nearby_js,
        get_admin_js,
        get_city,
        get_restaurant,
        post_review,
        post_favorite,
        get_cuisine,
        get_best_restaurants,
        get_nearby,
        get_claim,
        post_claim,
        admin::get_dashboard,
        admin::get_reviews,
        admin::post_approve_review,
        admin::post_reject_review,
        admin::get_claims,
        admin::post_approve_claim,
        admin::post_reject_claim,
        admin::get_photos,
        admin::post_approve_photo,
        admin::post_reject_photo,
        admin::post_primary_photo,
        admin::get_import,
        admin::post_start_import,
    ]
}

pub fn catchers() -> Vec<Catcher> {
    catchers![not_found]
}

#[catch(404)]
fn not_found(req: &Request) -> (Status, Markup) {
    debug!("No page at {}", req.uri().path());
    (
        Status::NotFound,
        view::not_found(
            &view::Viewer::default(),
            "De pagina die je zoekt bestaat niet (meer).",
        ),
    )
}
