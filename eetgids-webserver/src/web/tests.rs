use rocket::{config::Config as RocketCfg, local::blocking::Client, Catcher, Route};

use crate::{
    core::{
        entities::*,
        gateways::{
            human_verification::{HumanVerificationError, HumanVerificationGateway},
            notify::{NotificationEvent, NotificationGateway},
            photo_source::PhotoSourceGateway,
        },
        prelude::*,
    },
    web::{jwt::JwtState, reference_data_cache::ReferenceDataCache, sqlite, Cfg},
};

pub mod prelude {

    pub const DUMMY_VERSION: &str = "1.2.3";
    pub const JWT_SECRET: &str = "not-so-secret";
    pub const WORKER_TOKEN: &str = "worker-token";
    pub const VALID_TOKEN: &str = "i-am-human";

    pub use rocket::{
        http::{ContentType, Cookie, Header, Status},
        local::blocking::{Client, LocalResponse},
    };

    pub use super::{
        access_token, bearer, create_city, create_cuisine, create_restaurant, default_cfg,
        reload_reference_data, rocket_test_setup, rocket_test_setup_with_cfg, set_role,
        DummyNotifyGW, FakePhotoSource, FakeVerification,
    };

    pub use crate::core::db::*;
}

use self::prelude::*;

pub struct DummyNotifyGW;

impl NotificationGateway for DummyNotifyGW {
    fn notify(&self, _: NotificationEvent) {}
}

pub struct FakeVerification;

impl HumanVerificationGateway for FakeVerification {
    fn verify(&self, token: &str, _: Option<&str>) -> std::result::Result<(), HumanVerificationError> {
        if token == VALID_TOKEN {
            Ok(())
        } else {
            Err(HumanVerificationError::Rejected(vec![
                "invalid-input-response".into(),
            ]))
        }
    }
}

/// Finds exactly one photo per restaurant.
pub struct FakePhotoSource;

impl PhotoSourceGateway for FakePhotoSource {
    fn find_photos(&self, restaurant: &Restaurant) -> anyhow::Result<Vec<Url>> {
        let url = format!("https://photos.example.com/{}.jpg", restaurant.slug).parse()?;
        Ok(vec![url])
    }
}

pub fn default_cfg() -> Cfg {
    Cfg {
        jwt_secret: JWT_SECRET.into(),
        sign_in_url: Some("https://login.example.com".into()),
        worker_token: Some(WORKER_TOKEN.into()),
        human_verification_site_key: None,
    }
}

pub fn rocket_test_setup(
    mounts: Vec<(&'static str, Vec<Route>)>,
    catchers: Vec<(&'static str, Vec<Catcher>)>,
) -> (Client, sqlite::Connections) {
    rocket_test_setup_with_cfg(mounts, catchers, default_cfg())
}

pub fn rocket_test_setup_with_cfg(
    mounts: Vec<(&'static str, Vec<Route>)>,
    catchers: Vec<(&'static str, Vec<Catcher>)>,
    cfg: Cfg,
) -> (Client, sqlite::Connections) {
    let _ = env_logger::builder().is_test(true).try_init();
    let connections = eetgids_db_sqlite::Connections::init(":memory:", 1).unwrap();
    eetgids_db_sqlite::run_embedded_database_migrations(connections.exclusive().unwrap())
        .unwrap();
    let db = sqlite::Connections::from(connections);
    let options = super::InstanceOptions {
        mounts,
        catchers,
        rocket_cfg: Some(RocketCfg::debug_default()),
        cfg,
        version: DUMMY_VERSION,
    };
    let gateways = super::Gateways {
        notify: Box::new(DummyNotifyGW),
        human_verification: Box::new(FakeVerification),
        photo_source: Box::new(FakePhotoSource),
    };
    let rocket = super::rocket_instance(options, db.clone(), gateways).unwrap();
    let client = Client::tracked(rocket).unwrap();
    (client, db)
}

/// Cities and cuisines created after start-up only become
/// visible after the cache has been invalidated.
pub fn reload_reference_data(client: &Client) {
    client
        .rocket()
        .state::<ReferenceDataCache>()
        .unwrap()
        .invalidate();
}

pub fn access_token(user_id: &str, email: &str) -> String {
    JwtState::new(JWT_SECRET)
        .generate_token(user_id, email, time::Duration::hours(1))
        .unwrap()
}

pub fn bearer(user_id: &str, email: &str) -> Header<'static> {
    Header::new(
        "Authorization",
        format!("Bearer {}", access_token(user_id, email)),
    )
}

pub fn set_role(db: &sqlite::Connections, user_id: &str, email: &str, role: Role) {
    let db = db.exclusive().unwrap();
    let user = User {
        id: user_id.into(),
        email: email.parse().unwrap(),
        role,
    };
    match db.try_get_user(user_id).unwrap() {
        Some(_) => db.update_user(&user).unwrap(),
        None => db.create_user(&user).unwrap(),
    }
}

pub fn create_city(db: &sqlite::Connections, name: &str, slug: &str, province: &str) -> City {
    let city = City::build()
        .name(name)
        .slug(slug)
        .province(province)
        .finish();
    db.exclusive().unwrap().create_city(&city).unwrap();
    city
}

pub fn create_cuisine(db: &sqlite::Connections, name: &str, slug: &str) -> CuisineType {
    let cuisine = CuisineType::build().name(name).slug(slug).finish();
    db.exclusive().unwrap().create_cuisine(&cuisine).unwrap();
    cuisine
}

pub fn create_restaurant(
    db: &sqlite::Connections,
    city: &City,
    restaurant: Restaurant,
    cuisines: &[&CuisineType],
) -> Restaurant {
    let restaurant = Restaurant {
        city_id: Some(city.id.clone()),
        ..restaurant
    };
    let cuisine_ids: Vec<_> = cuisines.iter().map(|c| c.id.clone()).collect();
    db.exclusive()
        .unwrap()
        .create_restaurant(&restaurant, &cuisine_ids)
        .unwrap();
    restaurant
}
