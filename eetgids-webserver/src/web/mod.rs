use std::sync::Arc;

use eetgids_core::gateways::{
    human_verification::HumanVerificationGateway, notify::NotificationGateway,
    photo_source::PhotoSourceGateway,
};
use rocket::{config::Config as RocketCfg, Catcher, Rocket, Route};

pub mod api;
#[cfg(feature = "frontend")]
mod frontend;
mod guards;
pub mod jwt;
mod reference_data_cache;
mod sqlite;

#[cfg(test)]
pub mod tests;

use reference_data_cache::ReferenceDataCache;

#[derive(Clone)]
pub struct Cfg {
    /// Shared secret of the identity provider's HS256 access tokens.
    pub jwt_secret: String,
    /// Unauthenticated visitors are sent here by the HTML frontend.
    pub sign_in_url: Option<String>,
    /// Bearer token of the external import worker.
    pub worker_token: Option<String>,
    /// Public key of the human verification widget on HTML forms.
    pub human_verification_site_key: Option<String>,
}

pub(crate) struct InstanceOptions {
    mounts: Vec<(&'static str, Vec<Route>)>,
    catchers: Vec<(&'static str, Vec<Catcher>)>,
    rocket_cfg: Option<RocketCfg>,
    cfg: Cfg,
    version: &'static str,
}

pub(crate) struct Gateways {
    pub notify: Box<dyn NotificationGateway + Send + Sync>,
    pub human_verification: Box<dyn HumanVerificationGateway + Send + Sync>,
    pub photo_source: Box<dyn PhotoSourceGateway + Send + Sync>,
}

pub(crate) fn rocket_instance(
    options: InstanceOptions,
    db: sqlite::Connections,
    gateways: Gateways,
) -> anyhow::Result<Rocket<rocket::Build>> {
    let InstanceOptions {
        mounts,
        catchers,
        rocket_cfg,
        cfg,
        version,
    } = options;
    let Gateways {
        notify,
        human_verification,
        photo_source,
    } = gateways;

    info!("Caching cities and cuisines...");
    let reference_data = ReferenceDataCache::new_from_db(&db.shared()?)?;

    let jwt_state = jwt::JwtState::new(&cfg.jwt_secret);

    info!("Initialization finished");

    let r = match rocket_cfg {
        Some(cfg) => rocket::custom(cfg),
        None => rocket::build(),
    };

    let notify = guards::Notify(Arc::from(notify));
    let human_verification = guards::HumanVerification(Arc::from(human_verification));
    let photo_source = guards::PhotoSource(Arc::from(photo_source));
    let version = guards::Version(version);

    let mut instance = r
        .manage(db)
        .manage(reference_data)
        .manage(jwt_state)
        .manage(notify)
        .manage(human_verification)
        .manage(photo_source)
        .manage(cfg)
        .manage(version);

    for (m, r) in mounts {
        instance = instance.mount(m, r);
    }
    for (base, c) in catchers {
        instance = instance.register(base, c);
    }
    Ok(instance)
}

#[cfg(not(feature = "frontend"))]
fn mounts() -> Vec<(&'static str, Vec<Route>)> {
    vec![("/api", api::routes())]
}

#[cfg(feature = "frontend")]
fn mounts() -> Vec<(&'static str, Vec<Route>)> {
    vec![("/api", api::routes()), ("/", frontend::routes())]
}

#[cfg(not(feature = "frontend"))]
fn catchers() -> Vec<(&'static str, Vec<Catcher>)> {
    vec![("/", api::catchers())]
}

#[cfg(feature = "frontend")]
fn catchers() -> Vec<(&'static str, Vec<Catcher>)> {
    vec![("/api", api::catchers()), ("/", frontend::catchers())]
}

pub(crate) async fn run(
    db: sqlite::Connections,
    enable_cors: bool,
    cfg: Cfg,
    gateways: Gateways,
    version: &'static str,
) {
    let options = InstanceOptions {
        mounts: mounts(),
        catchers: catchers(),
        rocket_cfg: None,
        cfg,
        version,
    };
    let instance = match rocket_instance(options, db, gateways) {
        Ok(instance) => instance,
        Err(err) => {
            error!("Unable to initialize web server: {err}");
            return;
        }
    };
    let server_task = if enable_cors {
        match rocket_cors::CorsOptions::default().to_cors() {
            Ok(cors) => instance.attach(cors).launch(),
            Err(err) => {
                error!("Invalid CORS configuration: {err}");
                return;
            }
        }
    } else {
        instance.launch()
    };
    if let Err(err) = server_task.await {
        error!("Unable to run web server: {err}");
    }
}
