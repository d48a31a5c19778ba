#![recursion_limit = "256"]

#[macro_use]
extern crate log;

use eetgids_core::gateways::{
    human_verification::HumanVerificationGateway, notify::NotificationGateway,
    photo_source::PhotoSourceGateway,
};
use eetgids_db_sqlite::Connections;

mod adapters;
mod core;
mod web;

pub use web::Cfg;

pub async fn run(
    connections: Connections,
    enable_cors: bool,
    cfg: Cfg,
    notify_gw: Box<dyn NotificationGateway + Send + Sync>,
    human_verification_gw: Box<dyn HumanVerificationGateway + Send + Sync>,
    photo_source_gw: Box<dyn PhotoSourceGateway + Send + Sync>,
) {
    web::run(
        connections.into(),
        enable_cors,
        cfg,
        web::Gateways {
            notify: notify_gw,
            human_verification: human_verification_gw,
            photo_source: photo_source_gw,
        },
        env!("CARGO_PKG_VERSION"),
    )
    .await;
}
