//! Application flows of the Eetgids restaurant directory.
//!
//! A flow wires one or more use cases to a database transaction
//! and triggers the side effects after the data has been committed.

#[macro_use]
extern crate log;

mod claims;
mod contact;
mod favorites;
mod import_job;
mod photos;
mod refresh_photos;
mod register_restaurant;
mod reviews;
mod users;

pub mod prelude {
    pub use super::{
        claims::*, contact::*, favorites::*, import_job::*, photos::*, refresh_photos::*,
        register_restaurant::*, reviews::*, users::*,
    };
}

pub mod error;

pub type Result<T> = std::result::Result<T, error::AppError>;

pub(crate) use eetgids_core::{
    db::*,
    entities::*,
    gateways::{
        human_verification::HumanVerificationGateway,
        notify::{NotificationEvent, NotificationGateway},
        photo_source::PhotoSourceGateway,
    },
    repositories::*,
    usecases,
};

#[cfg(test)]
pub(crate) mod tests;

pub(crate) mod sqlite {
    pub use eetgids_db_sqlite::Connections;
}
