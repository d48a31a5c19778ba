#![deny(missing_debug_implementations)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # eetgids-entities
//!
//! Reusable, agnostic domain entities of the Eetgids restaurant directory.
//!
//! The entities only contain generic functionality that does not reveal any
//! application-specific business logic.

pub mod ad;
pub mod address;
pub mod city;
pub mod claim;
pub mod contact;
pub mod cuisine;
pub mod email;
pub mod favorite;
pub mod geo;
pub mod id;
pub mod import_job;
pub mod photo;
pub mod price;
pub mod rating;
pub mod restaurant;
pub mod review;
pub mod time;
pub mod user;
pub mod url {
    pub use url::{ParseError, Url};
}

#[cfg(any(test, feature = "builders"))]
pub mod builders;
