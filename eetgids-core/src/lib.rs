//! Business rules of the Eetgids restaurant directory.
//!
//! The use cases are generic over the repository traits and
//! never touch a concrete database or network client.

pub mod entities {
    pub use eetgids_entities::{
        ad::*, address::*, city::*, claim::*, contact::*, cuisine::*, email::*, favorite::*,
        geo::*, id::*, import_job::*, photo::*, price::*, rating::*, restaurant::*, review::*,
        time::*, url::*, user::*,
    };
}

pub mod db;
pub mod gateways;
pub mod repositories;
pub mod usecases;
pub mod util;

pub use repositories::Error as RepoError;
