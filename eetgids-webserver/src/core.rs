pub use eetgids_core::{db, gateways, repositories, usecases};

pub mod entities {
    pub use eetgids_core::entities::*;
    #[cfg(test)]
    pub use eetgids_entities::builders::*;
}

pub mod prelude {

    use std::result;

    pub use eetgids_application::error::*;

    pub use super::{db::*, entities::*, repositories::*};

    pub type Result<T> = result::Result<T, eetgids_application::error::AppError>;
}
