use crate::{entities::*, util::validate};

mod ads;
mod cities;
mod claims;
mod contact;
mod error;
mod favorites;
mod human_verification;
mod import_job;
mod listing_stats;
mod load_restaurant;
mod moderate_reviews;
mod nearby_restaurants;
mod photos;
mod query_restaurants;
mod refresh_photos;
mod register_restaurant;
mod submit_review;
mod users;


pub use self::{
    ads::*, cities::*, claims::*, contact::*, error::Error, favorites::*, human_verification::*,
    import_job::*, listing_stats::*, load_restaurant::*, moderate_reviews::*,
    nearby_restaurants::*, photos::*, query_restaurants::*, refresh_photos::*,
    register_restaurant::*, submit_review::*, users::*,
};

mod prelude {
    pub use super::error::Error;
    pub type Result<T> = std::result::Result<T, Error>;
    pub use crate::{db::*, entities::*, repositories::*, RepoError};
}

/// Parses an optional http(s) URL.
fn parse_web_url(url: Option<&str>) -> std::result::Result<Option<Url>, Error> {
    let Some(url) = url.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    let url: Url = url.parse()?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::Url);
    }
    Ok(Some(url))
}

/// Parses a mandatory, syntactically valid e-mail address.
fn parse_email(email: &str) -> std::result::Result<EmailAddress, Error> {
    let email = email.trim();
    if !validate::is_valid_email(email) {
        return Err(Error::Email);
    }
    Ok(email.parse()?)
}
