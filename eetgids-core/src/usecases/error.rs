use crate::{gateways::human_verification::HumanVerificationError, repositories};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("The name is invalid")]
    Name,
    #[error("The review text is missing")]
    EmptyContent,
    #[error("The name of the guest is missing")]
    GuestName,
    #[error("Invalid email address")]
    Email,
    #[error("Invalid URL")]
    Url,
    #[error("Rating value out of range")]
    RatingValue,
    #[error("Invalid position")]
    InvalidPosition,
    #[error("Invalid limit")]
    InvalidLimit,
    #[error("Invalid price range")]
    PriceRange,
    #[error("Unknown city")]
    UnknownCity,
    #[error("Unknown cuisine")]
    UnknownCuisine,
    #[error("The message is missing")]
    EmptyMessage,
    #[error("Human verification is required")]
    MissingVerificationToken,
    #[error("Human verification failed")]
    HumanVerification,
    #[error("This is not allowed")]
    Forbidden,
    #[error("This is not allowed without auth")]
    Unauthorized,
    #[error("You have already claimed this restaurant")]
    AlreadyClaimed,
    #[error("The claim has already been reviewed")]
    ClaimNotPending,
    #[error("The import job cannot change from {from} to {to}")]
    InvalidJobTransition {
        from: &'static str,
        to: &'static str,
    },
    #[error("Invalid ad position")]
    AdPosition,
    #[error("The schedule ends before it starts")]
    EndBeforeStart,
    #[error(transparent)]
    Repo(#[from] repositories::Error),
}

impl From<eetgids_entities::url::ParseError> for Error {
    fn from(_: eetgids_entities::url::ParseError) -> Self {
        Self::Url
    }
}

impl From<eetgids_entities::email::EmailAddressParseError> for Error {
    fn from(_: eetgids_entities::email::EmailAddressParseError) -> Self {
        Self::Email
    }
}

impl From<eetgids_entities::geo::MapPointError> for Error {
    fn from(_: eetgids_entities::geo::MapPointError) -> Self {
        Self::InvalidPosition
    }
}

impl From<eetgids_entities::price::PriceRangeParseError> for Error {
    fn from(_: eetgids_entities::price::PriceRangeParseError) -> Self {
        Self::PriceRange
    }
}

impl From<HumanVerificationError> for Error {
    fn from(err: HumanVerificationError) -> Self {
        match err {
            HumanVerificationError::Rejected(codes) => {
                log::debug!("Human verification rejected: {codes:?}");
                Self::HumanVerification
            }
            HumanVerificationError::Other(err) => {
                log::warn!("Human verification unavailable: {err}");
                Self::HumanVerification
            }
        }
    }
}
