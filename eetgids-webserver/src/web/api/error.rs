use super::json_error_response;
use anyhow::anyhow;
use eetgids_application::error::{AppError, BError};
pub use eetgids_core::{repositories::Error as RepoError, usecases::Error as ParameterError};
use rocket::{
    self,
    http::Status,
    response::{self, Responder},
    serde::json::Error as JsonError,
};
use std::{io, string};
use thiserror::Error;

use crate::adapters::json::from_json::UnknownValue;

#[derive(Debug, Error)]
#[allow(clippy::large_enum_variant)]
pub enum Error {
    #[error(transparent)]
    App(#[from] AppError),
    #[error("{0}")]
    OtherWithStatus(#[source] anyhow::Error, Status),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

fn repo_error_status(err: &RepoError) -> Option<Status> {
    match err {
        RepoError::NotFound => Some(Status::NotFound),
        RepoError::AlreadyExists => Some(Status::Conflict),
        RepoError::Other(_) => None,
    }
}

fn parameter_error_status(err: &ParameterError) -> Option<Status> {
    let status = match err {
        ParameterError::Unauthorized => Status::Unauthorized,
        ParameterError::Forbidden => Status::Forbidden,
        ParameterError::AlreadyClaimed
        | ParameterError::ClaimNotPending
        | ParameterError::InvalidJobTransition { .. } => Status::Conflict,
        ParameterError::Repo(err) => return repo_error_status(err),
        _ => Status::BadRequest,
    };
    Some(status)
}

/// The status of errors that are caused by the request.
pub fn business_error_status(err: &BError) -> Option<Status> {
    match err {
        BError::Parameter(err) => parameter_error_status(err),
        BError::Repo(err) => repo_error_status(err),
    }
}

impl Error {
    /// The status that is sent to the client.
    pub fn status(&self) -> Status {
        match self {
            Self::App(err) => err
                .business()
                .and_then(business_error_status)
                .unwrap_or(Status::InternalServerError),
            Self::OtherWithStatus(_, status) => *status,
            Self::Other(_) => Status::InternalServerError,
        }
    }
}

impl From<JsonError<'_>> for Error {
    fn from(err: JsonError) -> Self {
        match err {
            JsonError::Io(err) => Self::OtherWithStatus(anyhow!(err), Status::UnprocessableEntity),
            JsonError::Parse(_, err) => {
                Self::OtherWithStatus(anyhow!(err), Status::UnprocessableEntity)
            }
        }
    }
}

impl From<string::FromUtf8Error> for Error {
    fn from(err: string::FromUtf8Error) -> Self {
        Self::Other(anyhow!(err))
    }
}

impl<T: io::Write> From<csv::IntoInnerError<csv::Writer<T>>> for Error {
    fn from(err: csv::IntoInnerError<csv::Writer<T>>) -> Self {
        Self::Other(anyhow!("{err}"))
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self::Other(anyhow!(err))
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Self::Other(anyhow!(err))
    }
}

impl From<rocket::tokio::task::JoinError> for Error {
    fn from(err: rocket::tokio::task::JoinError) -> Self {
        Self::Other(anyhow!("Blocking task failed: {err}"))
    }
}

impl From<UnknownValue> for Error {
    fn from(err: UnknownValue) -> Self {
        Self::OtherWithStatus(err.into(), Status::BadRequest)
    }
}

impl From<eetgids_entities::price::PriceRangeParseError> for Error {
    fn from(err: eetgids_entities::price::PriceRangeParseError) -> Self {
        Self::OtherWithStatus(err.into(), Status::BadRequest)
    }
}

impl From<eetgids_core::usecases::UnknownImportAction> for Error {
    fn from(err: eetgids_core::usecases::UnknownImportAction) -> Self {
        Self::OtherWithStatus(err.into(), Status::BadRequest)
    }
}

impl<'r, 'o: 'r> Responder<'r, 'o> for Error {
    fn respond_to(self, req: &rocket::Request) -> response::Result<'o> {
        match self {
            Error::App(err) => {
                if let Some(status) = err.business().and_then(business_error_status) {
                    if status == Status::BadRequest {
                        debug!("Invalid request: {err}");
                    }
                    return json_error_response(req, &err, status);
                }
                error!("Error: {err}");
                json_error_response(req, &"Internal server error", Status::InternalServerError)
            }
            Error::OtherWithStatus(err, status) => json_error_response(req, &err, status),
            Error::Other(err) => {
                error!("Error: {err}");
                json_error_response(req, &"Internal server error", Status::InternalServerError)
            }
        }
    }
}

impl From<RepoError> for Error {
    fn from(err: RepoError) -> Self {
        AppError::from(err).into()
    }
}

impl From<BError> for Error {
    fn from(err: BError) -> Self {
        AppError::from(err).into()
    }
}

impl From<ParameterError> for Error {
    fn from(err: ParameterError) -> Self {
        Self::App(err.into())
    }
}
