use eetgids_core::{repositories::Error as RepoError, usecases::Error as ParameterError};
use thiserror::Error;

pub use eetgids_core::repositories;

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> AppError {
        AppError::Business(BError::Repo(err))
    }
}

impl From<ParameterError> for AppError {
    fn from(err: ParameterError) -> AppError {
        AppError::Business(err.into())
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Business(#[from] BError),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[derive(Debug, Error)]
pub enum BError {
    #[error(transparent)]
    Parameter(#[from] ParameterError),
    #[error(transparent)]
    Repo(#[from] repositories::Error),
}

impl AppError {
    /// The use case error, if any.
    ///
    /// Repository errors that were wrapped by a use case are
    /// returned as [`BError::Repo`].
    pub fn business(&self) -> Option<&BError> {
        match self {
            Self::Business(err) => Some(err),
            Self::Other(_) => None,
        }
    }
}
