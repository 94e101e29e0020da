use thiserror::Error;

use tracker_domain::{ErrorKind, RepoError, ValidationError};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid API key")]
    Unauthorized,
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("anomaly not found")]
    NotFound,
    #[error("Anomaly already exists")]
    Conflict,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Unauthorized => ErrorKind::Auth,
            AppError::BadRequest(_) | AppError::Invalid(_) => ErrorKind::Validation,
            AppError::NotFound => ErrorKind::NotFound,
            AppError::Conflict => ErrorKind::Conflict,
            AppError::Internal(_) => ErrorKind::Store,
        }
    }
}

impl From<RepoError> for AppError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound => AppError::NotFound,
            RepoError::Duplicate => AppError::Conflict,
            err @ RepoError::Backend { .. } => AppError::Internal(anyhow::Error::new(err)),
        }
    }
}
