// Domain error taxonomy

use thiserror::Error;

/// Discriminant used to classify failures. Callers switch on this, never on message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Auth,
    NotFound,
    Conflict,
    Store,
    Method,
    Decode,
}

impl ErrorKind {
    /// Whether the error's own message is safe to show to a client.
    pub fn is_client_facing(self) -> bool {
        !matches!(self, ErrorKind::Store)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing ID")]
    MissingId,
    #[error("invalid ID")]
    InvalidId,
    #[error("missing System")]
    MissingSystem,
    #[error("missing Type")]
    MissingType,
    #[error("invalid Type")]
    InvalidType,
    #[error("missing Name")]
    MissingName,
    #[error("cannot update System")]
    SystemImmutable,
    #[error("must specify fields to update")]
    NoFieldsToUpdate,
}

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("anomaly not found")]
    NotFound,
    #[error("Anomaly already exists")]
    Duplicate,
    #[error("{context}: {source}")]
    Backend {
        context: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}

impl RepoError {
    pub fn backend<E>(context: &'static str, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        RepoError::Backend {
            context,
            source: Box::new(source),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            RepoError::NotFound => ErrorKind::NotFound,
            RepoError::Duplicate => ErrorKind::Conflict,
            RepoError::Backend { .. } => ErrorKind::Store,
        }
    }
}
