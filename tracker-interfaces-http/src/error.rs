use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use tracker_application::{AppError, AppState};
use tracker_domain::ErrorKind;

use crate::response::ApiResponse;

const INTERNAL_ERROR: &str = "Internal error";
const DECODE_ERROR: &str = "cannot parse body";

/// Decides how much of an error reaches the client. Debug mode shows the raw
/// text including wrapped store context; otherwise only client-facing kinds
/// keep their message.
pub fn sanitize(err: &AppError, debug: bool) -> String {
    if debug || err.kind().is_client_facing() {
        err.to_string()
    } else {
        INTERNAL_ERROR.to_string()
    }
}

pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Validation | ErrorKind::NotFound | ErrorKind::Conflict => {
            StatusCode::NOT_ACCEPTABLE
        }
        ErrorKind::Auth => StatusCode::UNAUTHORIZED,
        ErrorKind::Store => StatusCode::INTERNAL_SERVER_ERROR,
        ErrorKind::Method => StatusCode::METHOD_NOT_ALLOWED,
        ErrorKind::Decode => StatusCode::BAD_REQUEST,
    }
}

#[derive(Debug)]
pub enum HttpError {
    MethodNotAllowed(String),
    Decode,
    App { kind: ErrorKind, message: String },
}

impl HttpError {
    /// Converts an application failure, counting it and logging store failures
    /// with full detail before the message is sanitised.
    pub fn from_app(err: AppError, state: &AppState) -> Self {
        let kind = err.kind();
        state.metrics.record_failure(kind);
        if kind == ErrorKind::Store {
            error!("request failed: {}", err);
        }
        HttpError::App {
            kind,
            message: sanitize(&err, state.config.debug),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            HttpError::MethodNotAllowed(_) => ErrorKind::Method,
            HttpError::Decode => ErrorKind::Decode,
            HttpError::App { kind, .. } => *kind,
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = status_for(self.kind());
        let message = match self {
            HttpError::MethodNotAllowed(method) => format!("Unrecognized method: {}", method),
            HttpError::Decode => DECODE_ERROR.to_string(),
            HttpError::App { message, .. } => message,
        };
        (status, Json(ApiResponse::error(message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracker_domain::{RepoError, ValidationError};

    fn store_failure() -> AppError {
        let source = std::io::Error::new(std::io::ErrorKind::Other, "disk I/O error");
        AppError::from(RepoError::backend("failed saving anomaly, try again later", source))
    }

    #[test]
    fn store_errors_are_hidden_outside_debug() {
        assert_eq!(sanitize(&store_failure(), false), "Internal error");
        assert_eq!(
            sanitize(&store_failure(), true),
            "failed saving anomaly, try again later: disk I/O error"
        );
    }

    #[test]
    fn domain_errors_keep_their_message() {
        let err = AppError::from(ValidationError::InvalidType);
        assert_eq!(sanitize(&err, false), "invalid Type");
        assert_eq!(sanitize(&AppError::Conflict, false), "Anomaly already exists");
        assert_eq!(sanitize(&AppError::Unauthorized, false), "Invalid API key");
    }

    #[test]
    fn statuses_follow_error_kind() {
        assert_eq!(status_for(ErrorKind::Validation), StatusCode::NOT_ACCEPTABLE);
        assert_eq!(status_for(ErrorKind::Conflict), StatusCode::NOT_ACCEPTABLE);
        assert_eq!(status_for(ErrorKind::Auth), StatusCode::UNAUTHORIZED);
        assert_eq!(status_for(ErrorKind::Store), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            HttpError::MethodNotAllowed("PUT".to_string()).into_response().status(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(HttpError::Decode.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
