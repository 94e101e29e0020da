use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use tracing::warn;

use tracker_application::commands::anomaly_commands;
use tracker_application::queries::anomaly_queries;
use tracker_application::AppState;
use tracker_domain::{ApiKey, ErrorKind};

use crate::error::HttpError;
use crate::middleware::decode_payload;
use crate::response::ApiResponse;

enum Mutation {
    Add,
    Update,
    Delete,
}

/// Single entry point for `/anomaly`. The method is resolved before the body
/// is touched so unsupported methods never pay for decoding.
pub async fn handle_anomaly(
    State(state): State<AppState>,
    Extension(key): Extension<ApiKey>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, HttpError> {
    let mutation = match method {
        Method::GET => return list(&state, &key).await,
        Method::POST => Mutation::Add,
        Method::PATCH => Mutation::Update,
        Method::DELETE => Mutation::Delete,
        other => {
            state.metrics.record_failure(ErrorKind::Method);
            return Err(HttpError::MethodNotAllowed(other.to_string()));
        }
    };

    let payload = decode_payload(&headers, &body, state.config.max_body_bytes).map_err(|err| {
        warn!("failed to parse anomaly body: {}", err);
        state.metrics.record_failure(ErrorKind::Decode);
        HttpError::Decode
    })?;

    let response = match mutation {
        Mutation::Add => {
            anomaly_commands::add_anomaly(&state, &key, &payload)
                .await
                .map_err(|err| HttpError::from_app(err, &state))?;
            (StatusCode::CREATED, Json(ApiResponse::message("created")))
        }
        Mutation::Update => {
            let updated = anomaly_commands::update_anomaly(&state, &key, &payload)
                .await
                .map_err(|err| HttpError::from_app(err, &state))?;
            (StatusCode::OK, Json(ApiResponse::updated(&updated)))
        }
        Mutation::Delete => {
            anomaly_commands::delete_anomaly(&state, &key, &payload)
                .await
                .map_err(|err| HttpError::from_app(err, &state))?;
            (StatusCode::OK, Json(ApiResponse::message("deleted")))
        }
    };
    Ok(response.into_response())
}

async fn list(state: &AppState, key: &ApiKey) -> Result<Response, HttpError> {
    let rows = anomaly_queries::list_anomalies(state, key)
        .await
        .map_err(|err| HttpError::from_app(err, state))?;
    Ok((StatusCode::OK, Json(ApiResponse::listing(&rows))).into_response())
}
