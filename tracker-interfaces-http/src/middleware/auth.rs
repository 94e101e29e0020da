use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use tracker_application::queries::api_key_queries;
use tracker_application::AppState;

use crate::error::HttpError;

pub const AUTH_HEADER: &str = "Authentication-Key";

/// Resolves the `Authentication-Key` header and attaches the `ApiKey` to the
/// request for downstream handlers. Unknown keys stop here with 401.
pub async fn require_api_key(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = extract_token(request.headers());
    match api_key_queries::resolve_api_key(&state, token.as_deref()).await {
        Ok(key) => {
            request.extensions_mut().insert(key);
            next.run(request).await
        }
        Err(err) => HttpError::from_app(err, &state).into_response(),
    }
}

fn extract_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTH_HEADER)?
        .to_str()
        .ok()
        .map(ToString::to_string)
}
