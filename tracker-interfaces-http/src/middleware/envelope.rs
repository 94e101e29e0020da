use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::response::ApiResponse;

/// Rewrites the bare 413/408 bodies produced by the body-limit and timeout
/// layers (and by axum's own body rejections) into the JSON error envelope.
pub async fn envelope_rejections(response: Response) -> Response {
    let status = response.status();
    let message = match status {
        StatusCode::PAYLOAD_TOO_LARGE => "request body too large",
        StatusCode::REQUEST_TIMEOUT => "request timed out",
        _ => return response,
    };
    let already_json = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.starts_with("application/json"))
        .unwrap_or(false);
    if already_json {
        return response;
    }
    (status, Json(ApiResponse::error(message))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
        String::from_utf8(bytes.to_vec()).expect("utf8")
    }

    #[tokio::test]
    async fn empty_timeout_becomes_envelope() {
        let bare = StatusCode::REQUEST_TIMEOUT.into_response();
        let response = envelope_rejections(bare).await;
        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
        assert_eq!(body_text(response).await, r#"{"error":"request timed out"}"#);
    }

    #[tokio::test]
    async fn plain_text_limit_becomes_envelope() {
        let bare = (StatusCode::PAYLOAD_TOO_LARGE, "length limit exceeded").into_response();
        let response = envelope_rejections(bare).await;
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body_text(response).await, r#"{"error":"request body too large"}"#);
    }

    #[tokio::test]
    async fn other_responses_pass_through() {
        let ok = Response::new(Body::from("^.^"));
        assert_eq!(body_text(envelope_rejections(ok).await).await, "^.^");

        let json = (StatusCode::PAYLOAD_TOO_LARGE, Json(ApiResponse::error("custom")))
            .into_response();
        assert_eq!(body_text(envelope_rejections(json).await).await, r#"{"error":"custom"}"#);
    }
}
