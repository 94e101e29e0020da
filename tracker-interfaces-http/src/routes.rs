use axum::routing::{any, get};
use axum::{middleware, Router};

use tracker_application::AppState;

use crate::handlers::{anomaly_handlers, ops_handlers};
use crate::middleware::require_api_key;

pub fn build_router(state: AppState) -> Router {
    let authenticated = Router::new()
        .route("/anomaly", any(anomaly_handlers::handle_anomaly))
        .route("/metrics", get(ops_handlers::metrics_prometheus))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_api_key));

    Router::new()
        .route("/health", get(ops_handlers::health_live))
        .route("/health/ready", get(ops_handlers::health_ready))
        .merge(authenticated)
        .with_state(state)
}
