use tracing::{debug, error};

use crate::{AppError, AppState};
use tracker_domain::{Anomaly, ApiKey};

pub async fn list_anomalies(state: &AppState, key: &ApiKey) -> Result<Vec<Anomaly>, AppError> {
    let scope = state.scope_for(key);
    let rows = state
        .anomaly_repo
        .list_by_scope(&scope)
        .await
        .map_err(|err| {
            error!("failed to fetch anomalies: {}", err);
            AppError::from(err)
        })?;
    state.metrics.record_listing();
    debug!(count = rows.len(), key = %key.fingerprint(), "listed anomalies");
    Ok(rows)
}
