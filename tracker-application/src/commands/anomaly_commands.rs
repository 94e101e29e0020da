use tracing::{error, info, warn};

use crate::{AppError, AppState};
use tracker_domain::services::validator;
use tracker_domain::{Anomaly, AnomalyPayload, ApiKey, RepoError};

pub async fn add_anomaly(
    state: &AppState,
    key: &ApiKey,
    payload: &AnomalyPayload,
) -> Result<(), AppError> {
    let anomaly = validator::validate_new(payload)?;
    let internal_id = state
        .anomaly_repo
        .add(&anomaly, key)
        .await
        .map_err(|err| log_repo_failure("add", key, err))?;

    state.metrics.record_created();
    info!(
        code = %anomaly.code,
        internal_id = %internal_id,
        key = %key.fingerprint(),
        "added anomaly"
    );
    Ok(())
}

pub async fn update_anomaly(
    state: &AppState,
    key: &ApiKey,
    payload: &AnomalyPayload,
) -> Result<Anomaly, AppError> {
    let patch = validator::validate_patch(payload)?;
    let scope = state.scope_for(key);
    let updated = state
        .anomaly_repo
        .update(&patch, &scope)
        .await
        .map_err(|err| log_repo_failure("update", key, err))?;

    state.metrics.record_updated();
    info!(
        code = %updated.code,
        internal_id = %updated.internal_id,
        key = %key.fingerprint(),
        "updated anomaly"
    );
    Ok(updated)
}

pub async fn delete_anomaly(
    state: &AppState,
    key: &ApiKey,
    payload: &AnomalyPayload,
) -> Result<u64, AppError> {
    let code = validator::validate_code(payload.id.as_deref())?;
    let scope = state.scope_for(key);
    let removed = state
        .anomaly_repo
        .delete(&code, &scope)
        .await
        .map_err(|err| log_repo_failure("delete", key, err))?;

    state.metrics.record_deleted(removed);
    info!(code = %code, removed, key = %key.fingerprint(), "deleted anomaly");
    Ok(removed)
}

fn log_repo_failure(operation: &str, key: &ApiKey, err: RepoError) -> AppError {
    match &err {
        RepoError::Backend { .. } => {
            error!(operation, key = %key.fingerprint(), "anomaly store failure: {}", err)
        }
        _ => warn!(operation, key = %key.fingerprint(), "anomaly rejected: {}", err),
    }
    AppError::from(err)
}
