use tracing::{error, info};

use crate::{AppError, AppState};
use tracker_domain::services::validator;
use tracker_domain::{token_fingerprint, ApiKey};

/// Resolves the presented token. Absent or unknown tokens are `Unauthorized`;
/// store failures stay `Internal` so they never masquerade as a bad key.
pub async fn resolve_api_key(state: &AppState, raw: Option<&str>) -> Result<ApiKey, AppError> {
    let Some(token) = validator::normalize_token(raw) else {
        info!("no api key specified");
        return Err(AppError::Unauthorized);
    };

    let found = state
        .api_key_repo
        .find_by_token(token)
        .await
        .map_err(|err| {
            error!("unexpected error looking up key: {}", err);
            AppError::from(err)
        })?;

    found.ok_or_else(|| {
        info!(key = %token_fingerprint(token), "nothing found for key");
        AppError::Unauthorized
    })
}
