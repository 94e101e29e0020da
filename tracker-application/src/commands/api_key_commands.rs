use tracing::info;
use uuid::Uuid;

use crate::AppError;
use tracker_domain::{ApiKey, ApiKeyRepository, GroupId, NewApiKey, UserId};

const DEFAULT_KEY_TYPE: &str = "standard";

#[derive(Debug, Clone)]
pub struct IssueKeyRequest {
    pub key_type: Option<String>,
    pub user_id: i64,
    pub group_id: i64,
    pub created_by: Option<i64>,
}

pub async fn issue_api_key(
    repo: &dyn ApiKeyRepository,
    request: IssueKeyRequest,
) -> Result<ApiKey, AppError> {
    if request.user_id <= 0 {
        return Err(AppError::BadRequest("user_id must be positive".to_string()));
    }
    if request.group_id <= 0 {
        return Err(AppError::BadRequest("group_id must be positive".to_string()));
    }
    let created_by = request.created_by.unwrap_or(request.user_id);
    if created_by <= 0 {
        return Err(AppError::BadRequest("created_by must be positive".to_string()));
    }
    let key_type = request
        .key_type
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(DEFAULT_KEY_TYPE)
        .to_string();

    let new_key = NewApiKey {
        token: generate_token(),
        key_type,
        user_id: UserId(request.user_id),
        group_id: GroupId(request.group_id),
        created_by: UserId(created_by),
    };
    let key = repo.insert(&new_key).await?;
    info!(
        key = %key.fingerprint(),
        user_id = %key.user_id,
        group_id = %key.group_id,
        "issued api key"
    );
    Ok(key)
}

fn generate_token() -> String {
    Uuid::new_v4().simple().to_string()
}
