use anyhow::Result;
use tracing::info;

use tracker_application::commands::api_key_commands::{self, IssueKeyRequest};
use tracker_domain::{ApiKey, ApiKeyRepository};
use tracker_infrastructure::{connect_pool, SqliteApiKeyRepository};

use crate::context::StartupOptions;

/// Creates an API key directly in the configured store. Keys are only ever
/// issued from the command line.
pub async fn issue_key(options: &StartupOptions, request: IssueKeyRequest) -> Result<ApiKey> {
    let config = options.load_config().await?;
    let pool = connect_pool(&config.to_db_config()).await?;
    let repo = SqliteApiKeyRepository::new(pool.clone());

    let issued = async {
        repo.ensure_schema().await?;
        let key = api_key_commands::issue_api_key(&repo, request).await?;
        Ok::<_, anyhow::Error>(key)
    }
    .await;
    pool.close().await;

    let key = issued?;
    info!(key = %key.fingerprint(), "api key stored");
    Ok(key)
}
