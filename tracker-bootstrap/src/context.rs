use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use sqlx::SqlitePool;
use tracing::{info, warn};

use tracker_application::AppState;
use tracker_domain::{AnomalyRepository, ApiKeyRepository};
use tracker_infrastructure::{
    connect_pool, AppConfig, SqliteAnomalyRepository, SqliteApiKeyRepository,
};

/// Command-line values that win over file and environment configuration.
#[derive(Debug, Clone, Default)]
pub struct StartupOptions {
    pub config_path: Option<PathBuf>,
    pub listen_addr: Option<String>,
    pub debug: bool,
}

impl StartupOptions {
    pub async fn load_config(&self) -> Result<AppConfig> {
        let mut config = AppConfig::load(self.config_path.as_deref()).await?;
        if let Some(addr) = &self.listen_addr {
            config.bind_addr = addr.trim().to_string();
        }
        if self.debug {
            config.debug = true;
        }
        config.validate()?;
        Ok(config)
    }
}

pub struct AppContext {
    pub state: AppState,
    pub pool: SqlitePool,
}

impl AppContext {
    pub async fn new(options: &StartupOptions) -> Result<Self> {
        let config = options.load_config().await?;
        let runtime_config = config.to_runtime_config();
        let db_config = config.to_db_config();

        let pool = connect_pool(&db_config).await?;
        let anomaly_repo = Arc::new(SqliteAnomalyRepository::new(pool.clone()));
        let api_key_repo = Arc::new(SqliteApiKeyRepository::new(pool.clone()));
        anomaly_repo.ensure_schema().await?;
        api_key_repo.ensure_schema().await?;

        if runtime_config.debug {
            warn!("debug mode enabled, raw error text is returned to clients");
        }
        info!(
            ownership_scope = runtime_config.ownership_scope.as_str(),
            max_body_bytes = runtime_config.max_body_bytes,
            "runtime configuration loaded"
        );

        let state = AppState::new(runtime_config, anomaly_repo, api_key_repo);
        Ok(Self { state, pool })
    }
}
