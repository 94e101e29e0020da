use std::sync::Arc;

use tracker_domain::ports::{AnomalyRepository, ApiKeyRepository};
use tracker_domain::{ApiKey, RuntimeConfig, Scope};

use crate::Metrics;

#[derive(Clone)]
pub struct AppState {
    pub config: RuntimeConfig,
    pub anomaly_repo: Arc<dyn AnomalyRepository>,
    pub api_key_repo: Arc<dyn ApiKeyRepository>,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    pub fn new(
        config: RuntimeConfig,
        anomaly_repo: Arc<dyn AnomalyRepository>,
        api_key_repo: Arc<dyn ApiKeyRepository>,
    ) -> Self {
        Self {
            config,
            anomaly_repo,
            api_key_repo,
            metrics: Arc::new(Metrics::default()),
        }
    }

    pub fn scope_for(&self, key: &ApiKey) -> Scope {
        Scope::resolve(key, self.config.ownership_scope)
    }
}
