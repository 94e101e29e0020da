use std::env;
use std::path::Path;

use anyhow::{anyhow, Result};
use serde::Deserialize;
use tokio::fs;
use tracing::warn;

use tracker_domain::{DbConfig, OwnershipScope, RuntimeConfig};

const CONFIG_ENV: &str = "ANOMALY_TRACKER_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "./config.toml";

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub bind_addr: String,
    pub database_url: String,
    pub database_connect_timeout_seconds: u64,
    pub debug: bool,
    pub ownership_scope: String,
    pub max_body_bytes: u64,
    pub request_timeout_seconds: u64,
    pub shutdown_grace_seconds: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8081".to_string(),
            database_url: "sqlite://anomaly-tracker.db".to_string(),
            database_connect_timeout_seconds: 10,
            debug: false,
            ownership_scope: OwnershipScope::Group.as_str().to_string(),
            max_body_bytes: 64 * 1024,
            request_timeout_seconds: 10,
            shutdown_grace_seconds: 2,
        }
    }
}

impl AppConfig {
    /// Loads from `path`, or from `ANOMALY_TRACKER_CONFIG`, or `./config.toml`.
    /// A missing file falls back to defaults; environment overrides apply either way.
    pub async fn load(path: Option<&Path>) -> Result<Self> {
        let configured = match path {
            Some(path) => path.to_path_buf(),
            None => env::var(CONFIG_ENV)
                .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string())
                .into(),
        };
        let mut config = if configured.exists() {
            let content = fs::read_to_string(&configured).await?;
            toml::from_str::<AppConfig>(&content)
                .map_err(|err| anyhow!("invalid config {}: {}", configured.display(), err))?
        } else {
            warn!("{} not found, using defaults", configured.display());
            AppConfig::default()
        };
        config.apply_overrides(|key| env::var(key).ok());
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    pub fn normalize(&mut self) {
        self.bind_addr = self.bind_addr.trim().to_string();
        self.database_url = self.database_url.trim().to_string();
        self.ownership_scope = self.ownership_scope.trim().to_lowercase();
        if self.request_timeout_seconds == 0 {
            warn!("request_timeout_seconds was 0, using 1");
            self.request_timeout_seconds = 1;
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.bind_addr
            .parse::<std::net::SocketAddr>()
            .map_err(|err| anyhow!("invalid bind_addr: {}", err))?;
        if self.database_url.is_empty() {
            return Err(anyhow!("database_url must not be empty"));
        }
        if self.max_body_bytes == 0 {
            return Err(anyhow!("max_body_bytes must be greater than 0"));
        }
        if self.request_timeout_seconds == 0 {
            return Err(anyhow!("request_timeout_seconds must be greater than 0"));
        }
        if OwnershipScope::parse(&self.ownership_scope).is_none() {
            return Err(anyhow!(
                "ownership_scope must be 'group' or 'user', got '{}'",
                self.ownership_scope
            ));
        }
        Ok(())
    }

    pub fn to_runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            bind_addr: self.bind_addr.clone(),
            debug: self.debug,
            ownership_scope: OwnershipScope::parse(&self.ownership_scope).unwrap_or_default(),
            max_body_bytes: self.max_body_bytes,
            request_timeout_seconds: self.request_timeout_seconds,
            shutdown_grace_seconds: self.shutdown_grace_seconds,
        }
    }

    pub fn to_db_config(&self) -> DbConfig {
        DbConfig {
            database_url: self.database_url.clone(),
            connect_timeout_seconds: self.database_connect_timeout_seconds,
        }
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(value) = lookup("ANOMALY_TRACKER_BIND_ADDR") {
            self.bind_addr = value;
        }
        if let Some(value) = lookup("ANOMALY_TRACKER_DATABASE_URL") {
            self.database_url = value;
        }
        if let Some(value) = lookup("ANOMALY_TRACKER_DATABASE_CONNECT_TIMEOUT_SECONDS") {
            self.database_connect_timeout_seconds =
                value.parse().unwrap_or(self.database_connect_timeout_seconds);
        }
        if let Some(value) = lookup("ANOMALY_TRACKER_DEBUG") {
            self.debug = value.parse().unwrap_or(self.debug);
        }
        if let Some(value) = lookup("ANOMALY_TRACKER_OWNERSHIP_SCOPE") {
            self.ownership_scope = value;
        }
        if let Some(value) = lookup("ANOMALY_TRACKER_MAX_BODY_BYTES") {
            self.max_body_bytes = value.parse().unwrap_or(self.max_body_bytes);
        }
        if let Some(value) = lookup("ANOMALY_TRACKER_REQUEST_TIMEOUT_SECONDS") {
            self.request_timeout_seconds = value.parse().unwrap_or(self.request_timeout_seconds);
        }
        if let Some(value) = lookup("ANOMALY_TRACKER_SHUTDOWN_GRACE_SECONDS") {
            self.shutdown_grace_seconds = value.parse().unwrap_or(self.shutdown_grace_seconds);
        }
    }
}
