use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::info;

use tracker_domain::DbConfig;

/// Opens the pool shared by both repositories. File databases are created on
/// first use. In-memory databases live and die with their connection, so they
/// get exactly one that is never reaped.
pub async fn connect_pool(config: &DbConfig) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&config.database_url)
        .map_err(|err| anyhow!("invalid database_url '{}': {}", config.database_url, err))?
        .create_if_missing(true);

    let mut pool_options = SqlitePoolOptions::new()
        .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds.max(1)));
    if config.database_url.contains(":memory:") {
        pool_options = pool_options
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None);
    }

    let pool = pool_options
        .connect_with(options)
        .await
        .map_err(|err| anyhow!("failed connecting to {}: {}", config.database_url, err))?;
    info!("connected to {}", config.database_url);
    Ok(pool)
}
