use async_trait::async_trait;
use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::Row;
use tracing::error;

use tracker_domain::{ApiKey, ApiKeyId, ApiKeyRepository, GroupId, NewApiKey, RepoError, UserId};

use crate::utils::parse_store_timestamp;

const CREATE_API_KEYS: &str = r#"
CREATE TABLE IF NOT EXISTS api_keys (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    key TEXT NOT NULL UNIQUE,
    type TEXT NOT NULL,
    user_id INTEGER NOT NULL,
    group_id INTEGER NOT NULL,
    created_by INTEGER NOT NULL,
    created_dttm TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
)
"#;

const KEY_COLUMNS: &str = "id, key, type, user_id, group_id, created_by, created_dttm";

#[derive(Clone)]
pub struct SqliteApiKeyRepository {
    pool: SqlitePool,
}

impl SqliteApiKeyRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn map_api_key(row: &SqliteRow) -> Result<ApiKey, sqlx::Error> {
    let created: String = row.try_get("created_dttm")?;
    let created_at = parse_store_timestamp(&created).map_err(|err| sqlx::Error::ColumnDecode {
        index: "created_dttm".to_string(),
        source: Box::new(err),
    })?;
    Ok(ApiKey {
        id: ApiKeyId(row.try_get("id")?),
        token: row.try_get("key")?,
        key_type: row.try_get("type")?,
        user_id: UserId(row.try_get("user_id")?),
        group_id: GroupId(row.try_get("group_id")?),
        created_by: UserId(row.try_get("created_by")?),
        created_at,
    })
}

#[async_trait]
impl ApiKeyRepository for SqliteApiKeyRepository {
    async fn ensure_schema(&self) -> Result<(), RepoError> {
        sqlx::query(CREATE_API_KEYS)
            .execute(&self.pool)
            .await
            .map_err(|err| RepoError::backend("failed creating api_keys table", err))?;
        Ok(())
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<ApiKey>, RepoError> {
        let query = format!("SELECT {KEY_COLUMNS} FROM api_keys WHERE key = ?");
        let row = sqlx::query(&query)
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(|err| RepoError::backend("failed looking up api key", err))?;

        match row {
            Some(row) => map_api_key(&row).map(Some).map_err(|err| {
                error!("failed parsing api key row: {}", err);
                RepoError::backend("failed reading api key", err)
            }),
            None => Ok(None),
        }
    }

    async fn insert(&self, key: &NewApiKey) -> Result<ApiKey, RepoError> {
        let query = format!(
            "INSERT INTO api_keys (key, type, user_id, group_id, created_by) \
             VALUES (?, ?, ?, ?, ?) RETURNING {KEY_COLUMNS}"
        );
        let row = sqlx::query(&query)
            .bind(&key.token)
            .bind(&key.key_type)
            .bind(key.user_id.0)
            .bind(key.group_id.0)
            .bind(key.created_by.0)
            .fetch_one(&self.pool)
            .await
            .map_err(|err| match &err {
                sqlx::Error::Database(db) if db.is_unique_violation() => RepoError::Duplicate,
                _ => RepoError::backend("failed saving api key", err),
            })?;
        map_api_key(&row).map_err(|err| RepoError::backend("failed reading api key", err))
    }
}
