use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::Row;
use tracing::{debug, warn};

use tracker_domain::{
    Anomaly, AnomalyCode, AnomalyPatch, AnomalyRepository, AnomalyType, ApiKey, GroupId,
    InternalId, NewAnomaly, RepoError, Scope, UserId,
};

use crate::utils::parse_store_timestamp;

const CREATE_ANOMALIES: &str = r#"
CREATE TABLE IF NOT EXISTS anomalies (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    anom_id TEXT NOT NULL,
    anom_system TEXT NOT NULL,
    anom_type TEXT NOT NULL,
    anom_name TEXT NOT NULL,
    user_id INTEGER NOT NULL,
    group_id INTEGER NOT NULL,
    created_dttm TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
    UNIQUE (anom_id, group_id)
)
"#;

const SELECT_COLUMNS: &str = "SELECT id, anom_id, anom_system, anom_type, anom_name, \
                              user_id, group_id, created_dttm FROM anomalies";

// Every read and write appends this filter; bind group, user, user.
const SCOPE_FILTER: &str = "group_id = ? AND (? IS NULL OR user_id = ?)";

#[derive(Clone)]
pub struct SqliteAnomalyRepository {
    pool: SqlitePool,
    skipped: Arc<AtomicU64>,
}

impl SqliteAnomalyRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            skipped: Arc::new(AtomicU64::new(0)),
        }
    }
}

fn map_anomaly(row: &SqliteRow) -> Result<Anomaly, sqlx::Error> {
    let created: String = row.try_get("created_dttm")?;
    let created_at = parse_store_timestamp(&created).map_err(|err| sqlx::Error::ColumnDecode {
        index: "created_dttm".to_string(),
        source: Box::new(err),
    })?;
    let stored_type: String = row.try_get("anom_type")?;
    Ok(Anomaly {
        internal_id: InternalId(row.try_get("id")?),
        code: AnomalyCode::from_stored(row.try_get("anom_id")?),
        system: row.try_get("anom_system")?,
        anomaly_type: AnomalyType::from_stored(&stored_type),
        name: row.try_get("anom_name")?,
        user_id: UserId(row.try_get("user_id")?),
        group_id: GroupId(row.try_get("group_id")?),
        created_at,
    })
}

fn scope_user(scope: &Scope) -> Option<i64> {
    scope.user_id.map(|user| user.0)
}

#[async_trait]
impl AnomalyRepository for SqliteAnomalyRepository {
    async fn ensure_schema(&self) -> Result<(), RepoError> {
        sqlx::query(CREATE_ANOMALIES)
            .execute(&self.pool)
            .await
            .map_err(|err| RepoError::backend("failed creating anomalies table", err))?;
        Ok(())
    }

    async fn add(&self, anomaly: &NewAnomaly, owner: &ApiKey) -> Result<InternalId, RepoError> {
        let result = sqlx::query(
            "INSERT INTO anomalies (anom_id, anom_system, anom_type, anom_name, user_id, group_id) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(anomaly.code.as_str())
        .bind(&anomaly.system)
        .bind(anomaly.anomaly_type.as_str())
        .bind(&anomaly.name)
        .bind(owner.user_id.0)
        .bind(owner.group_id.0)
        .execute(&self.pool)
        .await
        .map_err(|err| match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => RepoError::Duplicate,
            _ => RepoError::backend("failed saving anomaly, try again later", err),
        })?;
        Ok(InternalId(result.last_insert_rowid()))
    }

    async fn delete(&self, code: &AnomalyCode, scope: &Scope) -> Result<u64, RepoError> {
        let query = format!("DELETE FROM anomalies WHERE anom_id = ? AND {SCOPE_FILTER}");
        let result = sqlx::query(&query)
            .bind(code.as_str())
            .bind(scope.group_id.0)
            .bind(scope_user(scope))
            .bind(scope_user(scope))
            .execute(&self.pool)
            .await
            .map_err(|err| RepoError::backend("failed deleting anomaly", err))?;

        match result.rows_affected() {
            0 => Err(RepoError::NotFound),
            removed => Ok(removed),
        }
    }

    async fn update(&self, patch: &AnomalyPatch, scope: &Scope) -> Result<Anomaly, RepoError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|err| RepoError::backend("failed starting transaction", err))?;

        let update = format!(
            "UPDATE anomalies SET anom_name = COALESCE(?, anom_name), \
             anom_type = COALESCE(?, anom_type) WHERE anom_id = ? AND {SCOPE_FILTER}"
        );
        let result = sqlx::query(&update)
            .bind(patch.name.as_deref())
            .bind(patch.anomaly_type.map(|kind| kind.as_str()))
            .bind(patch.code.as_str())
            .bind(scope.group_id.0)
            .bind(scope_user(scope))
            .bind(scope_user(scope))
            .execute(&mut *tx)
            .await
            .map_err(|err| RepoError::backend("failed updating anomaly", err))?;
        if result.rows_affected() == 0 {
            tx.rollback()
                .await
                .map_err(|err| RepoError::backend("failed rolling back update", err))?;
            return Err(RepoError::NotFound);
        }

        let select = format!("{SELECT_COLUMNS} WHERE anom_id = ? AND {SCOPE_FILTER}");
        let row = sqlx::query(&select)
            .bind(patch.code.as_str())
            .bind(scope.group_id.0)
            .bind(scope_user(scope))
            .bind(scope_user(scope))
            .fetch_one(&mut *tx)
            .await
            .map_err(|err| RepoError::backend("failed reading updated anomaly", err))?;
        let updated = map_anomaly(&row)
            .map_err(|err| RepoError::backend("failed reading updated anomaly", err))?;

        tx.commit()
            .await
            .map_err(|err| RepoError::backend("failed committing update", err))?;
        Ok(updated)
    }

    async fn list_by_scope(&self, scope: &Scope) -> Result<Vec<Anomaly>, RepoError> {
        let query = format!("{SELECT_COLUMNS} WHERE {SCOPE_FILTER} ORDER BY id");
        let rows = sqlx::query(&query)
            .bind(scope.group_id.0)
            .bind(scope_user(scope))
            .bind(scope_user(scope))
            .fetch_all(&self.pool)
            .await
            .map_err(|err| RepoError::backend("failed fetching anomalies", err))?;

        let mut anomalies = Vec::with_capacity(rows.len());
        for row in &rows {
            match map_anomaly(row) {
                Ok(anomaly) => anomalies.push(anomaly),
                Err(err) => {
                    self.skipped.fetch_add(1, Ordering::Relaxed);
                    warn!("skipping unreadable anomaly row: {}", err);
                }
            }
        }
        debug!(
            group_id = %scope.group_id,
            returned = anomalies.len(),
            "fetched anomalies"
        );
        Ok(anomalies)
    }

    fn skipped_rows(&self) -> u64 {
        self.skipped.load(Ordering::Relaxed)
    }

    async fn ping(&self) -> Result<(), RepoError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|err| RepoError::backend("store unreachable", err))?;
        Ok(())
    }
}
