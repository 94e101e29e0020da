// In-memory port implementations for application tests

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use tracker_domain::{
    Anomaly, AnomalyCode, AnomalyPatch, AnomalyRepository, ApiKey, ApiKeyId, ApiKeyRepository,
    GroupId, InternalId, NewAnomaly, NewApiKey, RepoError, RuntimeConfig, Scope, UserId,
};

use crate::AppState;

#[derive(Default)]
pub struct MemoryAnomalyRepository {
    rows: Mutex<Vec<Anomaly>>,
    next_id: AtomicU64,
    writes: AtomicU64,
}

impl MemoryAnomalyRepository {
    pub fn writes(&self) -> u64 {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn rows(&self) -> Vec<Anomaly> {
        self.rows.lock().expect("rows lock").clone()
    }
}

fn in_scope(row: &Anomaly, scope: &Scope) -> bool {
    row.group_id == scope.group_id && scope.user_id.map_or(true, |user| row.user_id == user)
}

#[async_trait]
impl AnomalyRepository for MemoryAnomalyRepository {
    async fn ensure_schema(&self) -> Result<(), RepoError> {
        Ok(())
    }

    async fn add(&self, anomaly: &NewAnomaly, owner: &ApiKey) -> Result<InternalId, RepoError> {
        let mut rows = self.rows.lock().expect("rows lock");
        self.writes.fetch_add(1, Ordering::SeqCst);
        if rows
            .iter()
            .any(|row| row.code == anomaly.code && row.group_id == owner.group_id)
        {
            return Err(RepoError::Duplicate);
        }
        let internal_id = InternalId(self.next_id.fetch_add(1, Ordering::SeqCst) as i64 + 1);
        rows.push(Anomaly {
            internal_id,
            code: anomaly.code.clone(),
            system: anomaly.system.clone(),
            anomaly_type: anomaly.anomaly_type,
            name: anomaly.name.clone(),
            user_id: owner.user_id,
            group_id: owner.group_id,
            created_at: Utc::now(),
        });
        Ok(internal_id)
    }

    async fn delete(&self, code: &AnomalyCode, scope: &Scope) -> Result<u64, RepoError> {
        let mut rows = self.rows.lock().expect("rows lock");
        self.writes.fetch_add(1, Ordering::SeqCst);
        let before = rows.len();
        rows.retain(|row| !(row.code == *code && in_scope(row, scope)));
        match (before - rows.len()) as u64 {
            0 => Err(RepoError::NotFound),
            removed => Ok(removed),
        }
    }

    async fn update(&self, patch: &AnomalyPatch, scope: &Scope) -> Result<Anomaly, RepoError> {
        let mut rows = self.rows.lock().expect("rows lock");
        self.writes.fetch_add(1, Ordering::SeqCst);
        let row = rows
            .iter_mut()
            .find(|row| row.code == patch.code && in_scope(row, scope))
            .ok_or(RepoError::NotFound)?;
        if let Some(anomaly_type) = patch.anomaly_type {
            row.anomaly_type = anomaly_type;
        }
        if let Some(name) = &patch.name {
            row.name = name.clone();
        }
        Ok(row.clone())
    }

    async fn list_by_scope(&self, scope: &Scope) -> Result<Vec<Anomaly>, RepoError> {
        let rows = self.rows.lock().expect("rows lock");
        Ok(rows.iter().filter(|row| in_scope(row, scope)).cloned().collect())
    }

    fn skipped_rows(&self) -> u64 {
        0
    }

    async fn ping(&self) -> Result<(), RepoError> {
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryApiKeyRepository {
    keys: Mutex<Vec<ApiKey>>,
    lookups: AtomicU64,
    fail_lookups: bool,
}

impl MemoryApiKeyRepository {
    pub fn failing() -> Self {
        Self {
            fail_lookups: true,
            ..Default::default()
        }
    }

    pub fn with_key(self, token: &str, user_id: i64, group_id: i64) -> Self {
        {
            let mut keys = self.keys.lock().expect("keys lock");
            let id = ApiKeyId(keys.len() as i64 + 1);
            keys.push(api_key(id, token, user_id, group_id));
        }
        self
    }

    pub fn lookups(&self) -> u64 {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ApiKeyRepository for MemoryApiKeyRepository {
    async fn ensure_schema(&self) -> Result<(), RepoError> {
        Ok(())
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<ApiKey>, RepoError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if self.fail_lookups {
            let err = std::io::Error::new(std::io::ErrorKind::Other, "connection refused");
            return Err(RepoError::backend("failed looking up api key", err));
        }
        let keys = self.keys.lock().expect("keys lock");
        Ok(keys.iter().find(|key| key.token == token).cloned())
    }

    async fn insert(&self, key: &NewApiKey) -> Result<ApiKey, RepoError> {
        let mut keys = self.keys.lock().expect("keys lock");
        if keys.iter().any(|existing| existing.token == key.token) {
            return Err(RepoError::Duplicate);
        }
        let stored = ApiKey {
            id: ApiKeyId(keys.len() as i64 + 1),
            token: key.token.clone(),
            key_type: key.key_type.clone(),
            user_id: key.user_id,
            group_id: key.group_id,
            created_by: key.created_by,
            created_at: Utc::now(),
        };
        keys.push(stored.clone());
        Ok(stored)
    }
}

pub fn api_key(id: ApiKeyId, token: &str, user_id: i64, group_id: i64) -> ApiKey {
    ApiKey {
        id,
        token: token.to_string(),
        key_type: "standard".to_string(),
        user_id: UserId(user_id),
        group_id: GroupId(group_id),
        created_by: UserId(user_id),
        created_at: Utc::now(),
    }
}

pub fn state_with(
    anomalies: Arc<MemoryAnomalyRepository>,
    keys: Arc<MemoryApiKeyRepository>,
) -> AppState {
    AppState::new(RuntimeConfig::default(), anomalies, keys)
}
