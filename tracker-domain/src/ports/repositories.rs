use async_trait::async_trait;

use crate::entities::{Anomaly, AnomalyPatch, ApiKey, NewAnomaly, NewApiKey};
use crate::errors::RepoError;
use crate::value_objects::{AnomalyCode, InternalId, Scope};

#[async_trait]
pub trait AnomalyRepository: Send + Sync {
    async fn ensure_schema(&self) -> Result<(), RepoError>;
    /// Inserts a row owned by the key's user and group. A code already used
    /// in the group yields `RepoError::Duplicate`.
    async fn add(&self, anomaly: &NewAnomaly, owner: &ApiKey) -> Result<InternalId, RepoError>;
    /// Removes the scoped row and returns how many rows went away.
    async fn delete(&self, code: &AnomalyCode, scope: &Scope) -> Result<u64, RepoError>;
    /// Applies the patch atomically and returns the row as stored afterwards.
    async fn update(&self, patch: &AnomalyPatch, scope: &Scope) -> Result<Anomaly, RepoError>;
    async fn list_by_scope(&self, scope: &Scope) -> Result<Vec<Anomaly>, RepoError>;
    /// Rows skipped while mapping because they could not be parsed.
    fn skipped_rows(&self) -> u64;
    async fn ping(&self) -> Result<(), RepoError>;
}

#[async_trait]
pub trait ApiKeyRepository: Send + Sync {
    async fn ensure_schema(&self) -> Result<(), RepoError>;
    async fn find_by_token(&self, token: &str) -> Result<Option<ApiKey>, RepoError>;
    async fn insert(&self, key: &NewApiKey) -> Result<ApiKey, RepoError>;
}
