// API key entity
// Resolved on every authenticated request and never mutated afterwards

use std::fmt;

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

use crate::value_objects::{ApiKeyId, GroupId, UserId};

const FINGERPRINT_LEN: usize = 12;

#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey {
    pub id: ApiKeyId,
    pub token: String,
    pub key_type: String,
    pub user_id: UserId,
    pub group_id: GroupId,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
}

impl ApiKey {
    pub fn fingerprint(&self) -> String {
        token_fingerprint(&self.token)
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKey")
            .field("id", &self.id)
            .field("token", &self.fingerprint())
            .field("key_type", &self.key_type)
            .field("user_id", &self.user_id)
            .field("group_id", &self.group_id)
            .field("created_by", &self.created_by)
            .field("created_at", &self.created_at)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct NewApiKey {
    pub token: String,
    pub key_type: String,
    pub user_id: UserId,
    pub group_id: GroupId,
    pub created_by: UserId,
}

/// Short SHA-256 prefix of a token, safe to write to logs.
pub fn token_fingerprint(token: &str) -> String {
    let digest = Sha256::digest(token.as_bytes());
    let mut out = String::with_capacity(FINGERPRINT_LEN);
    for byte in digest.iter().take(FINGERPRINT_LEN / 2) {
        out.push_str(&format!("{byte:02x}"));
    }
    out
}
