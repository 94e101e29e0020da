// Identifier value objects

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub i64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupId(pub i64);

/// Store-assigned surrogate key. Used to target statements, never sent to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InternalId(pub i64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ApiKeyId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for InternalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn code_pattern() -> &'static Regex {
    static CODE_PATTERN: OnceLock<Regex> = OnceLock::new();
    CODE_PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Z0-9]{3}-[A-Z0-9]{3}$").expect("anomaly code pattern must be valid")
    })
}

/// Human-assigned anomaly code such as `ABC-123`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct AnomalyCode(String);

impl AnomalyCode {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        if raw.is_empty() {
            return Err(ValidationError::MissingId);
        }
        if !code_pattern().is_match(raw) {
            return Err(ValidationError::InvalidId);
        }
        Ok(Self(raw.to_string()))
    }

    /// Wraps a code read back from the store without re-checking its format.
    pub fn from_stored(raw: String) -> Self {
        Self(raw)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AnomalyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
