// Anomaly entity
// A tracked point of interest owned by a group

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::value_objects::{AnomalyCode, AnomalyType, GroupId, InternalId, UserId};

/// Stored anomaly row. Responses use a public projection without the surrogate key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anomaly {
    pub internal_id: InternalId,
    pub code: AnomalyCode,
    pub system: String,
    pub anomaly_type: AnomalyType,
    pub name: String,
    pub user_id: UserId,
    pub group_id: GroupId,
    pub created_at: DateTime<Utc>,
}

/// Anomaly-shaped request body. Every field is optional so that add, update
/// and delete can share one decoder; the validator decides what is required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnomalyPayload {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub system: Option<String>,
    #[serde(default, rename = "type")]
    pub anomaly_type: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAnomaly {
    pub code: AnomalyCode,
    pub system: String,
    pub anomaly_type: AnomalyType,
    pub name: String,
}

/// Fields an update may change. At least one of them is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnomalyPatch {
    pub code: AnomalyCode,
    pub anomaly_type: Option<AnomalyType>,
    pub name: Option<String>,
}
