use chrono::{DateTime, Utc};
use serde::Serialize;

use tracker_domain::Anomaly;

/// JSON envelope shared by every `/anomaly` response. Absent fields are omitted.
#[derive(Debug, Default, Serialize)]
pub struct ApiResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anomaly: Option<PublicAnomaly>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anomalies: Option<Vec<PublicAnomaly>>,
}

impl ApiResponse {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Default::default()
        }
    }

    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Default::default()
        }
    }

    pub fn updated(anomaly: &Anomaly) -> Self {
        Self {
            message: Some("updated".to_string()),
            anomaly: Some(PublicAnomaly::from(anomaly)),
            ..Default::default()
        }
    }

    pub fn listing(rows: &[Anomaly]) -> Self {
        Self {
            anomalies: Some(rows.iter().map(PublicAnomaly::from).collect()),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PublicAnomaly {
    pub id: String,
    pub system: String,
    #[serde(rename = "type")]
    pub anomaly_type: String,
    pub name: String,
    pub created: DateTime<Utc>,
}

impl From<&Anomaly> for PublicAnomaly {
    fn from(value: &Anomaly) -> Self {
        Self {
            id: value.code.to_string(),
            system: value.system.clone(),
            anomaly_type: value.anomaly_type.as_str().to_string(),
            name: value.name.clone(),
            created: value.created_at,
        }
    }
}
