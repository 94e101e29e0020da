//! Pure shape checks run before any store access.
//!
//! Rules are evaluated in a fixed order and the first failure wins, so a
//! payload missing several fields always reports the same error.

use crate::entities::{AnomalyPatch, AnomalyPayload, NewAnomaly};
use crate::errors::ValidationError;
use crate::value_objects::{AnomalyCode, AnomalyType};

pub fn validate_new(payload: &AnomalyPayload) -> Result<NewAnomaly, ValidationError> {
    let code = validate_code(payload.id.as_deref())?;
    let system = non_blank(&payload.system).ok_or(ValidationError::MissingSystem)?;
    let raw_type = non_blank(&payload.anomaly_type).ok_or(ValidationError::MissingType)?;
    let anomaly_type = AnomalyType::parse(raw_type).ok_or(ValidationError::InvalidType)?;
    let name = non_blank(&payload.name).ok_or(ValidationError::MissingName)?;

    Ok(NewAnomaly {
        code,
        system: system.to_string(),
        anomaly_type,
        name: name.to_string(),
    })
}

pub fn validate_patch(payload: &AnomalyPayload) -> Result<AnomalyPatch, ValidationError> {
    let code = validate_code(payload.id.as_deref())?;
    if non_blank(&payload.system).is_some() {
        return Err(ValidationError::SystemImmutable);
    }
    let raw_type = non_blank(&payload.anomaly_type);
    let name = non_blank(&payload.name);
    if raw_type.is_none() && name.is_none() {
        return Err(ValidationError::NoFieldsToUpdate);
    }
    let anomaly_type = raw_type
        .map(|raw| AnomalyType::parse(raw).ok_or(ValidationError::InvalidType))
        .transpose()?;

    Ok(AnomalyPatch {
        code,
        anomaly_type,
        name: name.map(ToString::to_string),
    })
}

pub fn validate_code(raw: Option<&str>) -> Result<AnomalyCode, ValidationError> {
    AnomalyCode::parse(raw.unwrap_or_default())
}

/// Returns the usable token, or `None` when the caller presented nothing worth a lookup.
pub fn normalize_token(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|token| !token.is_empty())
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|trimmed| !trimmed.is_empty())
}
