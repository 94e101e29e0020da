use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

/// Layout SQLite's `CURRENT_TIMESTAMP` writes.
pub const STORE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn parse_store_timestamp(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    let naive = NaiveDateTime::parse_from_str(raw.trim(), STORE_TIMESTAMP_FORMAT)?;
    Ok(Utc.from_utc_datetime(&naive))
}
