//! Event timestamp conversion.

use chrono::{DateTime, NaiveDateTime};

use crate::error::RenderError;

/// Convert an ISO-8601 event timestamp to whole Unix seconds, rounded to the
/// nearest second. Timestamps without a zone are read as UTC.
pub fn to_unix_timestamp(date: &str) -> Result<i64, RenderError> {
    let millis = match DateTime::parse_from_rfc3339(date) {
        Ok(parsed) => parsed.timestamp_millis(),
        Err(_) => NaiveDateTime::parse_from_str(date, "%Y-%m-%dT%H:%M:%S%.f")
            .map_err(|_| RenderError::InvalidTimestamp(date.to_string()))?
            .and_utc()
            .timestamp_millis(),
    };
    Ok((millis as f64 / 1000.0).round() as i64)
}

/// Chat markup date directive: rendered in the reader's timezone, with the
/// literal date string as fallback text.
pub fn date_token(date: &str) -> Result<String, RenderError> {
    let ts = to_unix_timestamp(date)?;
    Ok(format!("`<!date^{ts}^{{date_num}} {{time_secs}}|{date}>`"))
}
