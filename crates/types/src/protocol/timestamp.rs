//! ISO-8601 timestamps carried by requests and responses.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serializer;

use crate::protocol::ValidationError;

/// Parses an optional RFC 3339 timestamp. Absent and empty input both mean "no timestamp".
pub fn parse_timestamp(value: Option<&str>) -> Result<Option<DateTime<Utc>>, ValidationError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => DateTime::parse_from_rfc3339(value)
            .map(|timestamp| Some(timestamp.with_timezone(&Utc)))
            .map_err(|_| ValidationError::invalid_timestamp(value)),
    }
}

/// Formats a timestamp in UTC with a `Z` suffix, keeping as many fractional digits as needed.
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

pub(crate) fn serialize<S: Serializer>(timestamp: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error> {
    match timestamp {
        Some(timestamp) => serializer.serialize_str(&format_timestamp(timestamp)),
        None => serializer.serialize_none(),
    }
}
