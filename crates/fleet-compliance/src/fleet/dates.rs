use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};

/// Raised when a document date on the wire is neither empty nor a recognisable date.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{value}' is not a valid document date (expected YYYY-MM-DD)")]
pub struct DateParseError {
    pub value: String,
}

/// Decode a wire-format document date.
///
/// Blank input means "no document on file" and yields `None`. Datetimes keep the
/// calendar date as written, so `2024-06-01T23:30:00+03:00` is the 1st of June.
pub fn parse_document_date(raw: &str) -> Result<Option<NaiveDate>, DateParseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(Some(date));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(Some(dt.date_naive()));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(Some(dt.date()));
        }
    }

    Err(DateParseError {
        value: raw.to_string(),
    })
}

pub fn deserialize_document_date<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    match opt {
        Some(raw) => parse_document_date(&raw).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}
