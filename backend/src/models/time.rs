//! Date-time parsing for request payloads.
//!
//! Clients send either a full RFC 3339 timestamp (`2025-07-01T18:00:00Z`) or a
//! bare calendar date (`2025-07-01`). Bare dates are taken as midnight UTC.

use chrono::{DateTime, NaiveDate, Utc};

/// Parse an RFC 3339 timestamp or a `YYYY-MM-DD` date.
pub fn parse_datetime(value: &str) -> Result<DateTime<Utc>, String> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| {
            format!(
                "Invalid date '{}': expected RFC 3339 or YYYY-MM-DD",
                value
            )
        })
}

/// Serde adapter for `DateTime<Utc>` fields that accept bare dates.
pub mod flexible_datetime {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&value.to_rfc3339())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        super::parse_datetime(&raw).map_err(serde::de::Error::custom)
    }
}

/// Serde adapter for optional `DateTime<Utc>` fields that accept bare dates.
pub mod option_flexible_datetime {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        s: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(dt) => s.serialize_some(&dt.to_rfc3339()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        d: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        let raw: Option<String> = Option::deserialize(d)?;
        raw.map(|s| super::parse_datetime(&s).map_err(serde::de::Error::custom))
            .transpose()
    }
}
