//! Timestamp handling for the service's RFC 3339 dialect. Responses may
//! carry minute-precision timestamps such as `2023-10-02T18:10Z`, and
//! query parameters are always sent in that form.

use chrono::{DateTime, TimeZone, Utc};

/// Formats a timestamp as minute-precision RFC 3339 in UTC, the form the
/// service expects in query parameters (e.g. `2023-10-02T18:10Z`).
/// Seconds and fractions are dropped.
pub fn format_utc_minutes<Tz: TimeZone>(timestamp: &DateTime<Tz>) -> String {
    timestamp
        .with_timezone(&Utc)
        .format("%Y-%m-%dT%H:%MZ")
        .to_string()
}

/// Parses RFC 3339 with or without a seconds field, normalized to UTC.
pub(crate) fn parse_flexible(text: &str) -> chrono::ParseResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .or_else(|_| DateTime::parse_from_str(text, "%Y-%m-%dT%H:%M%#z"))
        .map(|parsed| parsed.with_timezone(&Utc))
}

/// Serde adapter for the service's flexible RFC 3339 timestamps.
pub(crate) mod rfc3339_flex {
    use super::parse_flexible;
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(timestamp: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&timestamp.to_rfc3339_opts(SecondsFormat::Secs, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        parse_flexible(&text).map_err(de::Error::custom)
    }
}

/// As [`rfc3339_flex`], for optional fields. Combine with `#[serde(default)]`
/// so an absent key also reads as `None`.
pub(crate) mod rfc3339_flex_opt {
    use super::parse_flexible;
    use chrono::{DateTime, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(
        timestamp: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match timestamp {
            Some(timestamp) => super::rfc3339_flex::serialize(timestamp, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(text) => parse_flexible(&text).map(Some).map_err(de::Error::custom),
            None => Ok(None),
        }
    }
}
