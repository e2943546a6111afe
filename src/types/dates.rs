//! Query-string date bounds.
//!
//! Admin filters accept either a full RFC 3339 timestamp or a bare
//! `YYYY-MM-DD` date. A bare lower bound starts at midnight UTC, a bare
//! upper bound covers the whole day.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{de, Deserialize, Deserializer};

fn parse_bound(raw: &str, end_of_day: bool) -> Result<DateTime<Utc>, String> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }

    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| format!("Invalid date: {raw}"))?;
    let time = if end_of_day {
        NaiveTime::from_hms_milli_opt(23, 59, 59, 999)
    } else {
        Some(NaiveTime::MIN)
    };
    time.map(|t| date.and_time(t).and_utc())
        .ok_or_else(|| format!("Invalid date: {raw}"))
}

fn deserialize_bound<'de, D>(deserializer: D, end_of_day: bool) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => parse_bound(&s, end_of_day).map(Some).map_err(de::Error::custom),
    }
}

/// Inclusive lower bound
pub fn start_bound<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_bound(deserializer, false)
}

/// Inclusive upper bound
pub fn end_bound<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_bound(deserializer, true)
}
