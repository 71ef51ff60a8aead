//! Custom serde helpers for backend wire formats.
//!
//! The dashboard backend is loose about types: quantities and prices arrive as
//! JSON numbers or as strings, ids as integers or strings, and missing values as
//! `null`, `""` or `"N/A"`. These helpers normalize all of that at the wire edge.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use std::str::FromStr;

/// A JSON scalar that is either a string or a number.
#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum StringOrNumber {
    Str(String),
    Num(serde_json::Number),
}

/// Deserializes an optional decimal from a number, a numeric string, or `null`.
///
/// Strings that are not numeric (`""`, `"N/A"`) become `None` rather than an error.
pub mod opt_decimal {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<StringOrNumber>::deserialize(deserializer)?;
        Ok(raw.and_then(|v| match v {
            StringOrNumber::Str(s) => parse_decimal(&s),
            StringOrNumber::Num(n) => parse_decimal(&n.to_string()),
        }))
    }
}

/// Deserializes an optional string, mapping blank strings to `None`.
pub mod opt_string {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<StringOrNumber>::deserialize(deserializer)?;
        Ok(raw.and_then(|v| {
            let s = match v {
                StringOrNumber::Str(s) => s,
                StringOrNumber::Num(n) => n.to_string(),
            };
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }))
    }
}

/// Parse a decimal, tolerating thousands separators and scientific notation.
pub fn parse_decimal(s: &str) -> Option<Decimal> {
    let cleaned = s.trim().replace(',', "");
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .ok()
}

/// Parse the timestamp formats the backend emits.
///
/// Accepts RFC 3339 (`2024-03-01T14:30:00Z`), naive date-times
/// (`2024-03-01 14:30:00`), ISO dates (`2024-03-01`) and US dates (`03/01/2024`).
/// Naive values are taken as UTC; dates map to midnight.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }
    for fmt in ["%Y-%m-%d", "%m/%d/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
        }
    }
    None
}
