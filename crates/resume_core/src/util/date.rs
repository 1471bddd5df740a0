//! Calendar date <-> canonical text conversion.
//!
//! # Responsibility
//! - Provide the single textual representation used for dates in every
//!   encoding (ISO-8601 `YYYY-MM-DD`).
//! - Expose a serde adapter so serde-based encodings reuse the same pair.
//!
//! # Invariants
//! - `parse_date(&format_date(d)) == Ok(d)` for every representable date.
//! - No time or timezone component is ever written or accepted.

use chrono::NaiveDate;
use std::error::Error;
use std::fmt::{Display, Formatter};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Returned when a text value is not a valid `YYYY-MM-DD` date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateParseError {
    pub input: String,
}

impl Display for DateParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid date `{}`; expected YYYY-MM-DD", self.input)
    }
}

impl Error for DateParseError {}

/// Formats a date in canonical ISO-8601 form.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parses a date previously produced by [`format_date`].
pub fn parse_date(value: &str) -> Result<NaiveDate, DateParseError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| DateParseError {
        input: value.to_string(),
    })
}

/// Serde adapter: `#[serde(with = "crate::util::date::iso")]`.
pub mod iso {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_date(*date))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        super::parse_date(&text).map_err(serde::de::Error::custom)
    }
}
