//! Lenient field decoding for bodies posted by the dashboard.
//!
//! HTML forms post every input as a string and leave untouched inputs as
//! `""`. These helpers accept both typed JSON values and their string forms,
//! and treat blank strings as absent.

use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, de::Error as _};

/// Decode an optional text field. Blank strings become `None`; numbers are
/// accepted and rendered as text.
pub fn text<'de, D>(de: D) -> Result<Option<String>, D::Error>
where
  D: Deserializer<'de>,
{
  #[derive(Deserialize)]
  #[serde(untagged)]
  enum Raw {
    Text(String),
    Number(serde_json::Number),
  }

  Ok(match Option::<Raw>::deserialize(de)? {
    None => None,
    Some(Raw::Number(n)) => Some(n.to_string()),
    Some(Raw::Text(s)) => {
      let trimmed = s.trim();
      (!trimmed.is_empty()).then(|| trimmed.to_owned())
    }
  })
}

/// Decode an optional numeric field given either as a JSON number or as a
/// numeric string. Blank strings become `None`.
pub fn number<'de, D, T>(de: D) -> Result<Option<T>, D::Error>
where
  D: Deserializer<'de>,
  T: Deserialize<'de> + FromStr,
  T::Err: Display,
{
  #[derive(Deserialize)]
  #[serde(untagged)]
  enum Raw<N> {
    Typed(N),
    Text(String),
  }

  match Option::<Raw<T>>::deserialize(de)? {
    None => Ok(None),
    Some(Raw::Typed(v)) => Ok(Some(v)),
    Some(Raw::Text(s)) => {
      let trimmed = s.trim();
      if trimmed.is_empty() {
        return Ok(None);
      }
      trimmed
        .parse()
        .map(Some)
        .map_err(|e| D::Error::custom(format!("invalid number {trimmed:?}: {e}")))
    }
  }
}

/// Decode an optional date field. Blank strings become `None`; anything
/// else must be accepted by [`parse_date`].
pub fn date<'de, D>(de: D) -> Result<Option<NaiveDate>, D::Error>
where
  D: Deserializer<'de>,
{
  match text(de)? {
    None => Ok(None),
    Some(s) => parse_date(&s)
      .map(Some)
      .ok_or_else(|| D::Error::custom(format!("invalid date {s:?}"))),
  }
}

// ─── Partial updates ─────────────────────────────────────────────────────────
//
// Used with `#[serde(default)]`: an absent key decodes to `None` (keep), while
// `null` or `""` decodes to `Some(None)` (clear).

pub fn patch_text<'de, D>(de: D) -> Result<Option<Option<String>>, D::Error>
where
  D: Deserializer<'de>,
{
  text(de).map(Some)
}

pub fn patch_date<'de, D>(de: D) -> Result<Option<Option<NaiveDate>>, D::Error>
where
  D: Deserializer<'de>,
{
  date(de).map(Some)
}

pub fn patch_number<'de, D, T>(de: D) -> Result<Option<Option<T>>, D::Error>
where
  D: Deserializer<'de>,
  T: Deserialize<'de> + FromStr,
  T::Err: Display,
{
  number(de).map(Some)
}

/// Parse a calendar date given as `YYYY-MM-DD` or as an RFC 3339 timestamp
/// (whose date part is used).
pub fn parse_date(s: &str) -> Option<NaiveDate> {
  let s = s.trim();
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .ok()
    .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
}
