//! Loosely-typed scalars found in Schedules Direct payloads.
//!
//! The service is inconsistent about quoting numbers and booleans and
//! about date precision. These types accept every observed spelling and
//! re-encode in a stable form.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

/// Strips one pair of surrounding double quotes, if present.
fn unquote(raw: &[u8]) -> (&[u8], bool) {
    match raw {
        [b'"', inner @ .., b'"'] => (inner, true),
        _ => (raw, false),
    }
}

/// Precision a [`Date`] was written with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatePrecision {
    /// `YYYY`
    Year,
    /// `YYYY-MM-DD`
    Day,
}

/// A calendar date written as `"YYYY"` or `"YYYY-MM-DD"`.
///
/// Year-only dates resolve to January 1st of that year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Date {
    date: NaiveDate,
    precision: DatePrecision,
}

impl Date {
    /// Creates a day-precision date.
    #[must_use]
    pub const fn from_date(date: NaiveDate) -> Self {
        Self {
            date,
            precision: DatePrecision::Day,
        }
    }

    /// Creates a year-precision date.
    #[must_use]
    pub fn from_year(year: i32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, 1, 1).map(|date| Self {
            date,
            precision: DatePrecision::Year,
        })
    }

    /// Returns the calendar date.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns the precision the value was written with.
    #[must_use]
    pub const fn precision(&self) -> DatePrecision {
        self.precision
    }

    /// Parses the unquoted text of a date.
    fn parse_str(text: &str) -> Option<Self> {
        if text.len() == 4 {
            let year = text.parse::<i32>().ok()?;
            return Self::from_year(year);
        }
        let day = text.get(..10)?;
        NaiveDate::parse_from_str(day, "%Y-%m-%d")
            .ok()
            .map(Self::from_date)
    }

    /// Decodes a JSON date literal.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if the literal is neither `YYYY` nor
    /// `YYYY-MM-DD`.
    pub fn decode(raw: &[u8]) -> Result<Self> {
        let (inner, _) = unquote(raw.trim_ascii());
        std::str::from_utf8(inner)
            .ok()
            .and_then(Self::parse_str)
            .ok_or_else(|| {
                Error::decode(
                    format!(
                        "date should be YYYY or YYYY-MM-DD, got {}",
                        String::from_utf8_lossy(raw)
                    ),
                    raw,
                )
            })
    }

    /// Encodes as a quoted JSON string with the original precision.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        format!("\"{self}\"").into_bytes()
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.precision {
            DatePrecision::Year => write!(f, "{:04}", self.date.year()),
            DatePrecision::Day => write!(f, "{}", self.date.format("%Y-%m-%d")),
        }
    }
}

impl Serialize for Date {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Date {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse_str(&text).ok_or_else(|| {
            de::Error::custom(format!("date should be YYYY or YYYY-MM-DD, got {text:?}"))
        })
    }
}

/// An integer that may arrive quoted, with whitespace inside the quotes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct JsonInt(pub i64);

impl JsonInt {
    /// Returns the integer value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }

    /// Decodes a bare or quoted integer literal.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if the trimmed literal is not a base-10
    /// integer.
    pub fn decode(raw: &[u8]) -> Result<Self> {
        let trimmed = raw.trim_ascii();
        let (inner, _) = unquote(trimmed);
        std::str::from_utf8(inner)
            .ok()
            .and_then(|s| s.trim().parse::<i64>().ok())
            .map(Self)
            .ok_or_else(|| {
                Error::decode(
                    format!("invalid integer literal {}", String::from_utf8_lossy(raw)),
                    raw,
                )
            })
    }

    /// Encodes as a bare JSON integer.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        self.0.to_string().into_bytes()
    }
}

impl From<i64> for JsonInt {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for JsonInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl Serialize for JsonInt {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.0)
    }
}

impl<'de> Deserialize<'de> for JsonInt {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(JsonIntVisitor)
    }
}

/// Accepts `42` or `" 42 "`.
struct JsonIntVisitor;

impl Visitor<'_> for JsonIntVisitor {
    type Value = JsonInt;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an integer or a quoted integer")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Self::Value, E> {
        Ok(JsonInt(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Self::Value, E> {
        i64::try_from(v)
            .map(JsonInt)
            .map_err(|_| E::custom(format!("integer out of range: {v}")))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Self::Value, E> {
        v.trim()
            .parse::<i64>()
            .map(JsonInt)
            .map_err(|_| E::custom(format!("invalid quoted integer: {v:?}")))
    }
}

/// A boolean written as `0`/`1`, `true`/`false` or `yes`/`no`, quoted or not.
///
/// Remembers whether it was quoted so that re-encoding keeps the same shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ConvertibleBoolean {
    value: bool,
    quoted: bool,
}

impl ConvertibleBoolean {
    /// Creates an unquoted value.
    #[must_use]
    pub const fn new(value: bool) -> Self {
        Self {
            value,
            quoted: false,
        }
    }

    /// Returns the boolean value.
    #[must_use]
    pub const fn get(self) -> bool {
        self.value
    }

    /// Returns `true` if the value was read from a quoted literal.
    #[must_use]
    pub const fn is_quoted(self) -> bool {
        self.quoted
    }

    fn parse_word(word: &str) -> Option<bool> {
        match word {
            "1" | "true" | "yes" => Some(true),
            "0" | "false" | "no" => Some(false),
            _ => None,
        }
    }

    /// Decodes any accepted spelling.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] for anything other than `0`, `1`, `true`,
    /// `false`, `yes` or `no`.
    pub fn decode(raw: &[u8]) -> Result<Self> {
        let quoted = raw.contains(&b'"');
        let word: String = String::from_utf8_lossy(raw)
            .chars()
            .filter(|c| *c != '"')
            .collect();
        Self::parse_word(&word)
            .map(|value| Self { value, quoted })
            .ok_or_else(|| Error::decode(format!("invalid boolean literal {word:?}"), raw))
    }

    /// Encodes as `0`/`1`, quoted if the source was quoted.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let digit = if self.value { "1" } else { "0" };
        if self.quoted {
            format!("\"{digit}\"").into_bytes()
        } else {
            digit.as_bytes().to_vec()
        }
    }
}

impl From<bool> for ConvertibleBoolean {
    fn from(value: bool) -> Self {
        Self::new(value)
    }
}

impl Serialize for ConvertibleBoolean {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match (self.quoted, self.value) {
            (true, true) => serializer.serialize_str("1"),
            (true, false) => serializer.serialize_str("0"),
            (false, value) => serializer.serialize_u8(u8::from(value)),
        }
    }
}

impl<'de> Deserialize<'de> for ConvertibleBoolean {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(ConvertibleBooleanVisitor)
    }
}

/// Accepts every spelling handled by [`ConvertibleBoolean::decode`].
struct ConvertibleBooleanVisitor;

impl Visitor<'_> for ConvertibleBooleanVisitor {
    type Value = ConvertibleBoolean;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("0, 1, true, false, yes or no")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<Self::Value, E> {
        Ok(ConvertibleBoolean::new(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Self::Value, E> {
        match v {
            0 => Ok(ConvertibleBoolean::new(false)),
            1 => Ok(ConvertibleBoolean::new(true)),
            _ => Err(E::custom(format!("invalid boolean integer: {v}"))),
        }
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Self::Value, E> {
        u64::try_from(v)
            .map_err(|_| E::custom(format!("invalid boolean integer: {v}")))
            .and_then(|v| self.visit_u64(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Self::Value, E> {
        ConvertibleBoolean::parse_word(v)
            .map(|value| ConvertibleBoolean {
                value,
                quoted: true,
            })
            .ok_or_else(|| E::custom(format!("invalid boolean string: {v:?}")))
    }
}
