//! Default policy for snapshot fields.
//!
//! Every field of the telemetry snapshot falls back to one of three defaults
//! when it is missing or cannot be decoded. The helpers here are the only
//! place those literals live; snapshot types reference them through
//! `#[serde(default = ..., deserialize_with = ...)]`.

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Numeric fields: counts, frequencies, percentages, readings.
pub const DEFAULT_NUMBER: f64 = 0.0;
/// Text fields: names, profiles, governors.
pub const DEFAULT_TEXT: &str = "unknown";
/// Flag fields: online, enabled, critical.
pub const DEFAULT_FLAG: bool = false;

pub fn number() -> f64 {
    DEFAULT_NUMBER
}

pub fn text() -> String {
    DEFAULT_TEXT.to_string()
}

pub fn flag() -> bool {
    DEFAULT_FLAG
}

/// Interpret a JSON value as a finite number.
///
/// Numbers and numeric strings parse; booleans map to 0/1. Everything else,
/// including NaN and infinities, is `None`.
pub fn as_number(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

pub fn number_or_default(value: &Value) -> f64 {
    as_number(value).unwrap_or(DEFAULT_NUMBER)
}

/// Interpret a JSON value as a flag.
pub fn as_flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|v| v != 0.0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "on" | "yes" | "1" | "running" | "active" | "enabled" => Some(true),
            "false" | "off" | "no" | "0" | "inactive" | "disabled" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

pub fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

pub fn lenient_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(number_or_default(&value))
}

pub fn lenient_optional_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(as_number(&value))
}

pub fn lenient_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(as_flag(&value).unwrap_or(DEFAULT_FLAG))
}

/// Only a genuine boolean counts; numeric thresholds sharing the key are ignored.
pub fn strict_optional_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_bool())
}

pub fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(as_text(&value).unwrap_or_else(text))
}

/// An optional block where `null` and `{}` both mean "not reported".
pub fn non_empty_object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::Object(map) if map.is_empty() => Ok(None),
        other => serde_json::from_value(other).map(Some).map_err(D::Error::custom),
    }
}

/// Accept either a single number or a list of numbers.
pub fn lenient_number_list<'de, D>(deserializer: D) -> Result<Vec<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let numbers = match value {
        Value::Array(items) => items.iter().map(number_or_default).collect(),
        Value::Null => Vec::new(),
        other => as_number(&other).into_iter().collect(),
    };
    Ok(numbers)
}
