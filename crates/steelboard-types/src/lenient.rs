//! Lenient numeric decoding for upstream series
//!
//! The analytics endpoint occasionally emits `null`, `"NaN"` or `"Infinity"`
//! where a number is expected. Rejecting the whole payload for one bad day
//! would blank every card, so series are decoded leniently: anything that is
//! not a usable number becomes `f64::NAN` and is cleaned later by the mapper.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Convert one JSON value into a (possibly non-finite) `f64`.
///
/// - numbers map to themselves
/// - strings are parsed (`"12.5"`, `"NaN"`, `"Infinity"`, `"-inf"`)
/// - everything else (`null`, bools, objects) maps to NaN
pub fn value_to_f64(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(f64::NAN),
        _ => f64::NAN,
    }
}

/// Deserialize a series, keeping one entry per input element.
///
/// Use with `#[serde(deserialize_with = "lenient::series")]`.
pub fn series<'de, D>(deserializer: D) -> Result<Vec<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<Value>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .iter()
        .map(value_to_f64)
        .collect())
}

/// Deserialize a single number leniently (`null` or malformed -> NaN).
pub fn number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(value_to_f64(&raw))
}
