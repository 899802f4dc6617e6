//! Request and response shapes shared by every transport.

use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::value::RawValue;

use super::tool::ArgumentSet;

/// Payload written when a response cannot be encoded.
pub const SERIALIZATION_FALLBACK: &str =
    r#"{"error":"Internal Server Error Marshalling the Json Result"}"#;

/// Parameters of an `execute` call: `{"tool_name": ..., "arguments": {...}}`.
///
/// `null` anywhere in the structure leaves the corresponding field at its
/// zero value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecuteParams {
    #[serde(default, deserialize_with = "default_if_null")]
    pub tool_name: String,
    #[serde(default, deserialize_with = "default_if_null")]
    pub arguments: ArgumentSet,
}

impl ExecuteParams {
    /// Decode a JSON document; a bare `null` yields the empty parameters.
    pub fn from_json(json: &[u8]) -> serde_json::Result<Self> {
        Ok(serde_json::from_slice::<Option<Self>>(json)?.unwrap_or_default())
    }
}

fn default_if_null<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Successful tool output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToolValue {
    #[serde(serialize_with = "serialize_number")]
    pub value: f64,
}

/// Uniform outcome of a tool invocation.
///
/// Serializes to exactly one of `{"result": {"value": n}}` or
/// `{"error": "message"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DispatchResponse {
    Result(ToolValue),
    Error(String),
}

impl DispatchResponse {
    pub const fn value(value: f64) -> Self {
        Self::Result(ToolValue { value })
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error(message.into())
    }

    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// Encode as compact JSON, substituting [`SERIALIZATION_FALLBACK`] when
    /// the value has no JSON representation.
    pub fn to_json_or_fallback(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            tracing::error!(error = %e, "failed to serialize dispatch response");
            SERIALIZATION_FALLBACK.to_string()
        })
    }
}

/// Numbers print the way Go's `encoding/json` prints a float64: plain
/// decimal (`5`, `0.000005`, `-0`) for magnitudes in `[1e-6, 1e21)`,
/// exponent form (`1e-7`, `1e+21`) outside it. Non-finite values are
/// rejected since JSON cannot carry them.
#[allow(clippy::trivially_copy_pass_by_ref)]
fn serialize_number<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let value = *value;
    if !value.is_finite() {
        return Err(S::Error::custom(format!("unsupported value: {value}")));
    }
    let raw = RawValue::from_string(format_number(value)).map_err(S::Error::custom)?;
    raw.serialize(serializer)
}

fn format_number(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude == 0.0 || (1e-6..1e21).contains(&magnitude) {
        return value.to_string();
    }
    let exponent = format!("{value:e}");
    match exponent.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => format!("{mantissa}e+{power}"),
        _ => exponent,
    }
}
