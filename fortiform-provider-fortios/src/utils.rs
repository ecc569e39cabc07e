//! Identifier decoding for `mkey` values returned by the API

use serde_json::Value as JsonValue;
use thiserror::Error;

/// Errors decoding an object identifier
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IdentifierError {
    #[error("Identifier '{0}' is not numeric")]
    NotNumeric(String),

    #[error("Identifier {0} is not an integer")]
    NotIntegral(f64),

    #[error("Identifier {0} is out of range")]
    OutOfRange(String),

    #[error("Identifier has unsupported type {0}")]
    UnexpectedType(&'static str),
}

/// Decode a numeric key (e.g. a policy id, usually sent as `3.0`)
///
/// `null` and `""` mean the response carried no key.
pub fn decode_numeric_mkey(value: &JsonValue) -> Result<Option<String>, IdentifierError> {
    match value {
        JsonValue::Null => Ok(None),
        JsonValue::String(s) if s.is_empty() => Ok(None),
        JsonValue::String(s) => s
            .trim()
            .parse::<i64>()
            .map(|n| Some(n.to_string()))
            .map_err(|_| IdentifierError::NotNumeric(s.clone())),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Ok(Some(i.to_string()));
            }
            if n.is_u64() {
                return Err(IdentifierError::OutOfRange(n.to_string()));
            }
            let f = n
                .as_f64()
                .ok_or_else(|| IdentifierError::OutOfRange(n.to_string()))?;
            if !f.is_finite() || f < i64::MIN as f64 || f >= i64::MAX as f64 {
                Err(IdentifierError::OutOfRange(n.to_string()))
            } else if f.fract() != 0.0 {
                Err(IdentifierError::NotIntegral(f))
            } else {
                Ok(Some((f as i64).to_string()))
            }
        }
        JsonValue::Bool(_) => Err(IdentifierError::UnexpectedType("Bool")),
        JsonValue::Array(_) => Err(IdentifierError::UnexpectedType("List")),
        JsonValue::Object(_) => Err(IdentifierError::UnexpectedType("Map")),
    }
}

/// Decode a name key (singleton or name-keyed objects)
pub fn decode_name_mkey(value: &JsonValue) -> Result<Option<String>, IdentifierError> {
    match value {
        JsonValue::String(s) if s.is_empty() => Ok(None),
        JsonValue::String(s) => Ok(Some(s.clone())),
        _ => decode_numeric_mkey(value),
    }
}
