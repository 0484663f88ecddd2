//! Scalar value model.

use serde::{Deserialize, Serialize};

/// A scalar database value.
///
/// This is the closed set of element types the array subsystem produces and
/// consumes. Nullness is not a scalar: it is modeled by the element type of
/// the containing array, so every `Value` holds an actual value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Boolean.
    Bool(bool),
    /// 16-bit integer (int2).
    SmallInt(i16),
    /// 32-bit integer (int4).
    Int(i32),
    /// 64-bit integer (int8).
    BigInt(i64),
    /// 32-bit float (float4).
    Float(f32),
    /// 64-bit float (float8).
    Double(f64),
    /// Arbitrary precision numeric, kept in its textual form.
    Decimal(String),
    /// Text / varchar / char.
    Text(String),
    /// Binary data (bytea).
    Bytes(Vec<u8>),
}

impl Value {
    /// Borrow the inner string if this is a text value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Whether this value renders as a quoted string literal.
    ///
    /// Used by the bound-variable formatter to decide which scalars need
    /// array-member quoting.
    #[must_use]
    pub fn is_string_like(&self) -> bool {
        matches!(self, Value::Text(_) | Value::Bytes(_))
    }

    /// Convert to a JSON value for model dumping.
    ///
    /// Non-finite floats have no JSON representation and map to `null`;
    /// decimals stay textual to avoid precision loss; bytes are rendered
    /// as lowercase hex.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::SmallInt(i) => serde_json::Value::from(*i),
            Value::Int(i) => serde_json::Value::from(*i),
            Value::BigInt(i) => serde_json::Value::from(*i),
            Value::Float(f) => serde_json::Number::from_f64(f64::from(*f))
                .map_or(serde_json::Value::Null, serde_json::Value::Number),
            Value::Double(f) => serde_json::Number::from_f64(*f)
                .map_or(serde_json::Value::Null, serde_json::Value::Number),
            Value::Decimal(s) | Value::Text(s) => serde_json::Value::String(s.clone()),
            Value::Bytes(b) => {
                let mut hex = String::with_capacity(b.len() * 2);
                for byte in b {
                    hex.push_str(&format!("{:02x}", byte));
                }
                serde_json::Value::String(hex)
            }
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i16> for Value {
    fn from(v: i16) -> Self {
        Value::SmallInt(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::BigInt(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_str() {
        assert_eq!(Value::Text("abc".to_string()).as_str(), Some("abc"));
        assert_eq!(Value::Int(1).as_str(), None);
    }

    #[test]
    fn test_string_like() {
        assert!(Value::Text(String::new()).is_string_like());
        assert!(Value::Bytes(vec![1]).is_string_like());
        assert!(!Value::BigInt(1).is_string_like());
    }

    #[test]
    fn test_to_json() {
        assert_eq!(Value::Int(5).to_json(), serde_json::json!(5));
        assert_eq!(Value::Bool(true).to_json(), serde_json::json!(true));
        assert_eq!(
            Value::Decimal("1.50".to_string()).to_json(),
            serde_json::json!("1.50")
        );
        assert_eq!(Value::Double(f64::NAN).to_json(), serde_json::Value::Null);
        assert_eq!(Value::Bytes(vec![0xab, 0x01]).to_json(), serde_json::json!("ab01"));
    }

    #[test]
    fn test_from_impls() {
        assert_eq!(Value::from(7i32), Value::Int(7));
        assert_eq!(Value::from("x"), Value::Text("x".to_string()));
    }
}
