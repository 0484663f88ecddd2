//! Scalar typecasting for arrays built from plain sequences.
//!
//! When application code hands the registry a plain nested sequence instead
//! of parsed catalog text, each member is converted with the scalar cast
//! registered for the array type. Parsed arrays never pass through here;
//! their elements were already materialized by the conversion proc.

use serde::{Deserialize, Serialize};
use sqlarray_core::{Error, Result, Value};

use crate::array::{ArrayElement, SqlArray};

/// The per-element conversion applied when constructing a typed array from
/// a plain sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScalarTypecast {
    /// Cast members to integers.
    Integer,
    /// Cast members to double precision floats.
    Float,
    /// Cast members to arbitrary precision numerics.
    Decimal,
    /// Cast members to text.
    String,
    /// Cast members to booleans.
    Boolean,
    /// Cast members to binary data.
    Blob,
    /// Date members stay textual; the cast validates nothing further.
    Date,
    /// Time members stay textual.
    Time,
    /// Timestamp members stay textual.
    Datetime,
}

impl ScalarTypecast {
    /// Resolve the cast implied by a schema type symbol.
    ///
    /// Returns `None` for symbols with no member cast; those members pass
    /// through untouched, exactly like an unregistered cast method.
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "integer" => Some(ScalarTypecast::Integer),
            "float" => Some(ScalarTypecast::Float),
            "decimal" => Some(ScalarTypecast::Decimal),
            "string" => Some(ScalarTypecast::String),
            "boolean" => Some(ScalarTypecast::Boolean),
            "blob" => Some(ScalarTypecast::Blob),
            "date" => Some(ScalarTypecast::Date),
            "time" => Some(ScalarTypecast::Time),
            "datetime" => Some(ScalarTypecast::Datetime),
            _ => None,
        }
    }

    /// Apply this cast to one element, recursing through nested arrays.
    /// Null always passes through.
    pub fn apply(&self, element: ArrayElement) -> Result<ArrayElement> {
        match element {
            ArrayElement::Null => Ok(ArrayElement::Null),
            ArrayElement::Scalar(value) => Ok(ArrayElement::Scalar(self.apply_scalar(value)?)),
            ArrayElement::Array(array) => {
                let tag = array.array_type().map(String::from);
                let elements = array
                    .into_elements()
                    .into_iter()
                    .map(|e| self.apply(e))
                    .collect::<Result<Vec<_>>>()?;
                Ok(ArrayElement::Array(match tag {
                    Some(t) => SqlArray::typed(elements, t),
                    None => SqlArray::new(elements),
                }))
            }
        }
    }

    fn apply_scalar(&self, value: Value) -> Result<Value> {
        match self {
            ScalarTypecast::Integer => match value {
                Value::SmallInt(_) | Value::Int(_) | Value::BigInt(_) => Ok(value),
                Value::Float(f) => Ok(Value::BigInt(f as i64)),
                Value::Double(f) => Ok(Value::BigInt(f as i64)),
                Value::Text(s) => s
                    .parse::<i64>()
                    .map(Value::BigInt)
                    .map_err(|_| Error::Conversion(format!("invalid integer: {}", s))),
                other => Err(Error::Conversion(format!("cannot cast {:?} to integer", other))),
            },
            ScalarTypecast::Float => match value {
                Value::Float(_) | Value::Double(_) => Ok(value),
                Value::SmallInt(i) => Ok(Value::Double(f64::from(i))),
                Value::Int(i) => Ok(Value::Double(f64::from(i))),
                Value::BigInt(i) => Ok(Value::Double(i as f64)),
                Value::Text(s) => s
                    .parse::<f64>()
                    .map(Value::Double)
                    .map_err(|_| Error::Conversion(format!("invalid float: {}", s))),
                other => Err(Error::Conversion(format!("cannot cast {:?} to float", other))),
            },
            ScalarTypecast::Decimal => match value {
                Value::Decimal(_) => Ok(value),
                Value::SmallInt(i) => Ok(Value::Decimal(i.to_string())),
                Value::Int(i) => Ok(Value::Decimal(i.to_string())),
                Value::BigInt(i) => Ok(Value::Decimal(i.to_string())),
                Value::Float(f) => Ok(Value::Decimal(f.to_string())),
                Value::Double(f) => Ok(Value::Decimal(f.to_string())),
                Value::Text(s) => {
                    if s.parse::<f64>().is_ok() {
                        Ok(Value::Decimal(s))
                    } else {
                        Err(Error::Conversion(format!("invalid decimal: {}", s)))
                    }
                }
                other => Err(Error::Conversion(format!("cannot cast {:?} to decimal", other))),
            },
            ScalarTypecast::String => match value {
                Value::Text(_) => Ok(value),
                Value::Decimal(s) => Ok(Value::Text(s)),
                Value::Bool(b) => Ok(Value::Text(b.to_string())),
                Value::SmallInt(i) => Ok(Value::Text(i.to_string())),
                Value::Int(i) => Ok(Value::Text(i.to_string())),
                Value::BigInt(i) => Ok(Value::Text(i.to_string())),
                Value::Float(f) => Ok(Value::Text(f.to_string())),
                Value::Double(f) => Ok(Value::Text(f.to_string())),
                Value::Bytes(b) => Ok(Value::Text(String::from_utf8_lossy(&b).into_owned())),
            },
            ScalarTypecast::Boolean => match value {
                Value::Bool(_) => Ok(value),
                Value::Text(s) => match s.to_ascii_lowercase().as_str() {
                    "t" | "true" | "y" | "yes" | "on" | "1" => Ok(Value::Bool(true)),
                    "f" | "false" | "n" | "no" | "off" | "0" => Ok(Value::Bool(false)),
                    _ => Err(Error::Conversion(format!("invalid boolean: {}", s))),
                },
                other => Err(Error::Conversion(format!("cannot cast {:?} to boolean", other))),
            },
            ScalarTypecast::Blob => match value {
                Value::Bytes(_) => Ok(value),
                Value::Text(s) => Ok(Value::Bytes(s.into_bytes())),
                other => Err(Error::Conversion(format!("cannot cast {:?} to blob", other))),
            },
            // Calendar values stay textual; only text passes through.
            ScalarTypecast::Date | ScalarTypecast::Time | ScalarTypecast::Datetime => match value {
                Value::Text(_) => Ok(value),
                other => Err(Error::Conversion(format!("cannot cast {:?} to a calendar type", other))),
            },
        }
    }
}
