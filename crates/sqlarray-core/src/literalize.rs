//! Scalar literalization contract.
//!
//! Array serialization delegates scalar rendering to the general
//! value-literalization routine of the calling context. Query builders and
//! drivers implement [`ValueLiteralizer`] with their own rules;
//! [`PgValueLiteralizer`] is the default PostgreSQL-flavored implementation
//! used when the array crates are driven standalone.

use crate::value::Value;

/// The general value-literalization routine of a SQL-generating context.
pub trait ValueLiteralizer {
    /// Append the inline SQL literal for a scalar value.
    fn literal_append(&self, sql: &mut String, value: &Value);

    /// The cast suffix to attach to a placeholder when this value is
    /// automatically converted to a bound parameter, or `None` when the
    /// value is not eligible for auto-parameterization.
    fn auto_param_type(&self, value: &Value) -> Option<&'static str>;
}

/// Default PostgreSQL literal rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct PgValueLiteralizer;

impl ValueLiteralizer for PgValueLiteralizer {
    fn literal_append(&self, sql: &mut String, value: &Value) {
        match value {
            Value::Bool(true) => sql.push_str("true"),
            Value::Bool(false) => sql.push_str("false"),
            Value::SmallInt(i) => sql.push_str(&i.to_string()),
            Value::Int(i) => sql.push_str(&i.to_string()),
            Value::BigInt(i) => sql.push_str(&i.to_string()),
            Value::Float(f) => append_float(sql, f64::from(*f)),
            Value::Double(f) => append_float(sql, *f),
            Value::Decimal(s) => sql.push_str(s),
            Value::Text(s) => {
                sql.push('\'');
                for c in s.chars() {
                    if c == '\'' {
                        sql.push('\'');
                    }
                    sql.push(c);
                }
                sql.push('\'');
            }
            Value::Bytes(b) => {
                sql.push_str("'\\x");
                for byte in b {
                    sql.push_str(&format!("{:02x}", byte));
                }
                sql.push('\'');
            }
        }
    }

    fn auto_param_type(&self, value: &Value) -> Option<&'static str> {
        match value {
            Value::Bool(_) => Some("::boolean"),
            Value::SmallInt(_) => Some("::int2"),
            Value::Int(_) => Some("::int4"),
            Value::BigInt(_) => Some("::int8"),
            Value::Float(_) => Some("::float4"),
            Value::Double(_) => Some("::float8"),
            Value::Decimal(_) => Some("::numeric"),
            Value::Text(_) => Some("::text"),
            Value::Bytes(_) => Some("::bytea"),
        }
    }
}

// PostgreSQL accepts the special float values only in quoted form.
fn append_float(sql: &mut String, f: f64) {
    if f.is_nan() {
        sql.push_str("'NaN'");
    } else if f.is_infinite() {
        sql.push_str(if f > 0.0 { "'Infinity'" } else { "'-Infinity'" });
    } else {
        sql.push_str(&f.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn literal(value: &Value) -> String {
        let mut sql = String::new();
        PgValueLiteralizer.literal_append(&mut sql, value);
        sql
    }

    #[test]
    fn test_numeric_literals() {
        assert_eq!(literal(&Value::Int(42)), "42");
        assert_eq!(literal(&Value::BigInt(-7)), "-7");
        assert_eq!(literal(&Value::Double(1.5)), "1.5");
        assert_eq!(literal(&Value::Decimal("10.25".to_string())), "10.25");
    }

    #[test]
    fn test_string_escaping() {
        assert_eq!(literal(&Value::Text("it's".to_string())), "'it''s'");
        assert_eq!(literal(&Value::Text(String::new())), "''");
    }

    #[test]
    fn test_bytes_hex() {
        assert_eq!(literal(&Value::Bytes(vec![0x41, 0x00, 0xff])), "'\\x4100ff'");
    }

    #[test]
    fn test_special_floats() {
        assert_eq!(literal(&Value::Double(f64::INFINITY)), "'Infinity'");
        assert_eq!(literal(&Value::Double(f64::NEG_INFINITY)), "'-Infinity'");
        assert_eq!(literal(&Value::Double(f64::NAN)), "'NaN'");
    }

    #[test]
    fn test_auto_param_types() {
        let lit = PgValueLiteralizer;
        assert_eq!(lit.auto_param_type(&Value::Int(1)), Some("::int4"));
        assert_eq!(lit.auto_param_type(&Value::Text(String::new())), Some("::text"));
    }
}
