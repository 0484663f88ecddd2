//! Bound-variable array formatting.
//!
//! When an array is sent as an out-of-band parameter rather than inlined
//! into SQL, the server expects the catalog's own brace-nested text format
//! with double-quote escaping. That format is the same for every dialect,
//! unlike the inline constructor literal.

use sqlarray_core::{Value, ValueLiteralizer};

use crate::array::{ArrayElement, SqlArray};

/// Format an array as bound-variable text.
#[must_use]
pub fn bound_variable_array(array: &SqlArray, literalizer: &dyn ValueLiteralizer) -> String {
    let mut out = String::new();
    append_array(&mut out, array.elements(), literalizer);
    out
}

fn append_array(out: &mut String, elements: &[ArrayElement], literalizer: &dyn ValueLiteralizer) {
    out.push('{');
    let mut comma = false;
    for element in elements {
        if comma {
            out.push(',');
        }
        append_member(out, element, literalizer);
        comma = true;
    }
    out.push('}');
}

fn append_member(out: &mut String, element: &ArrayElement, literalizer: &dyn ValueLiteralizer) {
    match element {
        ArrayElement::Null => out.push_str("NULL"),
        ArrayElement::Array(nested) => append_array(out, nested.elements(), literalizer),
        ArrayElement::Scalar(value) => match value {
            Value::Text(s) => append_quoted(out, s),
            Value::Bytes(_) => {
                // The binary literal with its outer quote markers stripped
                // and embedded doubled quotes un-doubled, then escaped as an
                // array member.
                let mut raw = String::new();
                literalizer.literal_append(&mut raw, value);
                let inner = strip_outer_quotes(&raw).replace("''", "'");
                append_quoted(out, &inner);
            }
            Value::Float(f) if !f.is_finite() => append_nonfinite(out, f64::from(*f)),
            Value::Double(f) if !f.is_finite() => append_nonfinite(out, *f),
            _ => literalizer.literal_append(out, value),
        },
    }
}

// The server only accepts the special float values as quoted tokens inside
// array text.
fn append_nonfinite(out: &mut String, f: f64) {
    if f.is_nan() {
        out.push_str("\"NaN\"");
    } else if f > 0.0 {
        out.push_str("\"Infinity\"");
    } else {
        out.push_str("\"-Infinity\"");
    }
}

/// Escape a string used as an array member: wrap in double quotes and
/// backslash-escape embedded `"` and `\`.
fn append_quoted(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
}

fn strip_outer_quotes(s: &str) -> &str {
    s.strip_prefix('\'')
        .and_then(|rest| rest.strip_suffix('\''))
        .unwrap_or(s)
}
