//! Array literal serializer.
//!
//! Renders a [`SqlArray`] as the `ARRAY` constructor literal of the target
//! dialect. Note the asymmetry with [`crate::parse`]: PostgreSQL *emits*
//! brace-delimited text but *accepts* bracket-nested constructor syntax, so
//! serialization uses `ARRAY[...]` on PostgreSQL and `ARRAY(...)` on
//! Redshift.

use sqlarray_core::{Dialect, ValueLiteralizer};

use crate::array::{ArrayElement, SqlArray};

/// Constructor syntax for one dialect.
trait ArrayStyle {
    fn nest_open(&self) -> char;
    fn nest_close(&self) -> char;
    /// Whether a `::type[]` suffix may follow the constructor.
    fn cast_supported(&self) -> bool;
}

struct PostgresStyle;

impl ArrayStyle for PostgresStyle {
    fn nest_open(&self) -> char {
        '['
    }

    fn nest_close(&self) -> char {
        ']'
    }

    fn cast_supported(&self) -> bool {
        true
    }
}

struct RedshiftStyle;

impl ArrayStyle for RedshiftStyle {
    fn nest_open(&self) -> char {
        '('
    }

    fn nest_close(&self) -> char {
        ')'
    }

    fn cast_supported(&self) -> bool {
        false
    }
}

fn style_for(dialect: Dialect) -> &'static dyn ArrayStyle {
    match dialect {
        Dialect::Postgres => &PostgresStyle,
        Dialect::Redshift => &RedshiftStyle,
    }
}

/// Append the SQL literal for an array.
///
/// An empty array with a known element type renders as the `'{}'` literal;
/// on PostgreSQL a `::type[]` cast follows whenever the type tag is present.
/// Scalar elements delegate to the caller's literalization routine.
pub fn array_literal_append(
    sql: &mut String,
    array: &SqlArray,
    dialect: Dialect,
    literalizer: &dyn ValueLiteralizer,
) {
    tracing::trace!(
        dialect = dialect.name(),
        elements = array.len(),
        "literalizing array"
    );

    let style = style_for(dialect);
    if array.is_empty() && array.array_type().is_some() {
        sql.push_str("'{}'");
    } else {
        sql.push_str("ARRAY");
        nested_append(sql, array.elements(), style, literalizer);
    }
    if style.cast_supported() {
        if let Some(array_type) = array.array_type() {
            sql.push_str("::");
            sql.push_str(array_type);
            sql.push_str("[]");
        }
    }
}

// Multi-dimensional arrays surround each level with the style's delimiters
// and intersperse entries with commas.
fn nested_append(
    sql: &mut String,
    elements: &[ArrayElement],
    style: &dyn ArrayStyle,
    literalizer: &dyn ValueLiteralizer,
) {
    sql.push(style.nest_open());
    let mut comma = false;
    for element in elements {
        if comma {
            sql.push(',');
        }
        match element {
            ArrayElement::Null => sql.push_str("NULL"),
            ArrayElement::Scalar(value) => literalizer.literal_append(sql, value),
            ArrayElement::Array(nested) => {
                nested_append(sql, nested.elements(), style, literalizer);
            }
        }
        comma = true;
    }
    sql.push(style.nest_close());
}

/// The cast suffix for automatic bind-parameter substitution.
///
/// An array is eligible only if it carries a type tag, every element is
/// null or itself eligible, and the target dialect has a parameterized
/// array cast syntax (Redshift does not).
#[must_use]
pub fn array_auto_param_type(
    array: &SqlArray,
    dialect: Dialect,
    literalizer: &dyn ValueLiteralizer,
) -> Option<String> {
    let array_type = array.array_type()?;
    if !dialect.supports_array_casts() {
        return None;
    }
    let eligible = array.iter().all(|element| match element {
        ArrayElement::Null => true,
        ArrayElement::Scalar(value) => literalizer.auto_param_type(value).is_some(),
        ArrayElement::Array(nested) => {
            array_auto_param_type(nested, dialect, literalizer).is_some()
        }
    });
    eligible.then(|| format!("::{}[]", array_type))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlarray_core::{PgValueLiteralizer, Value};

    fn literal(array: &SqlArray, dialect: Dialect) -> String {
        let mut sql = String::new();
        array_literal_append(&mut sql, array, dialect, &PgValueLiteralizer);
        sql
    }

    fn ints(values: &[i32]) -> Vec<ArrayElement> {
        values
            .iter()
            .map(|i| ArrayElement::Scalar(Value::Int(*i)))
            .collect()
    }

    #[test]
    fn test_postgres_constructor_with_cast() {
        let array = SqlArray::typed(ints(&[1, 2, 3]), "int4");
        assert_eq!(literal(&array, Dialect::Postgres), "ARRAY[1,2,3]::int4[]");
    }

    #[test]
    fn test_redshift_never_casts() {
        let array = SqlArray::typed(ints(&[1, 2, 3]), "int4");
        assert_eq!(literal(&array, Dialect::Redshift), "ARRAY(1,2,3)");
    }

    #[test]
    fn test_untagged_has_no_cast() {
        let array = SqlArray::new(ints(&[1]));
        assert_eq!(literal(&array, Dialect::Postgres), "ARRAY[1]");
    }

    #[test]
    fn test_empty_with_type() {
        let array = SqlArray::empty("decimal");
        assert_eq!(literal(&array, Dialect::Postgres), "'{}'::decimal[]");
        assert_eq!(literal(&array, Dialect::Redshift), "'{}'");
    }

    #[test]
    fn test_empty_without_type() {
        let array = SqlArray::new(Vec::new());
        assert_eq!(literal(&array, Dialect::Postgres), "ARRAY[]");
        assert_eq!(literal(&array, Dialect::Redshift), "ARRAY()");
    }

    #[test]
    fn test_nested_structural_bracketing() {
        let array = SqlArray::new(vec![
            ArrayElement::Array(SqlArray::new(ints(&[1, 2]))),
            ArrayElement::Array(SqlArray::new(ints(&[3, 4]))),
        ]);
        assert_eq!(literal(&array, Dialect::Postgres), "ARRAY[[1,2],[3,4]]");
        assert_eq!(literal(&array, Dialect::Redshift), "ARRAY((1,2),(3,4))");
    }

    #[test]
    fn test_null_elements() {
        let array = SqlArray::typed(
            vec![ArrayElement::Scalar(Value::Int(1)), ArrayElement::Null],
            "int4",
        );
        assert_eq!(literal(&array, Dialect::Postgres), "ARRAY[1,NULL]::int4[]");
    }

    #[test]
    fn test_string_elements_delegate_to_literalizer() {
        let array = SqlArray::new(vec![ArrayElement::Scalar(Value::Text("a'b".to_string()))]);
        assert_eq!(literal(&array, Dialect::Postgres), "ARRAY['a''b']");
    }

    #[test]
    fn test_auto_param_requires_tag_and_dialect() {
        let lit = PgValueLiteralizer;
        let tagged = SqlArray::typed(ints(&[1]), "int4");
        assert_eq!(
            array_auto_param_type(&tagged, Dialect::Postgres, &lit),
            Some("::int4[]".to_string())
        );
        assert_eq!(array_auto_param_type(&tagged, Dialect::Redshift, &lit), None);

        let untagged = SqlArray::new(ints(&[1]));
        assert_eq!(array_auto_param_type(&untagged, Dialect::Postgres, &lit), None);
    }

    #[test]
    fn test_auto_param_nested_eligibility() {
        let lit = PgValueLiteralizer;
        let nested_tagged = SqlArray::typed(
            vec![
                ArrayElement::Null,
                ArrayElement::Array(SqlArray::typed(ints(&[2]), "int4")),
            ],
            "int4",
        );
        assert_eq!(
            array_auto_param_type(&nested_tagged, Dialect::Postgres, &lit),
            Some("::int4[]".to_string())
        );

        // An untagged nested array is not itself eligible.
        let nested_untagged = SqlArray::typed(
            vec![ArrayElement::Array(SqlArray::new(ints(&[2])))],
            "int4",
        );
        assert_eq!(
            array_auto_param_type(&nested_untagged, Dialect::Postgres, &lit),
            None
        );
    }
}
