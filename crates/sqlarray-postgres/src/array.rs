//! Array value model.

use serde::{Deserialize, Serialize};
use sqlarray_core::{Dialect, Value, ValueLiteralizer};

/// One member of an array: a scalar, the null marker, or a nested array.
///
/// This is a closed set; formatting code matches on it exhaustively instead
/// of probing runtime types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ArrayElement {
    /// SQL NULL.
    Null,
    /// A scalar value.
    Scalar(Value),
    /// A nested array.
    Array(SqlArray),
}

impl ArrayElement {
    /// Convert to a JSON value for model dumping.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            ArrayElement::Null => serde_json::Value::Null,
            ArrayElement::Scalar(v) => v.to_json(),
            ArrayElement::Array(a) => a.to_json(),
        }
    }
}

impl From<Value> for ArrayElement {
    fn from(v: Value) -> Self {
        ArrayElement::Scalar(v)
    }
}

impl From<SqlArray> for ArrayElement {
    fn from(a: SqlArray) -> Self {
        ArrayElement::Array(a)
    }
}

impl From<Vec<ArrayElement>> for ArrayElement {
    fn from(elements: Vec<ArrayElement>) -> Self {
        ArrayElement::Array(SqlArray::new(elements))
    }
}

/// An array column value with an optional element type tag.
///
/// The tag names the underlying element type, not the array type itself
/// (for an `int4[]` column it is `int4`). When present, a `::type[]` cast
/// is appended while literalizing for PostgreSQL; Redshift never receives
/// a cast. Arrays are immutable once constructed; serialization never
/// mutates the source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SqlArray {
    elements: Vec<ArrayElement>,
    array_type: Option<String>,
}

impl SqlArray {
    /// Create an untagged array.
    #[must_use]
    pub fn new(elements: Vec<ArrayElement>) -> Self {
        Self {
            elements,
            array_type: None,
        }
    }

    /// Create an array tagged with its element type.
    #[must_use]
    pub fn typed(elements: Vec<ArrayElement>, array_type: impl Into<String>) -> Self {
        Self {
            elements,
            array_type: Some(array_type.into()),
        }
    }

    /// Create an empty array tagged with its element type.
    #[must_use]
    pub fn empty(array_type: impl Into<String>) -> Self {
        Self::typed(Vec::new(), array_type)
    }

    /// The element type tag, if any.
    #[must_use]
    pub fn array_type(&self) -> Option<&str> {
        self.array_type.as_deref()
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the array has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Borrow the elements.
    #[must_use]
    pub fn elements(&self) -> &[ArrayElement] {
        &self.elements
    }

    /// Borrow an element by index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ArrayElement> {
        self.elements.get(index)
    }

    /// Iterate over the elements.
    pub fn iter(&self) -> std::slice::Iter<'_, ArrayElement> {
        self.elements.iter()
    }

    /// Consume the array, returning its elements.
    #[must_use]
    pub fn into_elements(self) -> Vec<ArrayElement> {
        self.elements
    }

    /// Return the same elements under a different element type tag.
    #[must_use]
    pub fn retagged(self, array_type: impl Into<String>) -> Self {
        Self {
            elements: self.elements,
            array_type: Some(array_type.into()),
        }
    }

    /// Append this array as a SQL literal for the given dialect.
    ///
    /// See [`crate::literal`] for the dialect-specific constructor syntax.
    pub fn literal_append(
        &self,
        sql: &mut String,
        dialect: Dialect,
        literalizer: &dyn ValueLiteralizer,
    ) {
        crate::literal::array_literal_append(sql, self, dialect, literalizer);
    }

    /// The cast suffix to attach to a placeholder if this array is eligible
    /// for automatic bind-parameter substitution, or `None` otherwise.
    #[must_use]
    pub fn auto_param_type(
        &self,
        dialect: Dialect,
        literalizer: &dyn ValueLiteralizer,
    ) -> Option<String> {
        crate::literal::array_auto_param_type(self, dialect, literalizer)
    }

    /// Format this array as bound-variable text.
    #[must_use]
    pub fn to_bound_variable(&self, literalizer: &dyn ValueLiteralizer) -> String {
        crate::bound::bound_variable_array(self, literalizer)
    }

    /// Convert to a JSON array for model dumping.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Array(self.elements.iter().map(ArrayElement::to_json).collect())
    }
}

impl From<Vec<ArrayElement>> for SqlArray {
    fn from(elements: Vec<ArrayElement>) -> Self {
        Self::new(elements)
    }
}

impl<'a> IntoIterator for &'a SqlArray {
    type Item = &'a ArrayElement;
    type IntoIter = std::slice::Iter<'a, ArrayElement>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}
