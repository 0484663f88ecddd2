//! Target dialect tag.

use serde::{Deserialize, Serialize};

/// The array syntax family a piece of SQL is being generated for or parsed
/// from.
///
/// This tag is selected once per call by the caller; nothing in the core
/// consults ambient state to decide which syntax applies. Surrounding SQL
/// generators that only need to branch on the target database read this
/// same tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Dialect {
    /// PostgreSQL: brace-delimited catalog output, `ARRAY[...]` constructor
    /// syntax, `::type[]` casts.
    #[default]
    Postgres,
    /// Amazon Redshift: bracket-delimited catalog output, `ARRAY(...)`
    /// constructor syntax, no array cast syntax.
    Redshift,
}

impl Dialect {
    /// Lowercase adapter-scheme style name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Dialect::Postgres => "postgres",
            Dialect::Redshift => "redshift",
        }
    }

    /// Whether the dialect accepts a `::type[]` cast suffix on array
    /// constructors. Redshift has no cast syntax for this construct.
    #[must_use]
    pub const fn supports_array_casts(self) -> bool {
        matches!(self, Dialect::Postgres)
    }
}
