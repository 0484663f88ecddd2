//! PostgreSQL and Redshift array literal support.
//!
//! This crate implements the array literal subsystem used by SQL toolkits:
//!
//! - Parsing the catalog's textual array output (`{1,2,3}` on PostgreSQL,
//!   `[1,2,3]` on Redshift) into typed [`SqlArray`] values
//! - Serializing arrays back into `ARRAY[...]` / `ARRAY(...)` constructor
//!   literals, with `::type[]` casts where the dialect supports them
//! - Formatting arrays for out-of-band bound parameters
//! - A registry binding database type names and OIDs to element conversion
//!   behavior, with the standard PostgreSQL type table built in
//!
//! # Example
//!
//! ```
//! use sqlarray_core::{Dialect, PgValueLiteralizer};
//! use sqlarray_postgres::ArrayTypeRegistry;
//!
//! let registry = ArrayTypeRegistry::standard();
//! let descriptor = registry.resolve("integer").unwrap();
//! let array = descriptor.parse(Dialect::Postgres, "{1,2,NULL}").unwrap();
//!
//! let mut sql = String::new();
//! array.literal_append(&mut sql, Dialect::Postgres, &PgValueLiteralizer);
//! assert_eq!(sql, "ARRAY[1,2,NULL]::integer[]");
//! ```

pub mod array;
pub mod bound;
pub mod literal;
pub mod parse;
pub mod registry;
pub mod typecast;

pub use array::{ArrayElement, SqlArray};
pub use bound::bound_variable_array;
pub use literal::{array_auto_param_type, array_literal_append};
pub use parse::parse_array;
pub use registry::{
    ArrayTypeOptions, ArrayTypeRegistry, CatalogLookup, ConversionProc, TypeDescriptor,
    empty_array_default,
};
pub use typecast::ScalarTypecast;
