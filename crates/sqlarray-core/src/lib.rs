//! Core types for the sqlarray ecosystem.
//!
//! `sqlarray-core` is the **foundation layer** shared by the array literal
//! crates. It defines the scalar data model and the contracts the database
//! specific crates build on.
//!
//! # Role In The Architecture
//!
//! - **Data model**: [`Value`] is the closed scalar variant type that array
//!   elements, converters, and literalizers all operate on.
//! - **Dialect tag**: [`Dialect`] names the target array syntax (PostgreSQL
//!   or Redshift) and is the only piece of state the surrounding SQL
//!   generators need to read.
//! - **Contract layer**: [`ValueLiteralizer`] is the seam to the general
//!   value-literalization routine of the calling context; drivers and query
//!   builders supply their own, while [`PgValueLiteralizer`] covers the
//!   standalone case.
//! - **Errors**: a single [`Error`] taxonomy covering parsing, registration,
//!   and typecasting failures.
//!
//! # Who Uses This Crate
//!
//! - `sqlarray-postgres` implements the array parser, serializers, and type
//!   registry on top of these types.
//! - Driver and query-builder crates consume [`Value`] and [`Dialect`] and
//!   implement [`ValueLiteralizer`] against their own literal rules.

pub mod dialect;
pub mod error;
pub mod literalize;
pub mod value;

pub use dialect::Dialect;
pub use error::{Error, Result};
pub use literalize::{PgValueLiteralizer, ValueLiteralizer};
pub use value::Value;
