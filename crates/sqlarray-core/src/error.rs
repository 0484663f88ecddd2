//! Error taxonomy for array parsing, registration, and typecasting.

use std::error::Error as StdError;
use std::fmt;

/// Convenience alias used throughout the sqlarray crates.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the array literal subsystem.
///
/// All variants are raised synchronously at the point of detection and are
/// never retried internally. A failed parse discards any partial result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Structural violation in an array literal: missing opening delimiter,
    /// adjacent tokens without a separator, bad quote termination, or
    /// trailing input after the top-level close.
    MalformedArray(&'static str),
    /// Input ended while the container stack was still open.
    UnterminatedArray,
    /// The type name has not been registered.
    UnknownType(String),
    /// The array type OID has not been registered.
    UnknownOid(u32),
    /// Conflicting registration options were supplied.
    Configuration(&'static str),
    /// Catalog metadata lookup failed or the type does not exist in the
    /// database.
    CatalogLookup(String),
    /// Registration was attempted after the registry was frozen.
    FrozenRegistry,
    /// A value presented for array construction was neither an array value
    /// nor a plain ordered sequence.
    InvalidValue(String),
    /// An element converter rejected its input. Conversion failures
    /// propagate unchanged through the parser.
    Conversion(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MalformedArray(msg) => write!(f, "invalid array, {}", msg),
            Error::UnterminatedArray => {
                write!(f, "array parsing finished with array unclosed")
            }
            Error::UnknownType(name) => write!(f, "unknown array type: {}", name),
            Error::UnknownOid(oid) => write!(f, "unknown array type oid: {}", oid),
            Error::Configuration(msg) => write!(f, "invalid registration: {}", msg),
            Error::CatalogLookup(msg) => write!(f, "catalog lookup failed: {}", msg),
            Error::FrozenRegistry => {
                write!(f, "cannot register array types on a frozen registry")
            }
            Error::InvalidValue(msg) => write!(f, "invalid value for array type: {}", msg),
            Error::Conversion(msg) => write!(f, "conversion failed: {}", msg),
        }
    }
}

impl StdError for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            Error::MalformedArray("doesn't start with {").to_string(),
            "invalid array, doesn't start with {"
        );
        assert_eq!(
            Error::UnterminatedArray.to_string(),
            "array parsing finished with array unclosed"
        );
        assert_eq!(
            Error::UnknownType("hstore".to_string()).to_string(),
            "unknown array type: hstore"
        );
        assert_eq!(Error::UnknownOid(9999).to_string(), "unknown array type oid: 9999");
    }

    #[test]
    fn test_error_is_std_error() {
        fn takes_std_error(_: &dyn StdError) {}
        takes_std_error(&Error::FrozenRegistry);
    }
}
