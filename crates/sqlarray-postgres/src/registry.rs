//! Array type registry.
//!
//! Binds database type names and array OIDs to element conversion behavior.
//! A registry is built once at startup (or lazily against the live catalog
//! for types unknown ahead of time), frozen together with the owning
//! connection object, and read freely afterwards.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

use regex::Regex;
use sqlarray_core::{Dialect, Error, Result, Value};

use crate::array::{ArrayElement, SqlArray};
use crate::parse::parse_array;
use crate::typecast::ScalarTypecast;

/// Converts one textual array element into a typed scalar.
pub type ConversionProc = Arc<dyn Fn(&str) -> Result<Value> + Send + Sync>;

/// Catalog metadata access for types not known at registration time.
///
/// Implementations issue the equivalent of
/// `SELECT typarray, oid FROM pg_type WHERE typname = $1` and return the
/// array and scalar OIDs, or `None` when the type does not exist. This is
/// the registry's only blocking collaborator and is consulted at most once
/// per unknown type name.
pub trait CatalogLookup {
    /// Resolve `(array_oid, scalar_oid)` for a scalar type name.
    fn array_type_oids(&self, type_name: &str) -> Result<Option<(u32, u32)>>;
}

/// Options for registering a database-specific array type.
#[derive(Clone, Default)]
pub struct ArrayTypeOptions {
    oid: Option<u32>,
    scalar_oid: Option<u32>,
    converter: Option<Option<ConversionProc>>,
    scalar_typecast: Option<ScalarTypecast>,
    type_symbol: Option<String>,
    array_type: Option<String>,
}

impl ArrayTypeOptions {
    /// Create empty options; missing identifiers are resolved from the
    /// catalog at registration time.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the array type OID.
    #[must_use]
    pub fn oid(mut self, oid: u32) -> Self {
        self.oid = Some(oid);
        self
    }

    /// Set the scalar type OID. The element converter is resolved from the
    /// shared conversion-proc table for this OID.
    #[must_use]
    pub fn scalar_oid(mut self, oid: u32) -> Self {
        self.scalar_oid = Some(oid);
        self
    }

    /// Supply an explicit element converter. Mutually exclusive with
    /// [`scalar_oid`](Self::scalar_oid).
    #[must_use]
    pub fn converter(mut self, converter: ConversionProc) -> Self {
        self.converter = Some(Some(converter));
        self
    }

    /// Explicitly register without an element converter: parsed elements
    /// stay textual.
    #[must_use]
    pub fn no_converter(mut self) -> Self {
        self.converter = Some(None);
        self
    }

    /// Set the scalar cast applied to members when a plain sequence is
    /// typecast to this array type. Defaults to the cast implied by the
    /// type symbol.
    #[must_use]
    pub fn scalar_typecast(mut self, cast: ScalarTypecast) -> Self {
        self.scalar_typecast = Some(cast);
        self
    }

    /// Override the schema type symbol. The symbol names the registered
    /// type during schema parsing as `<symbol>_array`.
    #[must_use]
    pub fn type_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.type_symbol = Some(symbol.into());
        self
    }

    /// Override the element type the array is cast to when literalized.
    /// Usually the same as the database type name.
    #[must_use]
    pub fn array_type(mut self, array_type: impl Into<String>) -> Self {
        self.array_type = Some(array_type.into());
        self
    }
}

impl fmt::Debug for ArrayTypeOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayTypeOptions")
            .field("oid", &self.oid)
            .field("scalar_oid", &self.scalar_oid)
            .field("converter", &self.converter.as_ref().map(Option::is_some))
            .field("scalar_typecast", &self.scalar_typecast)
            .field("type_symbol", &self.type_symbol)
            .field("array_type", &self.array_type)
            .finish()
    }
}

/// Conversion metadata for one registered array type.
#[derive(Clone)]
pub struct TypeDescriptor {
    db_type: String,
    oid: u32,
    scalar_oid: Option<u32>,
    converter: Option<ConversionProc>,
    scalar_typecast: Option<ScalarTypecast>,
    array_type: String,
    type_symbol: String,
}

impl TypeDescriptor {
    /// The database type name this descriptor was registered under.
    #[must_use]
    pub fn db_type(&self) -> &str {
        &self.db_type
    }

    /// The array type OID.
    #[must_use]
    pub fn oid(&self) -> u32 {
        self.oid
    }

    /// The scalar type OID, when the converter was resolved from one.
    #[must_use]
    pub fn scalar_oid(&self) -> Option<u32> {
        self.scalar_oid
    }

    /// The element type arrays of this type are cast to when literalized.
    #[must_use]
    pub fn array_type(&self) -> &str {
        &self.array_type
    }

    /// The schema type symbol.
    #[must_use]
    pub fn type_symbol(&self) -> &str {
        &self.type_symbol
    }

    /// The scalar cast applied when typecasting plain sequences.
    #[must_use]
    pub fn scalar_typecast(&self) -> Option<ScalarTypecast> {
        self.scalar_typecast
    }

    /// Whether elements are converted after parsing.
    #[must_use]
    pub fn has_converter(&self) -> bool {
        self.converter.is_some()
    }

    /// Parse catalog output text into a typed array.
    ///
    /// The dialect selects the grammar explicitly; elements run through
    /// this type's converter and the result carries the type's cast tag.
    pub fn parse(&self, dialect: Dialect, source: &str) -> Result<SqlArray> {
        let elements = parse_array(source, dialect, self.converter.as_ref())?;
        Ok(SqlArray::typed(elements, self.array_type.clone()))
    }
}

impl PartialEq for TypeDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.db_type == other.db_type
            && self.oid == other.oid
            && self.scalar_oid == other.scalar_oid
            && match (&self.converter, &other.converter) {
                (Some(a), Some(b)) => Arc::ptr_eq(a, b),
                (None, None) => true,
                _ => false,
            }
            && self.scalar_typecast == other.scalar_typecast
            && self.array_type == other.array_type
            && self.type_symbol == other.type_symbol
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("db_type", &self.db_type)
            .field("oid", &self.oid)
            .field("scalar_oid", &self.scalar_oid)
            .field("converter", &self.converter.is_some())
            .field("scalar_typecast", &self.scalar_typecast)
            .field("array_type", &self.array_type)
            .field("type_symbol", &self.type_symbol)
            .finish()
    }
}

/// Registry of known array types.
///
/// Registration happens through `&mut self` before the owning connection is
/// finalized; [`freeze`](Self::freeze) then makes the registry permanently
/// read-only, after which shared references may be used concurrently
/// without locking.
pub struct ArrayTypeRegistry {
    by_name: HashMap<String, Arc<TypeDescriptor>>,
    by_oid: HashMap<u32, Arc<TypeDescriptor>>,
    /// db_type name -> `<symbol>_array` schema symbol.
    schema_types: HashMap<String, String>,
    /// `<symbol>_array` schema symbol -> db_type name.
    by_symbol: HashMap<String, String>,
    conversion_procs: HashMap<u32, ConversionProc>,
    frozen: bool,
}

impl Default for ArrayTypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ArrayTypeRegistry {
    /// Create an empty registry seeded with the shared scalar
    /// conversion-proc table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            by_name: HashMap::new(),
            by_oid: HashMap::new(),
            schema_types: HashMap::new(),
            by_symbol: HashMap::new(),
            conversion_procs: standard_conversion_procs(),
            frozen: false,
        }
    }

    /// Create a registry with the standard PostgreSQL array types
    /// registered.
    #[must_use]
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.install_standard_types();
        registry
    }

    /// Register a database-specific array type.
    ///
    /// Equivalent to [`register_with`](Self::register_with) without a
    /// catalog handle; fails if the options leave identifiers unresolved.
    pub fn register(&mut self, db_type: &str, opts: ArrayTypeOptions) -> Result<()> {
        self.register_with(db_type, opts, None)
    }

    /// Register a database-specific array type, consulting the catalog for
    /// identifiers the options leave out.
    pub fn register_with(
        &mut self,
        db_type: &str,
        opts: ArrayTypeOptions,
        catalog: Option<&dyn CatalogLookup>,
    ) -> Result<()> {
        if self.frozen {
            return Err(Error::FrozenRegistry);
        }

        let has_converter = opts.converter.is_some();
        if has_converter && opts.scalar_oid.is_some() {
            return Err(Error::Configuration(
                "can't provide both a converter and a scalar oid",
            ));
        }

        let mut oid = opts.oid;
        let mut scalar_oid = opts.scalar_oid;
        if oid.is_none() || (scalar_oid.is_none() && !has_converter) {
            let catalog = catalog.ok_or_else(|| {
                Error::CatalogLookup(format!("no catalog available to resolve type {}", db_type))
            })?;
            let Some((array_oid, catalog_scalar)) = catalog.array_type_oids(db_type)? else {
                return Err(Error::CatalogLookup(format!(
                    "type {} does not exist in the database",
                    db_type
                )));
            };
            if scalar_oid.is_none() && !has_converter {
                scalar_oid = Some(catalog_scalar);
            }
            if oid.is_none() {
                oid = Some(array_oid);
            }
        }
        let Some(oid) = oid else {
            return Err(Error::Configuration("array type oid could not be resolved"));
        };

        let converter = match opts.converter {
            Some(explicit) => explicit,
            None => scalar_oid.and_then(|soid| self.conversion_procs.get(&soid).cloned()),
        };

        let type_symbol = opts.type_symbol.unwrap_or_else(|| db_type.to_string());
        let array_type = opts.array_type.unwrap_or_else(|| db_type.to_string());
        let scalar_typecast = opts
            .scalar_typecast
            .or_else(|| ScalarTypecast::from_symbol(&type_symbol));

        self.insert_descriptor(TypeDescriptor {
            db_type: db_type.to_string(),
            oid,
            scalar_oid,
            converter,
            scalar_typecast,
            array_type,
            type_symbol,
        });
        Ok(())
    }

    /// Install a named scalar conversion proc and register the matching
    /// array type with catalog-resolved OIDs.
    pub fn add_named_conversion_proc(
        &mut self,
        name: &str,
        converter: ConversionProc,
        catalog: &dyn CatalogLookup,
    ) -> Result<()> {
        if self.frozen {
            return Err(Error::FrozenRegistry);
        }
        let Some((array_oid, scalar_oid)) = catalog.array_type_oids(name)? else {
            return Err(Error::CatalogLookup(format!(
                "type {} does not exist in the database",
                name
            )));
        };
        self.conversion_procs.insert(scalar_oid, converter);
        self.register_with(
            name,
            ArrayTypeOptions::new().oid(array_oid).scalar_oid(scalar_oid),
            Some(catalog),
        )
    }

    /// Look up a descriptor by database type name.
    pub fn resolve(&self, db_type: &str) -> Result<&TypeDescriptor> {
        self.by_name
            .get(db_type)
            .map(Arc::as_ref)
            .ok_or_else(|| Error::UnknownType(db_type.to_string()))
    }

    /// Look up a descriptor by array type OID. Drivers use this to set up
    /// conversion of result rows.
    pub fn resolve_oid(&self, oid: u32) -> Result<&TypeDescriptor> {
        self.by_oid
            .get(&oid)
            .map(Arc::as_ref)
            .ok_or(Error::UnknownOid(oid))
    }

    /// Prevent further registrations. Idempotent; reads remain available
    /// and, with the registry now immutable, safe to share across threads.
    pub fn freeze(&mut self) {
        if !self.frozen {
            tracing::debug!(types = self.by_name.len(), "array type registry frozen");
        }
        self.frozen = true;
    }

    /// Whether the registry has been frozen.
    #[must_use]
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Typecast a value to the named array type.
    ///
    /// An array already tagged with this type passes through; an array
    /// tagged with a different type is re-tagged without member conversion;
    /// an untagged array has the registered scalar cast applied recursively
    /// to its members. Anything that is not an array fails with
    /// [`Error::InvalidValue`].
    pub fn typecast(&self, db_type: &str, value: ArrayElement) -> Result<SqlArray> {
        let descriptor = self.resolve(db_type)?;
        match value {
            ArrayElement::Array(array) => {
                if array.array_type() == Some(descriptor.array_type()) {
                    Ok(array)
                } else if array.array_type().is_some() {
                    Ok(array.retagged(descriptor.array_type.clone()))
                } else {
                    let elements = match descriptor.scalar_typecast {
                        Some(cast) => array
                            .into_elements()
                            .into_iter()
                            .map(|e| cast.apply(e))
                            .collect::<Result<Vec<_>>>()?,
                        None => array.into_elements(),
                    };
                    Ok(SqlArray::typed(elements, descriptor.array_type.clone()))
                }
            }
            other => Err(Error::InvalidValue(format!("{:?}", other))),
        }
    }

    /// Typecast via the derived `<symbol>_array` schema name installed at
    /// registration time. This is the entry point the broader type-casting
    /// subsystem keys on.
    pub fn typecast_named(&self, schema_symbol: &str, value: ArrayElement) -> Result<SqlArray> {
        let db_type = self
            .by_symbol
            .get(schema_symbol)
            .ok_or_else(|| Error::UnknownType(schema_symbol.to_string()))?;
        self.typecast(db_type, value)
    }

    /// The `<symbol>_array` schema symbol for a registered type name.
    #[must_use]
    pub fn schema_type_symbol(&self, db_type: &str) -> Option<&str> {
        self.schema_types.get(db_type).map(String::as_str)
    }

    /// Recognize a DDL column type of the form `base[]` or `base(args)[]`
    /// and return the registered schema symbol for it.
    #[must_use]
    pub fn schema_array_type(&self, db_type: &str) -> Option<&str> {
        static ARRAY_COLUMN: OnceLock<Regex> = OnceLock::new();
        let re = ARRAY_COLUMN
            .get_or_init(|| Regex::new(r"(?i)^([^(]+)(?:\([^(]+\))?\[\]$").unwrap());
        let base = re.captures(db_type)?.get(1)?.as_str();
        self.schema_type_symbol(base)
    }

    fn insert_descriptor(&mut self, descriptor: TypeDescriptor) {
        tracing::debug!(
            db_type = %descriptor.db_type,
            oid = descriptor.oid,
            symbol = %descriptor.type_symbol,
            "registered array type"
        );
        let schema_symbol = format!("{}_array", descriptor.type_symbol);
        self.schema_types
            .insert(descriptor.db_type.clone(), schema_symbol.clone());
        self.by_symbol.insert(schema_symbol, descriptor.db_type.clone());
        let descriptor = Arc::new(descriptor);
        self.by_oid.insert(descriptor.oid, Arc::clone(&descriptor));
        self.by_name.insert(descriptor.db_type.clone(), descriptor);
    }

    // The builtin table: identifiers are fixed, so none of the failable
    // registration paths apply.
    fn builtin(
        &mut self,
        db_type: &str,
        oid: u32,
        scalar_oid: Option<u32>,
        opts: ArrayTypeOptions,
    ) {
        let converter = match opts.converter {
            Some(explicit) => explicit,
            None => scalar_oid.and_then(|soid| self.conversion_procs.get(&soid).cloned()),
        };
        let type_symbol = opts.type_symbol.unwrap_or_else(|| db_type.to_string());
        let array_type = opts.array_type.unwrap_or_else(|| db_type.to_string());
        let scalar_typecast = opts
            .scalar_typecast
            .or_else(|| ScalarTypecast::from_symbol(&type_symbol));
        self.insert_descriptor(TypeDescriptor {
            db_type: db_type.to_string(),
            oid,
            scalar_oid,
            converter,
            scalar_typecast,
            array_type,
            type_symbol,
        });
    }

    fn install_standard_types(&mut self) {
        let opts = ArrayTypeOptions::new;

        self.builtin(
            "timestamp without time zone",
            1115,
            Some(1114),
            opts().type_symbol("datetime"),
        );
        self.builtin(
            "timestamp with time zone",
            1185,
            Some(1184),
            opts()
                .type_symbol("datetime_timezone")
                .scalar_typecast(ScalarTypecast::Datetime),
        );

        self.builtin("text", 1009, Some(25), opts().type_symbol("string"));
        self.builtin("integer", 1007, Some(23), opts());
        self.builtin(
            "bigint",
            1016,
            Some(20),
            opts().scalar_typecast(ScalarTypecast::Integer),
        );
        self.builtin("numeric", 1231, Some(1700), opts().type_symbol("decimal"));
        self.builtin("double precision", 1022, Some(701), opts().type_symbol("float"));

        self.builtin("boolean", 1000, Some(16), opts());
        self.builtin("bytea", 1001, Some(17), opts().type_symbol("blob"));
        self.builtin("date", 1182, Some(1082), opts());
        self.builtin("time without time zone", 1183, Some(1083), opts().type_symbol("time"));
        self.builtin(
            "time with time zone",
            1270,
            Some(1266),
            opts()
                .type_symbol("time_timezone")
                .scalar_typecast(ScalarTypecast::Time),
        );

        self.builtin(
            "smallint",
            1005,
            Some(21),
            opts().scalar_typecast(ScalarTypecast::Integer),
        );
        self.builtin(
            "oid",
            1028,
            Some(26),
            opts().scalar_typecast(ScalarTypecast::Integer),
        );
        self.builtin(
            "real",
            1021,
            Some(700),
            opts().scalar_typecast(ScalarTypecast::Float),
        );
        self.builtin(
            "character",
            1014,
            None,
            opts()
                .no_converter()
                .array_type("text")
                .scalar_typecast(ScalarTypecast::String),
        );
        self.builtin(
            "character varying",
            1015,
            None,
            opts()
                .no_converter()
                .type_symbol("varchar")
                .scalar_typecast(ScalarTypecast::String),
        );

        self.builtin("xml", 143, Some(142), opts());
        self.builtin("money", 791, Some(790), opts());
        self.builtin("bit", 1561, Some(1560), opts());
        self.builtin("bit varying", 1563, Some(1562), opts().type_symbol("varbit"));
        self.builtin("uuid", 2951, Some(2950), opts());

        self.builtin("xid", 1011, Some(28), opts());
        self.builtin("cid", 1012, Some(29), opts());

        self.builtin("name", 1003, Some(19), opts());
        self.builtin("tid", 1010, Some(27), opts());
        self.builtin("int2vector", 1006, Some(22), opts());
        self.builtin("oidvector", 1013, Some(30), opts());

        // Redshift SUPER columns surface as text.
        self.builtin("super", 4000, Some(25), opts().type_symbol("string"));
    }
}

impl fmt::Debug for ArrayTypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayTypeRegistry")
            .field("types", &self.by_name.len())
            .field("conversion_procs", &self.conversion_procs.len())
            .field("frozen", &self.frozen)
            .finish()
    }
}

/// Recognize a column default of the form `'{}'::type[]` or
/// `ARRAY[]::type[]` and produce the corresponding empty typed array.
#[must_use]
pub fn empty_array_default(default_sql: &str) -> Option<SqlArray> {
    static EMPTY_DEFAULT: OnceLock<Regex> = OnceLock::new();
    let re = EMPTY_DEFAULT
        .get_or_init(|| Regex::new(r"^(?:'\{\}'|ARRAY\[\])::([\w ]+)\[\]$").unwrap());
    let array_type = re.captures(default_sql)?.get(1)?.as_str();
    Some(SqlArray::empty(array_type))
}

fn standard_conversion_procs() -> HashMap<u32, ConversionProc> {
    let mut procs: HashMap<u32, ConversionProc> = HashMap::new();

    procs.insert(
        16,
        Arc::new(|s: &str| match s {
            "t" | "true" => Ok(Value::Bool(true)),
            "f" | "false" => Ok(Value::Bool(false)),
            _ => Err(Error::Conversion(format!("invalid boolean: {}", s))),
        }),
    );
    procs.insert(17, Arc::new(decode_bytea));
    procs.insert(20, Arc::new(|s: &str| parse_int(s).map(Value::BigInt)));
    procs.insert(
        21,
        Arc::new(|s: &str| {
            s.parse::<i16>()
                .map(Value::SmallInt)
                .map_err(|_| Error::Conversion(format!("invalid smallint: {}", s)))
        }),
    );
    procs.insert(
        23,
        Arc::new(|s: &str| {
            s.parse::<i32>()
                .map(Value::Int)
                .map_err(|_| Error::Conversion(format!("invalid integer: {}", s)))
        }),
    );
    procs.insert(25, Arc::new(|s: &str| Ok(Value::Text(s.to_string()))));
    procs.insert(26, Arc::new(|s: &str| parse_int(s).map(Value::BigInt)));
    procs.insert(
        700,
        Arc::new(|s: &str| {
            s.parse::<f32>()
                .map(Value::Float)
                .map_err(|_| Error::Conversion(format!("invalid real: {}", s)))
        }),
    );
    procs.insert(
        701,
        Arc::new(|s: &str| {
            s.parse::<f64>()
                .map(Value::Double)
                .map_err(|_| Error::Conversion(format!("invalid double: {}", s)))
        }),
    );
    procs.insert(
        1700,
        Arc::new(|s: &str| {
            if s.parse::<f64>().is_ok() {
                Ok(Value::Decimal(s.to_string()))
            } else {
                Err(Error::Conversion(format!("invalid numeric: {}", s)))
            }
        }),
    );

    procs
}

fn parse_int(s: &str) -> Result<i64> {
    s.parse::<i64>()
        .map_err(|_| Error::Conversion(format!("invalid integer: {}", s)))
}

// Hex format only (`\xDEADBEEF`); the legacy escape format is not emitted
// by servers this subsystem targets.
fn decode_bytea(s: &str) -> Result<Value> {
    let hex = s
        .strip_prefix("\\x")
        .ok_or_else(|| Error::Conversion(format!("invalid bytea: {}", s)))?;
    if !hex.is_ascii() || hex.len() % 2 != 0 {
        return Err(Error::Conversion(format!("invalid bytea: {}", s)));
    }
    let mut bytes = Vec::with_capacity(hex.len() / 2);
    for i in (0..hex.len()).step_by(2) {
        let byte = u8::from_str_radix(&hex[i..i + 2], 16)
            .map_err(|_| Error::Conversion(format!("invalid bytea: {}", s)))?;
        bytes.push(byte);
    }
    Ok(Value::Bytes(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeCatalog;

    impl CatalogLookup for FakeCatalog {
        fn array_type_oids(&self, type_name: &str) -> Result<Option<(u32, u32)>> {
            match type_name {
                "citext" => Ok(Some((17002, 17001))),
                _ => Ok(None),
            }
        }
    }

    #[test]
    fn test_standard_registrations() {
        let registry = ArrayTypeRegistry::standard();

        let integer = registry.resolve("integer").unwrap();
        assert_eq!(integer.oid(), 1007);
        assert_eq!(integer.scalar_oid(), Some(23));
        assert!(integer.has_converter());
        assert_eq!(integer.type_symbol(), "integer");

        assert_eq!(registry.resolve_oid(1007).unwrap().db_type(), "integer");
        assert_eq!(registry.resolve("numeric").unwrap().type_symbol(), "decimal");
        assert_eq!(registry.resolve("super").unwrap().oid(), 4000);
    }

    #[test]
    fn test_unknown_type_and_oid() {
        let registry = ArrayTypeRegistry::standard();
        assert_eq!(
            registry.resolve("hstore"),
            Err(Error::UnknownType("hstore".to_string()))
        );
        assert_eq!(registry.resolve_oid(42), Err(Error::UnknownOid(42)));
    }

    #[test]
    fn test_character_varying_has_no_converter() {
        let registry = ArrayTypeRegistry::standard();
        let varchar = registry.resolve("character varying").unwrap();
        assert!(!varchar.has_converter());
        assert_eq!(varchar.type_symbol(), "varchar");

        let parsed = varchar.parse(Dialect::Postgres, "{1,2}").unwrap();
        assert_eq!(
            parsed.elements()[0],
            ArrayElement::Scalar(Value::Text("1".to_string()))
        );
    }

    #[test]
    fn test_character_array_type_override() {
        let registry = ArrayTypeRegistry::standard();
        let character = registry.resolve("character").unwrap();
        assert_eq!(character.array_type(), "text");
    }

    #[test]
    fn test_conflicting_options() {
        let mut registry = ArrayTypeRegistry::new();
        let result = registry.register(
            "integer",
            ArrayTypeOptions::new()
                .oid(1007)
                .scalar_oid(23)
                .converter(Arc::new(|s: &str| Ok(Value::Text(s.to_string())))),
        );
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[test]
    fn test_catalog_resolution() {
        let mut registry = ArrayTypeRegistry::new();
        registry
            .register_with("citext", ArrayTypeOptions::new(), Some(&FakeCatalog))
            .unwrap();
        let citext = registry.resolve("citext").unwrap();
        assert_eq!(citext.oid(), 17002);
        assert_eq!(citext.scalar_oid(), Some(17001));
    }

    #[test]
    fn test_catalog_miss() {
        let mut registry = ArrayTypeRegistry::new();
        assert!(matches!(
            registry.register_with("nope", ArrayTypeOptions::new(), Some(&FakeCatalog)),
            Err(Error::CatalogLookup(_))
        ));
        assert!(matches!(
            registry.register("nope", ArrayTypeOptions::new()),
            Err(Error::CatalogLookup(_))
        ));
    }

    #[test]
    fn test_freeze_is_idempotent_and_blocks_registration() {
        let mut registry = ArrayTypeRegistry::standard();
        registry.freeze();
        registry.freeze();
        assert!(registry.is_frozen());
        assert_eq!(
            registry.register("integer", ArrayTypeOptions::new().oid(1007).scalar_oid(23)),
            Err(Error::FrozenRegistry)
        );
        // Reads still work after freezing.
        assert!(registry.resolve("integer").is_ok());
    }

    #[test]
    fn test_typecast_plain_sequence() {
        let registry = ArrayTypeRegistry::standard();
        let plain: ArrayElement = vec![
            ArrayElement::Scalar(Value::Text("1".to_string())),
            ArrayElement::Null,
        ]
        .into();
        let cast = registry.typecast("integer", plain).unwrap();
        assert_eq!(cast.array_type(), Some("integer"));
        assert_eq!(cast.elements()[0], ArrayElement::Scalar(Value::BigInt(1)));
        assert_eq!(cast.elements()[1], ArrayElement::Null);
    }

    #[test]
    fn test_typecast_retags_foreign_arrays() {
        let registry = ArrayTypeRegistry::standard();
        let tagged = SqlArray::typed(
            vec![ArrayElement::Scalar(Value::Text("x".to_string()))],
            "text",
        );
        // Members are not converted when only the tag differs.
        let cast = registry
            .typecast("integer", ArrayElement::Array(tagged))
            .unwrap();
        assert_eq!(cast.array_type(), Some("integer"));
        assert_eq!(
            cast.elements()[0],
            ArrayElement::Scalar(Value::Text("x".to_string()))
        );
    }

    #[test]
    fn test_typecast_rejects_scalars() {
        let registry = ArrayTypeRegistry::standard();
        assert!(matches!(
            registry.typecast("integer", ArrayElement::Scalar(Value::Int(1))),
            Err(Error::InvalidValue(_))
        ));
        assert!(matches!(
            registry.typecast("integer", ArrayElement::Null),
            Err(Error::InvalidValue(_))
        ));
    }

    #[test]
    fn test_typecast_named() {
        let registry = ArrayTypeRegistry::standard();
        let plain: ArrayElement = vec![ArrayElement::Scalar(Value::Text("2".to_string()))].into();
        let cast = registry.typecast_named("integer_array", plain).unwrap();
        assert_eq!(cast.array_type(), Some("integer"));
        assert!(matches!(
            registry.typecast_named("integer", ArrayElement::Null),
            Err(Error::UnknownType(_))
        ));
    }

    #[test]
    fn test_schema_array_type() {
        let registry = ArrayTypeRegistry::standard();
        assert_eq!(registry.schema_array_type("integer[]"), Some("integer_array"));
        assert_eq!(
            registry.schema_array_type("character varying(255)[]"),
            Some("varchar_array")
        );
        assert_eq!(registry.schema_array_type("numeric(10,2)[]"), Some("decimal_array"));
        assert_eq!(registry.schema_array_type("integer"), None);
        assert_eq!(registry.schema_array_type("hstore[]"), None);
    }

    #[test]
    fn test_empty_array_default() {
        let default = empty_array_default("'{}'::text[]").unwrap();
        assert!(default.is_empty());
        assert_eq!(default.array_type(), Some("text"));

        let constructor = empty_array_default("ARRAY[]::double precision[]").unwrap();
        assert_eq!(constructor.array_type(), Some("double precision"));

        assert!(empty_array_default("'{1}'::text[]").is_none());
        assert!(empty_array_default("nextval('seq')").is_none());
    }

    #[test]
    fn test_add_named_conversion_proc() {
        let mut registry = ArrayTypeRegistry::new();
        registry
            .add_named_conversion_proc(
                "citext",
                Arc::new(|s: &str| Ok(Value::Text(s.to_lowercase()))),
                &FakeCatalog,
            )
            .unwrap();
        let citext = registry.resolve("citext").unwrap();
        assert_eq!(citext.oid(), 17002);
        let parsed = citext.parse(Dialect::Postgres, "{ABC}").unwrap();
        assert_eq!(
            parsed.elements()[0],
            ArrayElement::Scalar(Value::Text("abc".to_string()))
        );
    }

    #[test]
    fn test_bytea_conversion() {
        assert_eq!(
            decode_bytea("\\x4142").unwrap(),
            Value::Bytes(vec![0x41, 0x42])
        );
        assert!(decode_bytea("4142").is_err());
        assert!(decode_bytea("\\x41g2").is_err());
        assert!(decode_bytea("\\x414").is_err());
    }

    #[test]
    fn test_double_conversion_special_values() {
        let registry = ArrayTypeRegistry::standard();
        let double = registry.resolve("double precision").unwrap();
        let parsed = double
            .parse(Dialect::Postgres, r#"{1.5,"Infinity","-Infinity","NaN"}"#)
            .unwrap();
        assert_eq!(parsed.elements()[0], ArrayElement::Scalar(Value::Double(1.5)));
        assert_eq!(
            parsed.elements()[1],
            ArrayElement::Scalar(Value::Double(f64::INFINITY))
        );
        assert_eq!(
            parsed.elements()[2],
            ArrayElement::Scalar(Value::Double(f64::NEG_INFINITY))
        );
        assert!(matches!(
            parsed.elements()[3],
            ArrayElement::Scalar(Value::Double(f)) if f.is_nan()
        ));
    }
}
