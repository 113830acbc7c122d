//! # xstypes
//!
//! An XML-Schema-inspired type system: a registry of named types that
//! import external record items into an internal value space and export
//! them back out.
//!
//! ## Features
//!
//! - XSD built-in types: `anyType`, `anySimpleType`, `anyAtomicType`,
//!   `string` and `anyURI`
//! - Complex types composed from member types at runtime
//! - Cross-type conversion through lexical round-tripping
//! - Layered registries keyed by namespace URI and NCName
//! - xs:Name and xs:NCName validation
//!
//! ## Example
//!
//! ```rust
//! use xstypes::{GenericComplexType, GenericSchema, Schema, TypeConverter, Value};
//!
//! let schema = GenericSchema::new();
//! let link = GenericComplexType::new()
//!     .with_member("target", schema.get_type("anyURI", None)?)?
//!     .with_member("title", schema.get_type("string", None)?)?;
//!
//! let input = Value::record([("target", "http://example.com/")]);
//! let value = link.import(&input)?;
//! assert_eq!(link.export(&value)?, input);
//! # Ok::<(), xstypes::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Foundation
pub mod error;
pub mod limits;

// Names and values
pub mod namespaces;
pub mod names;
pub mod values;
pub mod records;
pub mod uri;

// Types and registries
pub mod types;
pub mod schemas;

// Re-exports for convenience
pub use error::{Error, ErrorKind, Result};
pub use limits::Limits;
pub use namespaces::{QName, XSD_NAMESPACE};
pub use schemas::{BuiltinSchema, GenericSchema, Schema, TypeRef};
pub use types::{
    AnyUriType, ComplexTypeCodec, GenericComplexType, KeyPolicy, SimpleType, TypeConverter,
    UrType,
};
pub use values::{Record, Value, ValueKind};

/// Version of the xstypes library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
