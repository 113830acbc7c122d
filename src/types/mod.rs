//! Type converters
//!
//! Every schema type implements [`TypeConverter`]: it imports record items
//! into its value space and exports values back out. Conversion between
//! two types needs no knowledge of each other; it round-trips through the
//! lexical space of the source type.

pub mod builtins;
pub mod complex;

pub use builtins::{AnyUriType, SimpleType, UrType};
pub use complex::{ComplexTypeCodec, GenericComplexType, KeyPolicy};

use crate::error::{Error, Result, TypeLabel};
use crate::namespaces::QName;
use crate::values::Value;
use std::fmt;

/// Bidirectional conversion contract shared by all types
pub trait TypeConverter: fmt::Debug + Send + Sync {
    /// Local name of the type, if it has one
    fn name(&self) -> Option<&str> {
        None
    }

    /// Namespace URI of the type, if it has one
    fn namespace_uri(&self) -> Option<&str> {
        None
    }

    /// Convert a record item into this type's internal value
    fn import(&self, input: &Value) -> Result<Value>;

    /// Convert an internal value back into a record item
    fn export(&self, value: &Value) -> Result<Value>;

    /// Import `input`, which is valid in `other`'s lexical space
    ///
    /// The input is imported and re-exported by `other` before this type
    /// imports the result.
    fn import_from(&self, other: &dyn TypeConverter, input: &Value) -> Result<Value> {
        let value = other.import(input)?;
        let lexical = other.export(&value)?;
        self.import(&lexical)
    }

    /// Export `value` into `other`'s lexical space
    fn export_to(&self, other: &dyn TypeConverter, value: &Value) -> Result<Value> {
        let lexical = self.export(value)?;
        let converted = other.import(&lexical)?;
        other.export(&converted)
    }
}

/// Name and namespace of a type, as used in error context
pub fn label_of(ty: &(impl TypeConverter + ?Sized)) -> TypeLabel {
    TypeLabel::from_parts(ty.namespace_uri(), ty.name())
}

/// Qualified name of a type, if it is named
pub fn qname_of(ty: &(impl TypeConverter + ?Sized)) -> Option<QName> {
    ty.name().map(|name| QName::new(ty.namespace_uri(), name))
}

/// Wrap a failure as an import error of `ty`
pub(crate) fn import_error(ty: &(impl TypeConverter + ?Sized), input: &Value, cause: Option<Error>) -> Error {
    Error::Import {
        subject: input.kind(),
        target: label_of(ty),
        cause: cause.map(Box::new),
    }
}

/// Wrap a failure as an export error of `ty`
pub(crate) fn export_error(ty: &(impl TypeConverter + ?Sized), value: &Value, cause: Option<Error>) -> Error {
    Error::Export {
        subject: value.kind(),
        target: label_of(ty),
        cause: cause.map(Box::new),
    }
}

/// Lexical form of a string-convertible value
pub(crate) fn lexical_of(value: &Value) -> Result<String> {
    value.as_lexical().ok_or(Error::NotString {
        subject: value.kind(),
    })
}
