//! Type registries
//!
//! A [`Schema`] resolves `(name, namespace)` pairs to type converters.
//! [`BuiltinSchema`] is the immutable, process-wide registry of XSD
//! built-in types; [`GenericSchema`] layers user-registered types over it.

pub mod builtin;
pub mod generic;

pub use builtin::BuiltinSchema;
pub use generic::GenericSchema;

use crate::error::Result;
use crate::types::{AnyUriType, TypeConverter};
use crate::values::Value;
use once_cell::sync::Lazy;
use std::fmt;
use std::sync::Arc;

/// Shared handle to a type converter
pub type TypeRef = Arc<dyn TypeConverter>;

/// Type lookup contract shared by all registries
pub trait Schema: fmt::Debug + Send + Sync {
    /// Resolve a type by NCName and namespace URI
    ///
    /// An absent namespace means the XML Schema namespace unless the
    /// registry has its own entry without a namespace.
    fn get_type(&self, name: &str, namespace: Option<&str>) -> Result<TypeRef>;
}

static NAMESPACE_TYPE: Lazy<AnyUriType> = Lazy::new(AnyUriType::new);

/// Validate a namespace URI and return its serialized form
pub fn normalize_namespace(namespace: Option<&str>) -> Result<Option<String>> {
    match namespace {
        Some(ns) => {
            let value = NAMESPACE_TYPE.import(&Value::from(ns))?;
            Ok(value.as_uri().map(|uri| uri.as_str().to_string()))
        }
        None => Ok(None),
    }
}
