//! Built-in type registry
//!
//! The XSD built-in types are created once, on first use, and never change
//! afterwards. Every lookup of the same built-in returns the same instance.

use super::{normalize_namespace, Schema, TypeRef};
use crate::error::{Error, Result};
use crate::names::validate_ncname;
use crate::namespaces::XSD_NAMESPACE;
use crate::types::builtins::{
    AnyUriType, SimpleType, UrType, XSD_ANY_ATOMIC_TYPE, XSD_ANY_SIMPLE_TYPE, XSD_ANY_TYPE,
    XSD_ANY_URI, XSD_STRING,
};
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use std::sync::Arc;

static INSTANCE: Lazy<Arc<BuiltinSchema>> = Lazy::new(|| {
    let schema = BuiltinSchema::build();
    log::debug!("initialised {} built-in types", schema.types.len());
    Arc::new(schema)
});

/// Registry of the XSD built-in types
#[derive(Debug)]
pub struct BuiltinSchema {
    types: IndexMap<&'static str, TypeRef>,
}

impl BuiltinSchema {
    fn build() -> Self {
        let mut types: IndexMap<&'static str, TypeRef> = IndexMap::new();
        types.insert(XSD_ANY_TYPE, Arc::new(UrType::new()));
        types.insert(XSD_ANY_SIMPLE_TYPE, Arc::new(SimpleType::any_simple_type()));
        types.insert(XSD_ANY_ATOMIC_TYPE, Arc::new(SimpleType::any_atomic_type()));
        types.insert(XSD_ANY_URI, Arc::new(AnyUriType::new()));
        types.insert(XSD_STRING, Arc::new(SimpleType::string()));
        Self { types }
    }

    /// The process-wide registry
    pub fn instance() -> &'static BuiltinSchema {
        &INSTANCE
    }

    /// A shared handle to the process-wide registry
    pub fn shared() -> Arc<BuiltinSchema> {
        Arc::clone(&INSTANCE)
    }

    /// Names of all built-in types
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.types.keys().copied()
    }

    /// Check whether `name` is a built-in type name
    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }
}

impl Schema for BuiltinSchema {
    fn get_type(&self, name: &str, namespace: Option<&str>) -> Result<TypeRef> {
        validate_ncname(name)?;
        let namespace = normalize_namespace(namespace)?.unwrap_or_else(|| XSD_NAMESPACE.to_string());

        if namespace == XSD_NAMESPACE {
            if let Some(ty) = self.types.get(name) {
                return Ok(Arc::clone(ty));
            }
        }

        log::debug!("no built-in type {{{}}}{}", namespace, name);
        Err(Error::UnsupportedType {
            namespace: Some(namespace),
            name: name.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_builtin_names() {
        let names: Vec<&str> = BuiltinSchema::instance().names().collect();
        assert_eq!(
            names,
            vec!["anyType", "anySimpleType", "anyAtomicType", "anyURI", "string"]
        );
        assert!(BuiltinSchema::instance().contains("anyURI"));
        assert!(!BuiltinSchema::instance().contains("boolean"));
    }

    #[test]
    fn test_get_type() {
        let schema = BuiltinSchema::instance();
        let ty = schema.get_type("anyURI", Some(XSD_NAMESPACE)).unwrap();
        assert_eq!(ty.name(), Some("anyURI"));
        assert_eq!(ty.namespace_uri(), Some(XSD_NAMESPACE));
    }

    #[test]
    fn test_get_type_defaults_to_xsd_namespace() {
        let schema = BuiltinSchema::instance();
        let ty = schema.get_type("string", None).unwrap();
        assert_eq!(ty.name(), Some("string"));
    }

    #[test]
    fn test_singletons() {
        let a = BuiltinSchema::instance().get_type("anyType", None).unwrap();
        let b = BuiltinSchema::shared()
            .get_type("anyType", Some(XSD_NAMESPACE))
            .unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_unknown_type() {
        let schema = BuiltinSchema::instance();
        let err = schema.get_type("doesNotExist", Some(XSD_NAMESPACE)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedType);

        let err = schema.get_type("anyURI", Some("urn:example")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedType);
    }

    #[test]
    fn test_invalid_arguments() {
        let schema = BuiltinSchema::instance();
        let err = schema.get_type(":foo", None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Invalid);

        let err = schema.get_type("anyURI", Some("--not-an-uri--")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Invalid);
    }
}
