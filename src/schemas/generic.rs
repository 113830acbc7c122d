//! Layered type registry
//!
//! A [`GenericSchema`] holds user-registered types and falls back to a
//! base registry (the built-in one, unless configured otherwise) for
//! everything it does not know itself.

use super::{normalize_namespace, BuiltinSchema, Schema, TypeRef};
use crate::error::{Error, Result};
use crate::limits::Limits;
use crate::names::validate_ncname;
use crate::namespaces::{QName, XSD_NAMESPACE};
use indexmap::IndexMap;
use std::sync::Arc;

/// Registry of user-defined types layered over a base registry
///
/// Registration takes `&mut self`; wrap the schema in a lock to share it
/// between threads while it is still being populated.
#[derive(Debug)]
pub struct GenericSchema {
    base: Arc<dyn Schema>,
    types: IndexMap<Option<String>, IndexMap<String, TypeRef>>,
    limits: Limits,
}

impl Default for GenericSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl GenericSchema {
    /// Create an empty registry over the built-in types
    pub fn new() -> Self {
        Self::with_base(BuiltinSchema::shared())
    }

    /// Create an empty registry over an arbitrary base registry
    pub fn with_base(base: Arc<dyn Schema>) -> Self {
        Self {
            base,
            types: IndexMap::new(),
            limits: Limits::default(),
        }
    }

    /// Set the registry limits
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Register `ty` under `name` in `namespace`
    ///
    /// Without a name, the type's own name is used; without both name and
    /// namespace, the type's own namespace is used as well. Registering
    /// into the XML Schema namespace is refused. A previous registration
    /// under the same name is replaced.
    pub fn set_type(&mut self, name: Option<&str>, namespace: Option<&str>, ty: TypeRef) -> Result<()> {
        let (name, namespace) = match name {
            Some(name) => (name, namespace),
            None if namespace.is_none() => (
                ty.name().ok_or(Error::UnnamedRegistration)?,
                ty.namespace_uri(),
            ),
            None => (ty.name().ok_or(Error::UnnamedRegistration)?, namespace),
        };
        validate_ncname(name)?;
        let name = name.to_string();
        let namespace = normalize_namespace(namespace)?;

        if namespace.as_deref() == Some(XSD_NAMESPACE) {
            return Err(Error::ReservedNamespace {
                namespace: XSD_NAMESPACE.to_string(),
            });
        }

        let replaces = self
            .types
            .get(&namespace)
            .is_some_and(|names| names.contains_key(&name));
        if !replaces {
            self.limits.check_registered_types(self.len())?;
        }

        log::debug!("registered type {}", QName::new(namespace.as_deref(), name.as_str()));
        self.types
            .entry(namespace)
            .or_default()
            .insert(name, ty);
        Ok(())
    }

    /// Registered types with their qualified names, in registration order
    pub fn types(&self) -> impl Iterator<Item = (QName, &TypeRef)> + '_ {
        self.types.iter().flat_map(|(namespace, names)| {
            names
                .iter()
                .map(move |(name, ty)| (QName::new(namespace.as_deref(), name.as_str()), ty))
        })
    }

    /// Number of registered types, not counting the base registry
    pub fn len(&self) -> usize {
        self.types.values().map(IndexMap::len).sum()
    }

    /// Check if no types are registered
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Schema for GenericSchema {
    fn get_type(&self, name: &str, namespace: Option<&str>) -> Result<TypeRef> {
        validate_ncname(name)?;
        let namespace = normalize_namespace(namespace)?;

        if let Some(ty) = self.types.get(&namespace).and_then(|names| names.get(name)) {
            return Ok(Arc::clone(ty));
        }

        self.base.get_type(name, namespace.as_deref())
    }
}
