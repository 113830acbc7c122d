//! XML namespace handling
//!
//! This module provides the qualified-name identity used for types and
//! registry keys, and the reserved XML Schema namespace.

use crate::error::{Error, NameRule, Result, TypeLabel};
use crate::names::is_valid_ncname;
use std::fmt;

/// XML Namespace URI
pub type NamespaceUri = String;

/// XSD 1.0 namespace, reserved for the built-in types
pub const XSD_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema";

/// Qualified name (QName) - combination of namespace and local name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QName {
    /// Namespace URI (None for no namespace)
    pub namespace: Option<NamespaceUri>,
    /// Local name
    pub local_name: String,
}

impl QName {
    /// Create a new QName
    pub fn new(namespace: Option<impl Into<String>>, local_name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.map(|s| s.into()),
            local_name: local_name.into(),
        }
    }

    /// Create a QName without a namespace
    pub fn local(local_name: impl Into<String>) -> Self {
        Self {
            namespace: None,
            local_name: local_name.into(),
        }
    }

    /// Create a QName with a namespace
    pub fn namespaced(namespace: impl Into<String>, local_name: impl Into<String>) -> Self {
        Self {
            namespace: Some(namespace.into()),
            local_name: local_name.into(),
        }
    }

    /// Create a QName in the XML Schema namespace
    pub fn xsd(local_name: impl Into<String>) -> Self {
        Self::namespaced(XSD_NAMESPACE, local_name)
    }

    /// Parse Clark notation: `{namespace}local` or a bare `local`
    ///
    /// The local part must be an NCName.
    pub fn parse_clark(text: &str) -> Result<Self> {
        let (namespace, local) = match text.strip_prefix('{') {
            Some(rest) => match rest.split_once('}') {
                Some((ns, local)) if !ns.is_empty() => (Some(ns), local),
                Some((_, local)) => (None, local),
                None => (None, text),
            },
            None => (None, text),
        };

        if !is_valid_ncname(local) {
            return Err(Error::InvalidName {
                value: local.to_string(),
                rule: NameRule::NCName,
                context: TypeLabel::unnamed(),
            });
        }

        Ok(Self::new(namespace, local))
    }

    /// Check whether this name lives in the XML Schema namespace
    pub fn is_xsd(&self) -> bool {
        self.namespace.as_deref() == Some(XSD_NAMESPACE)
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{{{}}}{}", ns, self.local_name),
            None => f.write_str(&self.local_name),
        }
    }
}
