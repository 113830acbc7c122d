//! Error types for xstypes
//!
//! Every failure in this crate is a normal, recoverable outcome reported
//! through [`Error`]. Variants carry structured context (the offending
//! value's kind, the qualified name of the type involved, and the failure
//! that caused them) instead of pre-formatted text.

use crate::namespaces::{QName, XSD_NAMESPACE};
use crate::records::RecordError;
use crate::values::ValueKind;
use std::fmt;
use thiserror::Error;

/// Result type alias using the xstypes Error
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed or incompatible value, name or argument
    Invalid,
    /// Unknown name/namespace pair in a registry lookup
    UnsupportedType,
}

impl ErrorKind {
    /// Get the kind as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Invalid => "invalid",
            ErrorKind::UnsupportedType => "unsupported type",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lexical rule a name was checked against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameRule {
    /// xs:Name
    Name,
    /// xs:NCName
    NCName,
}

impl fmt::Display for NameRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameRule::Name => write!(f, "{{{}}}Name", XSD_NAMESPACE),
            NameRule::NCName => write!(f, "{{{}}}NCName", XSD_NAMESPACE),
        }
    }
}

/// The type an error refers to, if that type has a name
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TypeLabel(Option<QName>);

impl TypeLabel {
    /// Label for an anonymous type
    pub fn unnamed() -> Self {
        Self(None)
    }

    /// Label for a named type
    pub fn named(qname: QName) -> Self {
        Self(Some(qname))
    }

    /// Build a label from optional name parts
    pub fn from_parts(namespace: Option<&str>, name: Option<&str>) -> Self {
        Self(name.map(|name| QName::new(namespace, name)))
    }

    /// The qualified name, if any
    pub fn qname(&self) -> Option<&QName> {
        self.0.as_ref()
    }

    /// `{ns}name` for named types, `fallback` otherwise
    pub fn describe(&self, fallback: &str) -> String {
        match &self.0 {
            Some(qname) => qname.to_string(),
            None => fallback.to_string(),
        }
    }

    fn subject(&self) -> String {
        match &self.0 {
            Some(qname) => format!("the {} type", qname),
            None => "the type".to_string(),
        }
    }

    fn qualifier(&self) -> String {
        match &self.0 {
            Some(qname) => format!(" in {}", qname),
            None => String::new(),
        }
    }
}

/// Main error type for xstypes operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Input could not be converted into a type's value space
    #[error("could not import {subject} as {}", .target.describe("internal value"))]
    Import {
        /// Kind of the rejected input
        subject: ValueKind,
        /// Type that rejected it
        target: TypeLabel,
        /// Underlying failure
        #[source]
        cause: Option<Box<Error>>,
    },

    /// Value could not be converted into a type's lexical space
    #[error("could not export {subject} as {}", .target.describe("internal value"))]
    Export {
        /// Kind of the rejected value
        subject: ValueKind,
        /// Type that rejected it
        target: TypeLabel,
        /// Underlying failure
        #[source]
        cause: Option<Box<Error>>,
    },

    /// Input is not a record at all
    #[error("could not use {subject} as {}", .target.describe("complex structure"))]
    NotComplex {
        /// Kind of the rejected input
        subject: ValueKind,
        /// Complex type that expected a record
        target: TypeLabel,
    },

    /// Input is a record but structurally malformed
    #[error("could not use malformed record as {}", .target.describe("complex structure"))]
    MalformedRecord {
        /// Complex type that expected the record
        target: TypeLabel,
        /// What the record normalizer objected to
        #[source]
        reason: RecordError,
    },

    /// Input is not a well-formed record item
    #[error("could not use {subject} as {} item", .target.describe("complex structure"))]
    MalformedItem {
        /// Kind of the rejected item
        subject: ValueKind,
        /// Type that expected the item
        target: TypeLabel,
        /// What the record normalizer objected to
        #[source]
        reason: RecordError,
    },

    /// Value is not a member of the type's internal value space
    #[error("could not use {subject} as {}", .target.describe("internal value"))]
    InvalidValue {
        /// Kind of the rejected value
        subject: ValueKind,
        /// Type whose value space was expected
        target: TypeLabel,
    },

    /// Value has no string form
    #[error("could not use {subject} as string value")]
    NotString {
        /// Kind of the rejected value
        subject: ValueKind,
    },

    /// String is not a valid xs:Name or xs:NCName
    #[error("invalid {rule}: \"{value}\"{}", .context.qualifier())]
    InvalidName {
        /// The offending string
        value: String,
        /// Rule that was violated
        rule: NameRule,
        /// Type the name was checked for
        context: TypeLabel,
    },

    /// Complex type has no member with the given key
    #[error("{} has no \"{key}\" member item", .target.subject())]
    NoSuchMember {
        /// Requested member key
        key: String,
        /// Complex type that was asked
        target: TypeLabel,
    },

    /// A type was registered without a name that could be derived
    #[error("could not register type without name")]
    UnnamedRegistration,

    /// A type was registered into the reserved XML Schema namespace
    #[error("could not register types in the builtin schema namespace {namespace}")]
    ReservedNamespace {
        /// The reserved namespace URI
        namespace: String,
    },

    /// No type is known under the requested name and namespace
    #[error("could not provide {} type", QName::new(.namespace.as_deref(), .name.as_str()))]
    UnsupportedType {
        /// Namespace that was searched
        namespace: Option<String>,
        /// Requested local name
        name: String,
    },

    /// Lexical form is not a URI
    #[error("malformed URI \"{lexical}\"")]
    MalformedUri {
        /// The rejected lexical form
        lexical: String,
        /// Parser diagnostics
        #[source]
        reason: url::ParseError,
    },

    /// A configured limit was exceeded
    #[error("limit exceeded: {0}")]
    LimitExceeded(String),
}

impl Error {
    /// Classify the error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::UnsupportedType { .. } => ErrorKind::UnsupportedType,
            _ => ErrorKind::Invalid,
        }
    }

    /// The wrapped failure, for import and export errors
    pub fn cause(&self) -> Option<&Error> {
        match self {
            Error::Import { cause, .. } | Error::Export { cause, .. } => cause.as_deref(),
            _ => None,
        }
    }

    /// The innermost failure in a chain of wrapped errors
    pub fn root_cause(&self) -> &Error {
        let mut current = self;
        while let Some(next) = current.cause() {
            current = next;
        }
        current
    }
}
