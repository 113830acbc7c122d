//! XSD built-in types
//!
//! The primitive types every registry can fall back to: the ur-type
//! `anyType`, the string-valued `anySimpleType`, `anyAtomicType` and
//! `string`, and `anyURI`.

use super::{export_error, import_error, label_of, lexical_of, TypeConverter};
use crate::error::{Error, Result};
use crate::limits::Limits;
use crate::namespaces::XSD_NAMESPACE;
use crate::records::normalize_item;
use crate::uri::{UriFactory, UrlFactory};
use crate::values::Value;
use std::sync::Arc;

/// XSD anyType type name
pub const XSD_ANY_TYPE: &str = "anyType";
/// XSD anySimpleType type name
pub const XSD_ANY_SIMPLE_TYPE: &str = "anySimpleType";
/// XSD anyAtomicType type name
pub const XSD_ANY_ATOMIC_TYPE: &str = "anyAtomicType";
/// XSD string type name
pub const XSD_STRING: &str = "string";
/// XSD anyURI type name
pub const XSD_ANY_URI: &str = "anyURI";

// =============================================================================
// anyType
// =============================================================================

/// The ur-type: accepts any well-formed record item as is
#[derive(Debug, Clone, Default)]
pub struct UrType {
    limits: Limits,
}

impl UrType {
    /// Create the ur-type with default limits
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the limits applied to record items
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    fn normalize(&self, item: &Value) -> Result<Value> {
        normalize_item(item, &self.limits).map_err(|reason| Error::MalformedItem {
            subject: item.kind(),
            target: label_of(self),
            reason,
        })
    }
}

impl TypeConverter for UrType {
    fn name(&self) -> Option<&str> {
        Some(XSD_ANY_TYPE)
    }

    fn namespace_uri(&self) -> Option<&str> {
        Some(XSD_NAMESPACE)
    }

    fn import(&self, input: &Value) -> Result<Value> {
        self.normalize(input)
            .map_err(|e| import_error(self, input, Some(e)))
    }

    fn export(&self, value: &Value) -> Result<Value> {
        self.normalize(value)
            .map_err(|e| export_error(self, value, Some(e)))
    }
}

// =============================================================================
// anySimpleType, anyAtomicType, string
// =============================================================================

/// A built-in type whose value space is its lexical space
///
/// Any string-convertible input imports as its string form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimpleType {
    name: &'static str,
}

impl SimpleType {
    /// The `anySimpleType` type
    pub const fn any_simple_type() -> Self {
        Self {
            name: XSD_ANY_SIMPLE_TYPE,
        }
    }

    /// The `anyAtomicType` type
    pub const fn any_atomic_type() -> Self {
        Self {
            name: XSD_ANY_ATOMIC_TYPE,
        }
    }

    /// The `string` type
    pub const fn string() -> Self {
        Self { name: XSD_STRING }
    }
}

impl TypeConverter for SimpleType {
    fn name(&self) -> Option<&str> {
        Some(self.name)
    }

    fn namespace_uri(&self) -> Option<&str> {
        Some(XSD_NAMESPACE)
    }

    fn import(&self, input: &Value) -> Result<Value> {
        lexical_of(input)
            .map(Value::String)
            .map_err(|e| import_error(self, input, Some(e)))
    }

    fn export(&self, value: &Value) -> Result<Value> {
        lexical_of(value)
            .map(Value::String)
            .map_err(|e| export_error(self, value, Some(e)))
    }
}

// =============================================================================
// anyURI
// =============================================================================

/// The `anyURI` type: imports lexical URIs as parsed [`url::Url`] values
#[derive(Debug, Clone)]
pub struct AnyUriType {
    factory: Arc<dyn UriFactory>,
}

impl Default for AnyUriType {
    fn default() -> Self {
        Self::new()
    }
}

impl AnyUriType {
    /// Create the type with the default URL parser
    pub fn new() -> Self {
        Self {
            factory: Arc::new(UrlFactory),
        }
    }

    /// Create the type with a custom URI factory
    pub fn with_factory(factory: Arc<dyn UriFactory>) -> Self {
        Self { factory }
    }

    fn parse(&self, value: &Value) -> Result<url::Url> {
        let lexical = lexical_of(value)?;
        self.factory
            .parse(&lexical)
            .map_err(|reason| Error::MalformedUri { lexical, reason })
    }
}

impl TypeConverter for AnyUriType {
    fn name(&self) -> Option<&str> {
        Some(XSD_ANY_URI)
    }

    fn namespace_uri(&self) -> Option<&str> {
        Some(XSD_NAMESPACE)
    }

    fn import(&self, input: &Value) -> Result<Value> {
        self.parse(input)
            .map(Value::Uri)
            .map_err(|e| import_error(self, input, Some(e)))
    }

    fn export(&self, value: &Value) -> Result<Value> {
        let uri = match value {
            Value::Uri(uri) => uri.clone(),
            _ => self
                .parse(value)
                .map_err(|e| export_error(self, value, Some(e)))?,
        };
        Ok(Value::String(uri.as_str().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, TypeLabel};
    use crate::namespaces::QName;
    use crate::records::RecordError;
    use crate::values::ValueKind;
    use url::Url;

    fn uri(text: &str) -> Value {
        Value::Uri(Url::parse(text).unwrap())
    }

    /// Inputs no built-in type accepts
    fn invalid_inputs() -> Vec<Value> {
        vec![
            Value::record([("foo", uri("http://example.com/"))]),
            Value::record([("", Value::from("bar"))]),
        ]
    }

    #[test]
    fn test_identity() {
        assert_eq!(UrType::new().name(), Some("anyType"));
        assert_eq!(SimpleType::any_simple_type().name(), Some("anySimpleType"));
        assert_eq!(SimpleType::any_atomic_type().name(), Some("anyAtomicType"));
        assert_eq!(SimpleType::string().name(), Some("string"));
        assert_eq!(AnyUriType::new().name(), Some("anyURI"));
        assert_eq!(AnyUriType::new().namespace_uri(), Some(XSD_NAMESPACE));
    }

    #[test]
    fn test_ur_type_accepts_plain_items() {
        let ty = UrType::new();
        let item = Value::record([
            ("title", Value::from("x")),
            ("tags", Value::List(vec![Value::from("a"), Value::Integer(1)])),
        ]);
        let value = ty.import(&item).unwrap();
        assert_eq!(value, item);
        assert_eq!(ty.export(&value).unwrap(), item);
    }

    #[test]
    fn test_ur_type_rejects_malformed_items() {
        let ty = UrType::new();
        for input in invalid_inputs() {
            let err = ty.import(&input).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Invalid);
            assert!(matches!(err.cause(), Some(Error::MalformedItem { .. })));
        }

        let err = ty.export(&uri("http://example.com/")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "could not export instance of Url as {http://www.w3.org/2001/XMLSchema}anyType"
        );
        match err.cause() {
            Some(Error::MalformedItem { reason, .. }) => assert_eq!(
                reason,
                &RecordError::Object {
                    kind: ValueKind::Uri,
                    path: "/".to_string()
                }
            ),
            other => panic!("unexpected cause: {:?}", other),
        }
    }

    #[test]
    fn test_string_import_export() {
        let ty = SimpleType::string();
        assert_eq!(ty.import(&Value::from("foo")).unwrap(), Value::from("foo"));
        assert_eq!(ty.import(&Value::Integer(12)).unwrap(), Value::from("12"));
        assert_eq!(ty.import(&Value::Boolean(false)).unwrap(), Value::from("false"));
        assert_eq!(
            ty.import(&uri("http://example.com/")).unwrap(),
            Value::from("http://example.com/")
        );
        assert_eq!(ty.export(&Value::from("bar")).unwrap(), Value::from("bar"));
    }

    #[test]
    fn test_string_rejects_non_stringable() {
        let ty = SimpleType::string();
        for input in [Value::Null, Value::List(vec![]), Value::record([("a", 1i64)])] {
            let err = ty.import(&input).unwrap_err();
            assert!(matches!(err.cause(), Some(Error::NotString { .. })));
            assert!(ty.export(&input).is_err());
        }
    }

    #[test]
    fn test_any_uri_import() {
        let ty = AnyUriType::new();
        for text in ["urn:example:test", "http://example.com/"] {
            let value = ty.import(&Value::from(text)).unwrap();
            assert_eq!(value, uri(text));
            let output = ty.export(&value).unwrap();
            assert_eq!(ty.import(&output).unwrap(), uri(text));
        }
    }

    #[test]
    fn test_any_uri_export() {
        let ty = AnyUriType::new();
        for text in ["urn:example:test", "http://example.com/"] {
            assert_eq!(ty.export(&uri(text)).unwrap(), Value::from(text));
            assert_eq!(ty.export(&Value::from(text)).unwrap(), Value::from(text));
        }
        assert_eq!(
            ty.export(&Value::from("HTTP://Example.COM")).unwrap(),
            Value::from("http://example.com/")
        );
    }

    #[test]
    fn test_any_uri_rejects_malformed() {
        let ty = AnyUriType::new();
        for text in ["--not-an-uri--", ""] {
            let err = ty.import(&Value::from(text)).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Invalid);
            assert!(matches!(err.cause(), Some(Error::MalformedUri { .. })));
            assert!(ty.export(&Value::from(text)).is_err());
        }
        for input in invalid_inputs() {
            assert!(ty.import(&input).is_err());
            assert!(ty.export(&input).is_err());
        }

        let err = ty.import(&Value::from("--not-an-uri--")).unwrap_err();
        match err {
            Error::Import { subject, target, .. } => {
                assert_eq!(subject, ValueKind::String);
                assert_eq!(target, TypeLabel::named(QName::xsd("anyURI")));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[derive(Debug)]
    struct HttpOnlyFactory;

    impl UriFactory for HttpOnlyFactory {
        fn parse(&self, lexical: &str) -> std::result::Result<Url, url::ParseError> {
            let uri = Url::parse(lexical)?;
            if uri.scheme() == "http" || uri.scheme() == "https" {
                Ok(uri)
            } else {
                Err(url::ParseError::RelativeUrlWithoutBase)
            }
        }
    }

    #[test]
    fn test_any_uri_custom_factory() {
        let ty = AnyUriType::with_factory(Arc::new(HttpOnlyFactory));
        assert!(ty.import(&Value::from("http://example.com/")).is_ok());
        assert!(ty.import(&Value::from("urn:example:test")).is_err());
    }

    #[test]
    fn test_compatible_with_ur_type() {
        let ty = AnyUriType::new();
        let ur = UrType::new();
        let value = uri("http://example.com/");

        let alpha = ty.export_to(&ur, &value).unwrap();
        let backport = ty.import_from(&ur, &alpha).unwrap();
        let beta = ty.export_to(&ur, &backport).unwrap();
        assert_eq!(alpha, beta);
        assert_eq!(backport, value);
    }
}
