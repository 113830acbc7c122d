//! Registry integration tests

use pretty_assertions::assert_eq;
use std::sync::Arc;
use xstypes::{
    BuiltinSchema, Error, ErrorKind, GenericComplexType, GenericSchema, Schema, SimpleType,
    TypeRef, XSD_NAMESPACE,
};

/// (name, namespace) pairs that must resolve to anyURI
fn type_ids() -> Vec<(&'static str, Option<&'static str>)> {
    vec![("anyURI", Some(XSD_NAMESPACE)), ("anyURI", None)]
}

fn schemas() -> Vec<Arc<dyn Schema>> {
    vec![BuiltinSchema::shared(), Arc::new(GenericSchema::new())]
}

#[test]
fn test_get_builtin_type() {
    for schema in schemas() {
        for (name, namespace) in type_ids() {
            let ty = schema.get_type(name, namespace).unwrap();
            assert_eq!(ty.name(), Some("anyURI"));
            assert_eq!(ty.namespace_uri(), Some(XSD_NAMESPACE));
        }
    }
}

#[test]
fn test_unknown_type_is_unsupported() {
    for schema in schemas() {
        let err = schema.get_type("doesNotExist", Some(XSD_NAMESPACE)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedType);
        assert!(matches!(err, Error::UnsupportedType { ref name, .. } if name == "doesNotExist"));
    }
}

#[test]
fn test_invalid_type_names() {
    for schema in schemas() {
        for name in [":foo", "--foobar", "", "a:b"] {
            let err = schema.get_type(name, None).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Invalid, "name {:?}", name);
        }
    }
}

#[test]
fn test_set_type_in_reserved_namespace() {
    let mut schema = GenericSchema::new();
    let ty: TypeRef = Arc::new(SimpleType::string());
    let err = schema
        .set_type(Some("myString"), Some(XSD_NAMESPACE), ty)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Invalid);
    assert!(schema.get_type("myString", None).is_err());
}

#[test]
fn test_user_types_layer_over_builtins() {
    let mut schema = GenericSchema::new();
    let link: TypeRef = Arc::new(GenericComplexType::named(Some("urn:example"), "link").unwrap());
    schema.set_type(None, None, Arc::clone(&link)).unwrap();

    assert!(Arc::ptr_eq(
        &schema.get_type("link", Some("urn:example")).unwrap(),
        &link
    ));
    assert_eq!(
        schema.get_type("string", None).unwrap().name(),
        Some("string")
    );
    assert_eq!(
        schema.get_type("link", None).unwrap_err().kind(),
        ErrorKind::UnsupportedType
    );
}

#[test]
fn test_namespace_is_compared_in_normal_form() {
    let mut schema = GenericSchema::new();
    schema
        .set_type(Some("title"), Some("HTTP://Example.com"), Arc::new(SimpleType::string()))
        .unwrap();
    assert!(schema.get_type("title", Some("http://example.com/")).is_ok());
}
