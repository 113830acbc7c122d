//! Complex types
//!
//! A complex type maps NCName field keys to member types. Importing a
//! record imports each field through its member type; exporting does the
//! reverse. The per-field loop lives in [`ComplexTypeCodec`] so that any
//! complex type can reuse it; [`GenericComplexType`] pairs a codec with a
//! type identity.

use super::{label_of, TypeConverter};
use crate::error::{Error, Result, TypeLabel};
use crate::limits::Limits;
use crate::names::validate_ncname_for;
use crate::namespaces::QName;
use crate::records::normalize_record;
use crate::schemas::normalize_namespace;
use crate::values::{Record, Value};
use indexmap::IndexMap;
use std::sync::Arc;

/// Which field keys a complex import or export visits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyPolicy {
    /// Every key present in the input, in input order
    #[default]
    Present,
    /// Every declared member, in declaration order, present or not
    Declared,
}

/// Per-field import/export over a fixed member map
#[derive(Debug, Clone, Default)]
pub struct ComplexTypeCodec {
    members: IndexMap<String, Arc<dyn TypeConverter>>,
    policy: KeyPolicy,
    limits: Limits,
}

impl ComplexTypeCodec {
    /// Create an empty codec
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the key policy
    pub fn with_key_policy(mut self, policy: KeyPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the limits applied to incoming records
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Get the key policy
    pub fn key_policy(&self) -> KeyPolicy {
        self.policy
    }

    /// Declare or replace a member
    pub fn set_member(&mut self, key: &str, ty: Arc<dyn TypeConverter>, owner: &TypeLabel) -> Result<()> {
        validate_ncname_for(key, owner)?;
        self.members.insert(key.to_string(), ty);
        Ok(())
    }

    /// Look up a member type
    pub fn member(&self, key: &str, owner: &TypeLabel) -> Result<&Arc<dyn TypeConverter>> {
        validate_ncname_for(key, owner)?;
        self.members.get(key).ok_or_else(|| Error::NoSuchMember {
            key: key.to_string(),
            target: owner.clone(),
        })
    }

    /// Declared member keys, in declaration order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.members.keys().map(|k| k.as_str())
    }

    /// Number of declared members
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Check if no members are declared
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Import a record on behalf of `owner`
    ///
    /// Missing fields are imported as [`Value::Null`]. Nothing is returned
    /// unless every field imports.
    pub fn import(&self, input: &Value, owner: &TypeLabel) -> Result<Value> {
        let record = match normalize_record(input, &self.limits) {
            Ok(Some(record)) => record,
            Ok(None) => {
                return Err(Error::NotComplex {
                    subject: input.kind(),
                    target: owner.clone(),
                })
            }
            Err(reason) => {
                return Err(Error::MalformedRecord {
                    target: owner.clone(),
                    reason,
                })
            }
        };

        let keys = self.keys_for(&record);
        let mut value = Record::with_capacity(keys.len());
        for key in keys {
            let data = record.get(&key).unwrap_or(&Value::Null);
            let imported = self
                .member(&key, owner)
                .and_then(|ty| ty.import(data))
                .map_err(|e| {
                    log::debug!("member \"{}\" of {} rejected input: {}", key, owner.describe("complex type"), e);
                    Error::Import {
                        subject: input.kind(),
                        target: owner.clone(),
                        cause: Some(Box::new(e)),
                    }
                })?;
            value.insert(key, imported);
        }

        Ok(Value::Record(value))
    }

    /// Export a record value on behalf of `owner`
    pub fn export(&self, value: &Value, owner: &TypeLabel) -> Result<Value> {
        let record = match value {
            Value::Record(record) => record.clone(),
            Value::List(items) => items
                .iter()
                .enumerate()
                .map(|(i, item)| (i.to_string(), item.clone()))
                .collect(),
            _ => {
                return Err(Error::Export {
                    subject: value.kind(),
                    target: owner.clone(),
                    cause: None,
                })
            }
        };

        let keys = self.keys_for(&record);
        let mut output = Record::with_capacity(keys.len());
        for key in keys {
            let data = record.get(&key).unwrap_or(&Value::Null);
            let exported = self
                .member(&key, owner)
                .and_then(|ty| ty.export(data))
                .map_err(|e| {
                    log::debug!("member \"{}\" of {} rejected value: {}", key, owner.describe("complex type"), e);
                    Error::Export {
                        subject: value.kind(),
                        target: owner.clone(),
                        cause: Some(Box::new(e)),
                    }
                })?;
            output.insert(key, exported);
        }

        Ok(Value::Record(output))
    }

    fn keys_for(&self, record: &Record) -> Vec<String> {
        match self.policy {
            KeyPolicy::Present => record.keys().cloned().collect(),
            KeyPolicy::Declared => self.members.keys().cloned().collect(),
        }
    }
}

/// A complex type assembled at runtime from member types
#[derive(Debug, Clone, Default)]
pub struct GenericComplexType {
    qname: Option<QName>,
    codec: ComplexTypeCodec,
}

impl GenericComplexType {
    /// Create an anonymous complex type without members
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a named complex type
    ///
    /// `name` must be an NCName and `namespace`, if given, a URI.
    pub fn named(namespace: Option<&str>, name: &str) -> Result<Self> {
        validate_ncname_for(name, &TypeLabel::unnamed())?;
        let namespace = normalize_namespace(namespace)?;
        Ok(Self {
            qname: Some(QName::new(namespace, name)),
            codec: ComplexTypeCodec::default(),
        })
    }

    /// Set the key policy
    pub fn with_key_policy(mut self, policy: KeyPolicy) -> Self {
        self.codec = self.codec.with_key_policy(policy);
        self
    }

    /// Set the limits applied to incoming records
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.codec = self.codec.with_limits(limits);
        self
    }

    /// Declare a member, builder style
    pub fn with_member(mut self, key: &str, ty: Arc<dyn TypeConverter>) -> Result<Self> {
        self.set_member_type(key, ty)?;
        Ok(self)
    }

    /// Declare or replace the member type for `key`
    pub fn set_member_type(&mut self, key: &str, ty: Arc<dyn TypeConverter>) -> Result<()> {
        let owner = label_of(&*self);
        self.codec.set_member(key, ty, &owner)
    }

    /// Get the member type for `key`
    pub fn member_type(&self, key: &str) -> Result<Arc<dyn TypeConverter>> {
        self.codec.member(key, &label_of(self)).cloned()
    }

    /// The underlying codec
    pub fn codec(&self) -> &ComplexTypeCodec {
        &self.codec
    }
}

impl TypeConverter for GenericComplexType {
    fn name(&self) -> Option<&str> {
        self.qname.as_ref().map(|q| q.local_name.as_str())
    }

    fn namespace_uri(&self) -> Option<&str> {
        self.qname.as_ref().and_then(|q| q.namespace.as_deref())
    }

    fn import(&self, input: &Value) -> Result<Value> {
        self.codec.import(input, &label_of(self))
    }

    fn export(&self, value: &Value) -> Result<Value> {
        self.codec.export(value, &label_of(self))
    }
}
