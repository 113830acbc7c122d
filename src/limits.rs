//! Limits and constraints for record processing
//!
//! This module defines limits that keep record normalization and type
//! registration bounded when the input comes from an untrusted source.
//! Limits can be loaded from JSON; missing fields keep their defaults.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Global limits configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Maximum nesting depth of lists and records inside a record item
    pub max_item_depth: usize,

    /// Maximum number of entries in a single list or record
    pub max_record_entries: usize,

    /// Maximum number of types a generic schema will accept
    pub max_registered_types: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_item_depth: 64,
            max_record_entries: 100_000,
            max_registered_types: 10_000,
        }
    }
}

impl Limits {
    /// Create a new Limits with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Create strict limits (more restrictive)
    pub fn strict() -> Self {
        Self {
            max_item_depth: 16,
            max_record_entries: 1_000,
            max_registered_types: 1_000,
        }
    }

    /// Create permissive limits (less restrictive, use with caution)
    pub fn permissive() -> Self {
        Self {
            max_item_depth: 1_024,
            max_record_entries: 10_000_000,
            max_registered_types: 1_000_000,
        }
    }

    /// Check whether one more type may be registered
    pub fn check_registered_types(&self, count: usize) -> Result<()> {
        if count >= self.max_registered_types {
            Err(Error::LimitExceeded(format!(
                "registering type {} exceeds maximum {}",
                count + 1,
                self.max_registered_types
            )))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits() {
        let limits = Limits::default();
        assert_eq!(limits.max_item_depth, 64);
        assert_eq!(limits, Limits::new());
    }

    #[test]
    fn test_strict_limits() {
        let limits = Limits::strict();
        assert!(limits.max_item_depth < Limits::default().max_item_depth);
        assert!(limits.max_record_entries < Limits::default().max_record_entries);
    }

    #[test]
    fn test_permissive_limits() {
        let limits = Limits::permissive();
        assert!(limits.max_item_depth > Limits::default().max_item_depth);
        assert!(limits.max_registered_types > Limits::default().max_registered_types);
    }

    #[test]
    fn test_check_registered_types() {
        let limits = Limits {
            max_registered_types: 2,
            ..Limits::default()
        };
        assert!(limits.check_registered_types(0).is_ok());
        assert!(limits.check_registered_types(1).is_ok());
        assert!(matches!(
            limits.check_registered_types(2),
            Err(Error::LimitExceeded(_))
        ));
    }

    #[test]
    fn test_load_partial_json() {
        let limits: Limits = serde_json::from_str(r#"{"max_item_depth": 8}"#).unwrap();
        assert_eq!(limits.max_item_depth, 8);
        assert_eq!(limits.max_record_entries, Limits::default().max_record_entries);

        let text = serde_json::to_string(&Limits::strict()).unwrap();
        assert_eq!(serde_json::from_str::<Limits>(&text).unwrap(), Limits::strict());
    }
}
