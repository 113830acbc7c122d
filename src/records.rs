//! Record normalization
//!
//! Structural checks applied to record items before any type looks at
//! them. A normalized item contains only plain data (no objects), finite
//! numbers, non-empty record keys, and stays within the configured
//! [`Limits`].

use crate::limits::Limits;
use crate::values::{Record, Value, ValueKind};
use thiserror::Error;

/// Why a record item was rejected
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecordError {
    /// A record key is the empty string
    #[error("empty key in record at {path}")]
    EmptyKey {
        /// Location of the record
        path: String,
    },

    /// A float is NaN or infinite
    #[error("non-finite number at {path}")]
    NonFinite {
        /// Location of the number
        path: String,
    },

    /// An object appears where only plain data is allowed
    #[error("{kind} is not plain record data at {path}")]
    Object {
        /// Kind of the object
        kind: ValueKind,
        /// Location of the object
        path: String,
    },

    /// Lists and records are nested too deeply
    #[error("nesting at {path} exceeds maximum depth {max}")]
    TooDeep {
        /// Location where the limit was hit
        path: String,
        /// Configured maximum depth
        max: usize,
    },

    /// A list or record has too many entries
    #[error("{found} entries at {path} exceed maximum {max}")]
    TooLarge {
        /// Location of the container
        path: String,
        /// Number of entries found
        found: usize,
        /// Configured maximum
        max: usize,
    },
}

/// Normalize a single record item
pub fn normalize_item(item: &Value, limits: &Limits) -> Result<Value, RecordError> {
    normalize_at(item, limits, "", 0)
}

/// Normalize a complex-structure record
///
/// Lists are viewed as records keyed by their decimal indexes. Returns
/// `Ok(None)` when `input` is neither a record nor a list.
pub fn normalize_record(input: &Value, limits: &Limits) -> Result<Option<Record>, RecordError> {
    let record = match input {
        Value::Record(record) => record.clone(),
        Value::List(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| (i.to_string(), item.clone()))
            .collect(),
        _ => return Ok(None),
    };

    match normalize_item(&Value::Record(record), limits)? {
        Value::Record(record) => Ok(Some(record)),
        _ => Ok(None),
    }
}

fn normalize_at(item: &Value, limits: &Limits, path: &str, depth: usize) -> Result<Value, RecordError> {
    match item {
        Value::Null | Value::Boolean(_) | Value::Integer(_) | Value::String(_) => Ok(item.clone()),
        Value::Float(v) if v.is_finite() => Ok(item.clone()),
        Value::Float(_) => Err(RecordError::NonFinite {
            path: display_path(path),
        }),
        Value::Uri(_) => Err(RecordError::Object {
            kind: item.kind(),
            path: display_path(path),
        }),
        Value::List(items) => {
            check_container(limits, path, depth, items.len())?;
            let mut normalized = Vec::with_capacity(items.len());
            for (i, child) in items.iter().enumerate() {
                let child_path = format!("{}/{}", path, i);
                normalized.push(normalize_at(child, limits, &child_path, depth + 1)?);
            }
            Ok(Value::List(normalized))
        }
        Value::Record(record) => {
            check_container(limits, path, depth, record.len())?;
            let mut normalized = Record::with_capacity(record.len());
            for (key, child) in record {
                if key.is_empty() {
                    return Err(RecordError::EmptyKey {
                        path: display_path(path),
                    });
                }
                let child_path = format!("{}/{}", path, key);
                normalized.insert(key.clone(), normalize_at(child, limits, &child_path, depth + 1)?);
            }
            Ok(Value::Record(normalized))
        }
    }
}

fn check_container(limits: &Limits, path: &str, depth: usize, len: usize) -> Result<(), RecordError> {
    if depth >= limits.max_item_depth {
        return Err(RecordError::TooDeep {
            path: display_path(path),
            max: limits.max_item_depth,
        });
    }
    if len > limits.max_record_entries {
        return Err(RecordError::TooLarge {
            path: display_path(path),
            found: len,
            max: limits.max_record_entries,
        });
    }
    Ok(())
}

fn display_path(path: &str) -> String {
    if path.is_empty() {
        "/".to_string()
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    #[test]
    fn test_scalars_pass_through() {
        let limits = Limits::default();
        for item in [
            Value::Null,
            Value::Boolean(false),
            Value::Integer(-7),
            Value::Float(0.25),
            Value::from("text"),
        ] {
            assert_eq!(normalize_item(&item, &limits).unwrap(), item);
        }
    }

    #[test]
    fn test_rejects_objects() {
        let uri = Url::parse("http://example.com/").unwrap();
        let item = Value::record([("foo", Value::Uri(uri))]);
        let err = normalize_item(&item, &Limits::default()).unwrap_err();
        assert_eq!(
            err,
            RecordError::Object {
                kind: ValueKind::Uri,
                path: "/foo".to_string()
            }
        );
    }

    #[test]
    fn test_rejects_empty_key_and_non_finite() {
        let item = Value::record([("", Value::Integer(1))]);
        assert!(matches!(
            normalize_item(&item, &Limits::default()),
            Err(RecordError::EmptyKey { .. })
        ));

        let item = Value::List(vec![Value::Integer(1), Value::Float(f64::NAN)]);
        assert_eq!(
            normalize_item(&item, &Limits::default()).unwrap_err(),
            RecordError::NonFinite {
                path: "/1".to_string()
            }
        );
    }

    #[test]
    fn test_depth_limit() {
        let limits = Limits {
            max_item_depth: 2,
            ..Limits::default()
        };
        let shallow = Value::record([("a", Value::record([("b", 1i64)]))]);
        assert!(normalize_item(&shallow, &limits).is_ok());

        let deep = Value::record([("a", Value::record([("b", Value::List(vec![]))]))]);
        assert!(matches!(
            normalize_item(&deep, &limits),
            Err(RecordError::TooDeep { max: 2, .. })
        ));
    }

    #[test]
    fn test_size_limit() {
        let limits = Limits {
            max_record_entries: 2,
            ..Limits::default()
        };
        let item = Value::List(vec![Value::Null, Value::Null, Value::Null]);
        assert!(matches!(
            normalize_item(&item, &limits),
            Err(RecordError::TooLarge { found: 3, .. })
        ));
    }

    #[test]
    fn test_normalize_record() {
        let limits = Limits::default();
        let list = Value::List(vec![Value::from("a"), Value::from("b")]);
        let record = normalize_record(&list, &limits).unwrap().unwrap();
        let keys: Vec<&str> = record.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["0", "1"]);

        assert_eq!(normalize_record(&Value::from("x"), &limits).unwrap(), None);
    }
}
