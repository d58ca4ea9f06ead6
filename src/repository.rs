// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::ops;
use std::rc::Rc;

use crate::access::{self, AccessError};
use crate::loader;
use crate::path::Path;
use crate::value::Value;

/// A mutable mapping of configuration items addressed by dotted paths.
///
/// The repository owns its root, which is always a mapping: constructing one
/// from anything else starts empty. Reads go through the same path engines as
/// the free functions in [`crate::access`], so dotted keys, literal top-level
/// keys and defaults all behave identically here.
#[derive(Debug, Clone)]
pub struct Repository {
    items: Value,
}

impl Default for Repository {
    fn default() -> Repository {
        Repository {
            items: Value::new_object(),
        }
    }
}

impl Repository {
    pub fn new(items: Value) -> Repository {
        let items = match items {
            v @ Value::Object(_) => v,
            _ => Value::new_object(),
        };
        Repository { items }
    }

    /// Load a configuration file via [`loader::load_config`] and wrap it.
    pub fn from_file(file: &std::path::Path) -> Repository {
        Repository::new(loader::load_config(file))
    }

    /// The whole item tree.
    pub fn all(&self) -> &Value {
        &self.items
    }

    /// Whether `key` resolves to a present value. Presence, not truthiness.
    pub fn has(&self, key: &str) -> bool {
        access::has(&self.items, &Path::parse(key))
    }

    /// The value at `key`, `Null` when absent.
    pub fn get(&self, key: &str) -> Value {
        access::get(&self.items, &Path::parse(key))
    }

    /// The value at `key`, or `default` when absent.
    pub fn get_or(&self, key: &str, default: Value) -> Value {
        access::get_or(&self.items, &Path::parse(key), default)
    }

    /// Resolve several keys at once, each with an optional default, into a
    /// mapping keyed by the query strings.
    pub fn get_many(&self, queries: &[(&str, Option<Value>)]) -> Value {
        access::get_many(&self.items, queries)
    }

    /// Write `value` at `key`, creating intermediate mappings on demand.
    pub fn set(&mut self, key: &str, value: Value) -> Result<(), AccessError> {
        access::set(&mut self.items, &Path::parse(key), value)
    }

    /// Merge the top-level entries of a mapping over the current items.
    /// Anything other than a mapping merges nothing.
    pub fn merge(&mut self, values: Value) {
        if let (Value::Object(items), Value::Object(new)) = (&mut self.items, values) {
            let items = Rc::make_mut(items);
            for (k, v) in new.iter() {
                items.insert(k.clone(), v.clone());
            }
        }
    }

    /// Append `value` to the sequence at `key`. An absent or `Null` entry
    /// becomes a fresh sequence; anything else non-sequence is an error.
    pub fn push(&mut self, key: &str, value: Value) -> Result<(), AccessError> {
        self.splice(key, value, true)
    }

    /// Insert `value` at the front of the sequence at `key`.
    pub fn prepend(&mut self, key: &str, value: Value) -> Result<(), AccessError> {
        self.splice(key, value, false)
    }

    fn splice(&mut self, key: &str, value: Value, append: bool) -> Result<(), AccessError> {
        let path = Path::parse(key);
        let mut list = match access::get(&self.items, &path) {
            Value::Null => Value::new_array(),
            v @ Value::Array(_) => v,
            _ => {
                return Err(AccessError::NotASequence {
                    path: key.to_string(),
                })
            }
        };
        if let Value::Array(a) = &mut list {
            let a = Rc::make_mut(a);
            if append {
                a.push(value);
            } else {
                a.insert(0, value);
            }
        }
        access::set(&mut self.items, &path, list)
    }

    /// Remove the entry at `key`. Missing paths are a no-op.
    pub fn forget(&mut self, key: &str) {
        access::forget(&mut self.items, [&Path::parse(key)]);
    }
}

/// Subscript read. Resolves dotted paths through mappings and sequences and
/// returns `Null` for anything that does not resolve, including paths that
/// would need wildcard expansion or an opaque read.
impl ops::Index<&str> for Repository {
    type Output = Value;

    fn index(&self, key: &str) -> &Value {
        access::get_ref(&self.items, &Path::parse(key)).unwrap_or(&Value::Null)
    }
}

/// Subscript write. Auto-vivifies intermediate mappings like [`Repository::set`].
///
/// Panics when the path contains a wildcard or crosses an opaque indexable
/// value; use [`Repository::set`] to handle those as errors.
impl ops::IndexMut<&str> for Repository {
    fn index_mut(&mut self, key: &str) -> &mut Value {
        match self.items.make_or_get_mut(&Path::parse(key)) {
            Ok(slot) => slot,
            Err(e) => panic!("{e}"),
        }
    }
}
