// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Single-pass helpers over [`Value`] containers: the straightforward
//! companions to the path engines in [`crate::access`].

use indexmap::IndexMap;

use crate::access::{self, AccessError};
use crate::path::{Path, Segment};
use crate::value::Value;

/// Set `value` at `path` only when the path currently resolves to nothing
/// or to `Null`.
pub fn add(target: &mut Value, path: &str, value: Value) -> Result<(), AccessError> {
    let path = Path::parse(path);
    if access::get(target, &path).is_null() {
        access::set(target, &path, value)?;
    }
    Ok(())
}

/// Split a container into its keys and its values, as two sequences.
pub fn divide(target: &Value) -> (Value, Value) {
    match target {
        Value::Object(m) => (
            m.keys().map(|k| Value::from(k.as_str())).collect(),
            m.values().cloned().collect(),
        ),
        Value::Array(a) => (
            (0..a.len()).map(Value::from).collect(),
            a.iter().cloned().collect(),
        ),
        _ => (Value::new_array(), Value::new_array()),
    }
}

/// A copy of `target` with the given paths removed.
pub fn except(target: &Value, paths: &[&str]) -> Value {
    let mut out = target.clone();
    let parsed: Vec<Path> = paths.iter().map(|p| Path::parse(p)).collect();
    access::forget(&mut out, parsed.iter());
    out
}

/// Whether `key` is present as a single atomic segment: a mapping key, a
/// sequence index, or an opaque object's key. No dot-splitting.
pub fn exists(target: &Value, key: &str) -> bool {
    access::try_get(target, &Segment::Key(key.into())).is_some()
}

/// First element value of a container, `Null` when empty or not iterable.
pub fn first(target: &Value) -> Value {
    first_where(target, |_, _| true)
}

/// First element value matching `predicate(value, key)`. Sequence keys are
/// numbers, mapping keys are strings.
pub fn first_where<F>(target: &Value, mut predicate: F) -> Value
where
    F: FnMut(&Value, &Value) -> bool,
{
    for (key, value) in entries(target) {
        if predicate(&value, &key) {
            return value;
        }
    }
    Value::Null
}

/// Last element value of a container, `Null` when empty or not iterable.
pub fn last(target: &Value) -> Value {
    last_where(target, |_, _| true)
}

/// Last element value matching `predicate(value, key)`.
pub fn last_where<F>(target: &Value, mut predicate: F) -> Value
where
    F: FnMut(&Value, &Value) -> bool,
{
    let mut found = Value::Null;
    for (key, value) in entries(target) {
        if predicate(&value, &key) {
            found = value;
        }
    }
    found
}

/// The entries matching `predicate(value, key)`: a mapping keeps matching
/// entries under their keys, a sequence keeps matching elements in order.
pub fn filter<F>(target: &Value, mut predicate: F) -> Value
where
    F: FnMut(&Value, &Value) -> bool,
{
    match target {
        Value::Object(m) => Value::from(
            m.iter()
                .filter(|(k, v)| predicate(v, &Value::from(k.as_str())))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect::<IndexMap<String, Value>>(),
        ),
        Value::Array(a) => a
            .iter()
            .enumerate()
            .filter(|(i, v)| predicate(v, &Value::from(*i)))
            .map(|(_, v)| v.clone())
            .collect(),
        _ => Value::new_array(),
    }
}

fn entries(target: &Value) -> Vec<(Value, Value)> {
    match target {
        Value::Object(m) => m
            .iter()
            .map(|(k, v)| (Value::from(k.as_str()), v.clone()))
            .collect(),
        Value::Array(a) => a
            .iter()
            .enumerate()
            .map(|(i, v)| (Value::from(i), v.clone()))
            .collect(),
        _ => vec![],
    }
}

/// Flatten nested containers into a single sequence of leaf values, keys
/// discarded. `Null` leaves are kept.
pub fn flatten(target: &Value) -> Value {
    let mut out = vec![];
    flatten_into(target, &mut out);
    Value::from(out)
}

fn flatten_into(value: &Value, out: &mut Vec<Value>) {
    match value {
        Value::Object(m) => {
            for v in m.values() {
                flatten_into(v, out);
            }
        }
        Value::Array(a) => {
            for v in a.iter() {
                flatten_into(v, out);
            }
        }
        _ => out.push(value.clone()),
    }
}

/// The subset of a mapping holding only the given top-level keys, in their
/// original order.
pub fn only(target: &Value, keys: &[&str]) -> Value {
    match target {
        Value::Object(m) => Value::from(
            m.iter()
                .filter(|(k, _)| keys.contains(&k.as_str()))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect::<IndexMap<String, Value>>(),
        ),
        _ => Value::new_object(),
    }
}

/// A copy of the container with `value` in front: unshifted for a sequence,
/// inserted under `key` as the first entry for a mapping.
pub fn prepend(target: &Value, value: Value, key: Option<&str>) -> Value {
    match (target, key) {
        (Value::Array(a), None) => {
            let mut out = Vec::with_capacity(a.len() + 1);
            out.push(value);
            out.extend(a.iter().cloned());
            Value::from(out)
        }
        (Value::Object(m), Some(key)) => {
            let mut out = IndexMap::with_capacity(m.len() + 1);
            out.insert(key.to_string(), value);
            for (k, v) in m.iter() {
                if k != key {
                    out.insert(k.clone(), v.clone());
                }
            }
            Value::from(out)
        }
        _ => target.clone(),
    }
}

/// Read the value at `path` and remove it, using [`access::forget`]'s
/// literal top-level rule for the removal.
pub fn pull(target: &mut Value, path: &str) -> Value {
    let parsed = Path::parse(path);
    let value = access::get(target, &parsed);
    access::forget(target, [&parsed]);
    value
}

/// Wrap a value in a sequence unless it already is a container; `Null`
/// wraps to an empty sequence.
pub fn wrap(value: &Value) -> Value {
    match value {
        Value::Null => Value::new_array(),
        Value::Array(_) | Value::Object(_) => value.clone(),
        _ => Value::from(vec![value.clone()]),
    }
}

/// Render a mapping as an urlencoded query string. Nested containers use
/// bracket notation, `Null` entries are omitted, and booleans encode as
/// `1`/`0`.
#[cfg(feature = "urlquery")]
pub fn query(target: &Value) -> String {
    let mut pairs: Vec<(String, String)> = vec![];
    collect_pairs(target, "", &mut pairs);
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (k, v) in &pairs {
        serializer.append_pair(k, v);
    }
    serializer.finish()
}

#[cfg(feature = "urlquery")]
fn collect_pairs(value: &Value, prefix: &str, out: &mut Vec<(String, String)>) {
    let nested = |key: &str| {
        if prefix.is_empty() {
            key.to_string()
        } else {
            format!("{prefix}[{key}]")
        }
    };
    match value {
        Value::Object(m) => {
            for (k, v) in m.iter() {
                collect_pairs(v, &nested(k), out);
            }
        }
        Value::Array(a) => {
            for (i, v) in a.iter().enumerate() {
                collect_pairs(v, &nested(&i.to_string()), out);
            }
        }
        Value::Null | Value::Indexable(_) => {}
        Value::Bool(b) => out.push((prefix.to_string(), if *b { "1" } else { "0" }.to_string())),
        Value::Number(n) => out.push((prefix.to_string(), n.to_string())),
        Value::String(s) => out.push((prefix.to_string(), s.to_string())),
    }
}

/// One element value picked uniformly at random, `Null` when there is
/// nothing to pick.
#[cfg(feature = "rand")]
pub fn random(target: &Value) -> Value {
    use rand::seq::IndexedRandom;

    let values = element_values(target);
    match values.choose(&mut rand::rng()) {
        Some(v) => (*v).clone(),
        None => Value::Null,
    }
}

/// `count` distinct element values picked at random, capped at the number
/// of elements.
#[cfg(feature = "rand")]
pub fn sample(target: &Value, count: usize) -> Value {
    use rand::seq::IndexedRandom;

    let values = element_values(target);
    values
        .choose_multiple(&mut rand::rng(), count.min(values.len()))
        .map(|v| (*v).clone())
        .collect()
}

/// The element values in random order.
#[cfg(feature = "rand")]
pub fn shuffle(target: &Value) -> Value {
    use rand::seq::SliceRandom;

    let mut values: Vec<Value> = element_values(target).into_iter().cloned().collect();
    values.shuffle(&mut rand::rng());
    Value::from(values)
}

#[cfg(feature = "rand")]
fn element_values(target: &Value) -> Vec<&Value> {
    match target {
        Value::Object(m) => m.values().collect(),
        Value::Array(a) => a.iter().collect(),
        _ => vec![],
    }
}
