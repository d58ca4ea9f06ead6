// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Path-addressed reads and writes over nested [`Value`] containers.
//!
//! All operations resolve dotted paths produced by [`crate::path::Path`].
//! A missing path is a first-class result — `false` for [`has`], the default
//! for [`get_or`], a silent no-op for [`forget`] and [`fill`] — never an
//! error. The mutating operations take exclusive access to the root for the
//! duration of the call; that exclusivity is the caller's obligation.

use std::borrow::Cow;
use std::rc::Rc;

use indexmap::IndexMap;
use thiserror::Error;

use crate::path::{parse_index, Path, Segment};
use crate::value::Value;

/// Contract violations surfaced by the mutating operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    /// The root passed to a mutating operation is not a container.
    #[error("cannot {op} through a root value that is not a container")]
    InvalidRoot { op: &'static str },

    /// A write attempted to pass through an opaque indexable value, which
    /// exposes only a read capability.
    #[error("cannot write through an opaque indexable value")]
    OpaqueWrite,

    /// A sequence operation targeted a value that is not a sequence.
    #[error("value at `{path}` is not a sequence")]
    NotASequence { path: String },
}

/// Resolve a single segment against a container.
///
/// Returns the resolved value if the segment matches: mapping entries by
/// exact key, sequence elements by canonical index token, opaque objects via
/// their `exists`/`read` capability. Wildcards are expanded by the engines,
/// never here.
pub fn try_get<'a>(target: &'a Value, segment: &Segment) -> Option<Cow<'a, Value>> {
    let Segment::Key(key) = segment else {
        return None;
    };
    match target {
        Value::Object(m) => m.get(key.as_ref()).map(Cow::Borrowed),
        Value::Array(a) => parse_index(key).and_then(|i| a.get(i)).map(Cow::Borrowed),
        Value::Indexable(o) => {
            if o.exists(key) {
                Some(Cow::Owned(o.read(key)))
            } else {
                None
            }
        }
        _ => None,
    }
}

/// [`get_or`] with a `Null` default.
pub fn get(target: &Value, path: &Path) -> Value {
    get_or_else(target, path, || Value::Null)
}

/// Resolve `path` against `target`, returning `default` when it does not
/// resolve.
pub fn get_or(target: &Value, path: &Path, default: Value) -> Value {
    get_or_else(target, path, move || default)
}

/// Resolve `path` against `target`, computing the default lazily: the thunk
/// runs only when the path fails to resolve.
///
/// The zero-segment path returns the container itself. A non-container root
/// always yields the default. A wildcard segment fans out over the current
/// container in iteration order and collects the remainder's resolutions
/// into a sequence; nested wildcards concatenate their branches flat. The
/// default only replaces the whole result when the value at the first
/// wildcard is not traversable — missing elements below a wildcard simply
/// contribute nothing.
pub fn get_or_else<F>(target: &Value, path: &Path, default: F) -> Value
where
    F: FnOnce() -> Value,
{
    if !target.is_container() {
        return default();
    }
    if path.is_empty() {
        return target.clone();
    }
    // A dotted string that is itself a present top-level key wins over
    // segment-wise traversal.
    if let Some(source) = path.source() {
        if path.segments().len() > 1 {
            if let Some(v) = try_get(target, &Segment::Key(source.into())) {
                return v.into_owned();
            }
        }
    }
    match resolve(target, path.segments()) {
        Some(v) => v,
        None => default(),
    }
}

fn resolve(current: &Value, segments: &[Segment]) -> Option<Value> {
    let Some((segment, rest)) = segments.split_first() else {
        return Some(current.clone());
    };
    match segment {
        Segment::Wildcard => {
            let collapse = rest.iter().any(|s| matches!(s, Segment::Wildcard));
            let mut results = vec![];
            match current {
                Value::Object(m) => {
                    for element in m.values() {
                        fan_out(element, rest, collapse, &mut results);
                    }
                }
                Value::Array(a) => {
                    for element in a.iter() {
                        fan_out(element, rest, collapse, &mut results);
                    }
                }
                _ => return None,
            }
            Some(Value::from(results))
        }
        Segment::Key(_) => match try_get(current, segment)? {
            Cow::Borrowed(v) => resolve(v, rest),
            Cow::Owned(v) => resolve(&v, rest),
        },
    }
}

// When further wildcards follow, branch results are concatenated and only
// sequences survive; otherwise each element contributes exactly one entry,
// Null for a miss.
fn fan_out(element: &Value, rest: &[Segment], collapse: bool, results: &mut Vec<Value>) {
    match resolve(element, rest) {
        Some(Value::Array(items)) if collapse => results.extend(items.iter().cloned()),
        Some(_) if collapse => {}
        Some(v) => results.push(v),
        None if collapse => {}
        None => results.push(Value::Null),
    }
}

/// Borrowed resolution of `path`, walking mappings and sequences only.
///
/// Backs subscript access, which must hand out a reference into the root.
/// Wildcards and opaque indexable values produce owned values and therefore
/// end the walk with a miss.
pub fn get_ref<'a>(target: &'a Value, path: &Path) -> Option<&'a Value> {
    if path.is_empty() {
        return Some(target);
    }
    if let (Some(source), Value::Object(m)) = (path.source(), target) {
        if path.segments().len() > 1 {
            if let Some(v) = m.get(source) {
                return Some(v);
            }
        }
    }
    let mut current = target;
    for segment in path.segments() {
        current = match (current, segment) {
            (Value::Object(m), Segment::Key(k)) => m.get(k.as_ref())?,
            (Value::Array(a), Segment::Key(k)) => a.get(parse_index(k)?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Resolve an ordered set of `(path, default)` queries, returning a mapping
/// from path string to result. A query without its own default resolves with
/// `Null`.
pub fn get_many(target: &Value, queries: &[(&str, Option<Value>)]) -> Value {
    let mut out = IndexMap::new();
    for (path, default) in queries {
        let parsed = Path::parse(path);
        let value = match default {
            Some(d) => get_or(target, &parsed, d.clone()),
            None => get(target, &parsed),
        };
        out.insert((*path).to_string(), value);
    }
    Value::from(out)
}

/// Whether `path` fully resolves against `target`.
///
/// Existence, not truthiness: a present key holding `Null` counts. The
/// zero-segment path never matches, and wildcards are not expanded.
pub fn has(target: &Value, path: &Path) -> bool {
    if path.is_empty() || !target.is_container() {
        return false;
    }
    if let Some(source) = path.source() {
        if path.segments().len() > 1
            && try_get(target, &Segment::Key(source.into())).is_some()
        {
            return true;
        }
    }
    resolves(target, path.segments())
}

fn resolves(current: &Value, segments: &[Segment]) -> bool {
    let Some((segment, rest)) = segments.split_first() else {
        return true;
    };
    match try_get(current, segment) {
        Some(Cow::Borrowed(v)) => resolves(v, rest),
        Some(Cow::Owned(v)) => resolves(&v, rest),
        None => false,
    }
}

/// Whether every path in an ordered set resolves. An empty set is `false`.
pub fn has_all<'p, I>(target: &Value, paths: I) -> bool
where
    I: IntoIterator<Item = &'p Path>,
{
    let mut checked_any = false;
    for path in paths {
        checked_any = true;
        if !has(target, path) {
            return false;
        }
    }
    checked_any
}

/// Write `value` at `path`, creating intermediate mappings on demand and
/// overwriting any existing entry. The zero-segment path replaces the whole
/// root content with `value`.
pub fn set(target: &mut Value, path: &Path, value: Value) -> Result<(), AccessError> {
    if !target.is_container() {
        return Err(AccessError::InvalidRoot { op: "set" });
    }
    if path.is_empty() {
        *target = value;
        return Ok(());
    }
    write(target, path.segments(), value, true)
}

/// [`set`] restricted to currently-absent targets: traversal is identical
/// but a terminal slot that already holds a value keeps it.
pub fn fill(target: &mut Value, path: &Path, value: Value) -> Result<(), AccessError> {
    if !target.is_container() {
        return Err(AccessError::InvalidRoot { op: "fill" });
    }
    if path.is_empty() {
        return Ok(());
    }
    write(target, path.segments(), value, false)
}

enum SeqSlot {
    InRange(usize),
    Append,
    Promote,
}

fn write(
    target: &mut Value,
    segments: &[Segment],
    value: Value,
    overwrite: bool,
) -> Result<(), AccessError> {
    let Some((segment, rest)) = segments.split_first() else {
        return Ok(());
    };
    match segment {
        Segment::Wildcard => {
            if !target.is_container() {
                // Erase-on-miss: a fan-out against nothing becomes an empty
                // mapping with no elements to write into.
                *target = Value::new_object();
                return Ok(());
            }
            match target {
                Value::Object(m) => {
                    for element in Rc::make_mut(m).values_mut() {
                        write_element(element, rest, &value, overwrite)?;
                    }
                }
                Value::Array(a) => {
                    for element in Rc::make_mut(a).iter_mut() {
                        write_element(element, rest, &value, overwrite)?;
                    }
                }
                Value::Indexable(_) => return Err(AccessError::OpaqueWrite),
                _ => {}
            }
            Ok(())
        }
        Segment::Key(key) => {
            if let Value::Indexable(_) = target {
                return Err(AccessError::OpaqueWrite);
            }
            if !target.is_container() {
                *target = Value::new_object();
                if !overwrite {
                    // Fill replaces a scalar with the mapping chain above
                    // the terminal but never plants the terminal value.
                    scaffold(target, segments);
                    return Ok(());
                }
            }

            if let Value::Array(_) = target {
                let slot = match &*target {
                    Value::Array(a) => match parse_index(key) {
                        Some(i) if i < a.len() => SeqSlot::InRange(i),
                        Some(i) if i == a.len() => SeqSlot::Append,
                        _ => SeqSlot::Promote,
                    },
                    _ => SeqSlot::Promote,
                };
                match (slot, target) {
                    (SeqSlot::InRange(i), Value::Array(a)) => {
                        let arr = Rc::make_mut(a);
                        if rest.is_empty() {
                            if overwrite {
                                arr[i] = value;
                            }
                            return Ok(());
                        }
                        return write(&mut arr[i], rest, value, overwrite);
                    }
                    (SeqSlot::Append, Value::Array(a)) => {
                        let arr = Rc::make_mut(a);
                        if rest.is_empty() {
                            arr.push(value);
                            return Ok(());
                        }
                        arr.push(Value::new_object());
                        let end = arr.len() - 1;
                        return write(&mut arr[end], rest, value, overwrite);
                    }
                    (_, target) => {
                        // A token the sequence cannot address turns it into
                        // a mapping keyed by its indices, the closed-model
                        // rendition of a mixed array.
                        promote_to_mapping(target);
                        return write_mapping(target, key, rest, value, overwrite);
                    }
                }
            }
            write_mapping(target, key, rest, value, overwrite)
        }
    }
}

fn write_element(
    element: &mut Value,
    rest: &[Segment],
    value: &Value,
    overwrite: bool,
) -> Result<(), AccessError> {
    if rest.is_empty() {
        if overwrite {
            *element = value.clone();
        }
        Ok(())
    } else {
        write(element, rest, value.clone(), overwrite)
    }
}

fn write_mapping(
    target: &mut Value,
    key: &Rc<str>,
    rest: &[Segment],
    value: Value,
    overwrite: bool,
) -> Result<(), AccessError> {
    let Value::Object(m) = target else {
        return Ok(());
    };
    let m = Rc::make_mut(m);
    if rest.is_empty() {
        if overwrite || !m.contains_key(key.as_ref()) {
            m.insert(key.to_string(), value);
        }
        return Ok(());
    }
    let slot = m
        .entry(key.to_string())
        .or_insert_with(Value::new_object);
    write(slot, rest, value, overwrite)
}

// Build the nesting for all but the last segment, stopping at a wildcard.
fn scaffold(target: &mut Value, mut segments: &[Segment]) {
    let mut current = target;
    while let Some((Segment::Key(key), rest)) = segments.split_first() {
        if rest.is_empty() {
            break;
        }
        let Value::Object(m) = current else {
            break;
        };
        current = Rc::make_mut(m)
            .entry(key.to_string())
            .or_insert_with(Value::new_object);
        if !matches!(current, Value::Object(_)) {
            *current = Value::new_object();
        }
        segments = rest;
    }
}

fn promote_to_mapping(target: &mut Value) {
    if let Value::Array(a) = &*target {
        let map: IndexMap<String, Value> = a
            .iter()
            .cloned()
            .enumerate()
            .map(|(i, v)| (i.to_string(), v))
            .collect();
        *target = Value::from(map);
    }
}

/// Delete each path from the nested mapping, in order.
///
/// A dotted string that is itself a present top-level key is removed
/// directly and never reinterpreted as a nested path. Otherwise all but the
/// last segment walk through existing mapping nesting only; a missing
/// intermediate silently skips that path. Deleting from a root that is not a
/// mapping is a no-op.
pub fn forget<'p, I>(target: &mut Value, paths: I)
where
    I: IntoIterator<Item = &'p Path>,
{
    for path in paths {
        if path.is_empty() {
            continue;
        }
        if let (Some(source), Value::Object(m)) = (path.source(), &mut *target) {
            if m.contains_key(source) {
                Rc::make_mut(m).shift_remove(source);
                continue;
            }
        }
        let Some((last, parents)) = path.segments().split_last() else {
            continue;
        };
        let parent = parents.iter().try_fold(&mut *target, |current, segment| {
            let Segment::Key(key) = segment else {
                return None;
            };
            match current {
                Value::Object(m) if m.contains_key(key.as_ref()) => {
                    Rc::make_mut(m).get_mut(key.as_ref())
                }
                _ => None,
            }
        });
        if let (Some(Value::Object(m)), Segment::Key(key)) = (parent, last) {
            Rc::make_mut(m).shift_remove(key.as_ref());
        }
    }
}

/// Flatten a nested mapping into a single-level mapping keyed by full dotted
/// paths. Sequences and opaque objects are leaves; an empty nested mapping is
/// kept as an explicit empty-mapping leaf.
pub fn dot(target: &Value) -> Value {
    let mut flat = IndexMap::new();
    flatten_into(target, "", &mut flat);
    Value::from(flat)
}

fn flatten_into(value: &Value, prefix: &str, out: &mut IndexMap<String, Value>) {
    if let Value::Object(m) = value {
        for (k, v) in m.iter() {
            match v {
                Value::Object(inner) if !inner.is_empty() => {
                    flatten_into(v, &format!("{prefix}{k}."), out);
                }
                _ => {
                    out.insert(format!("{prefix}{k}"), v.clone());
                }
            }
        }
    }
}

/// Re-expand a [`dot`]-flattened mapping into nested mapping structure.
pub fn undot(flat: &Value) -> Result<Value, AccessError> {
    let mut out = Value::new_object();
    if let Value::Object(m) = flat {
        for (k, v) in m.iter() {
            set(&mut out, &Path::parse(k), v.clone())?;
        }
    }
    Ok(out)
}
