// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

// Use README.md as crate documentation.
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/README.md"))]

mod access;
mod loader;
mod path;
mod repository;
mod value;

/// Order-preserving helpers over whole containers.
pub mod collection;
/// Multibyte-aware case conversions and substring helpers.
pub mod string;

pub use access::{
    dot, fill, forget, get, get_many, get_or, get_or_else, get_ref, has, has_all, set, try_get,
    undot, AccessError,
};
pub use loader::load_config;
pub use path::{Path, Segment};
pub use repository::Repository;
pub use value::{Indexable, Value};
