// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Configuration file loading: format is picked by file extension, and any
//! failure collapses to an empty mapping rather than an error.

use std::rc::Rc;

use anyhow::{bail, Result};
use indexmap::IndexMap;

use crate::value::Value;

/// Load a configuration file into a [`Value`].
///
/// `json`, `yml`/`yaml` (behind the `yaml` feature) and `ini` are supported.
/// An unreadable file, a parse failure, an unsupported extension, or a
/// non-container document all yield an empty mapping; callers never have to
/// branch on a load error.
pub fn load_config(file: &std::path::Path) -> Value {
    match try_load(file) {
        Ok(v) if v.is_container() => v,
        _ => Value::new_object(),
    }
}

fn try_load(file: &std::path::Path) -> Result<Value> {
    let ext = file.extension().and_then(|e| e.to_str()).unwrap_or("");
    match ext {
        "json" => Value::from_json_file(file),
        #[cfg(feature = "yaml")]
        "yml" | "yaml" => Value::from_yaml_file(file),
        "ini" => {
            let text = std::fs::read_to_string(file)?;
            Ok(parse_ini(&text))
        }
        _ => bail!("unsupported config format `{ext}`"),
    }
}

// Minimal typed INI: `[section]` headers become nested mappings, `;`/`#`
// start comments, and scalar values are scanned for booleans, null and
// numbers unless quoted.
fn parse_ini(text: &str) -> Value {
    let mut root: IndexMap<String, Value> = IndexMap::new();
    let mut section: Option<String> = None;
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
            continue;
        }
        if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            let name = name.trim().to_string();
            root.entry(name.clone()).or_insert_with(Value::new_object);
            section = Some(name);
            continue;
        }
        let Some((key, raw)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim().to_string();
        let value = scan_typed(raw.trim());
        match &section {
            Some(name) => {
                if let Some(Value::Object(m)) = root.get_mut(name) {
                    Rc::make_mut(m).insert(key, value);
                }
            }
            None => {
                root.insert(key, value);
            }
        }
    }
    Value::from(root)
}

fn scan_typed(raw: &str) -> Value {
    if raw.len() >= 2
        && ((raw.starts_with('"') && raw.ends_with('"'))
            || (raw.starts_with('\'') && raw.ends_with('\'')))
    {
        return Value::from(&raw[1..raw.len() - 1]);
    }
    match raw.to_ascii_lowercase().as_str() {
        "" | "null" => return Value::Null,
        "true" | "yes" | "on" => return Value::Bool(true),
        "false" | "no" | "off" => return Value::Bool(false),
        _ => {}
    }
    if let Ok(n) = raw.parse::<i64>() {
        return Value::from(n);
    }
    if let Ok(f) = raw.parse::<f64>() {
        return Value::from(f);
    }
    Value::from(raw)
}
