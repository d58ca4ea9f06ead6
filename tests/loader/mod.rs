// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg(test)]

use std::io::Write;

use anyhow::Result;
use dotpath::{load_config, Value};

fn write_temp(suffix: &str, contents: &str) -> Result<tempfile::NamedTempFile> {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile()?;
    file.write_all(contents.as_bytes())?;
    Ok(file)
}

#[test]
fn json_files_load_into_mappings() -> Result<()> {
    let file = write_temp(".json", r#"{"app": {"name": "demo"}, "debug": true}"#)?;
    let v = load_config(file.path());
    assert_eq!(v["app"]["name"], Value::from("demo"));
    assert_eq!(v["debug"], Value::from(true));
    Ok(())
}

#[cfg(feature = "yaml")]
#[test]
fn yaml_files_load_into_mappings() -> Result<()> {
    let file = write_temp(".yaml", "app:\n  name: demo\nports:\n  - 80\n")?;
    let v = load_config(file.path());
    assert_eq!(v["app"]["name"], Value::from("demo"));
    assert_eq!(v["ports"][0], Value::from(80u64));
    Ok(())
}

#[test]
fn ini_files_load_with_typed_scalars() -> Result<()> {
    let file = write_temp(
        ".ini",
        "name = demo\ndebug = yes\n\n[server]\nport = 8080\n",
    )?;
    let v = load_config(file.path());
    assert_eq!(v["name"], Value::from("demo"));
    assert_eq!(v["debug"], Value::from(true));
    assert_eq!(v["server"]["port"], Value::from(8080i64));
    Ok(())
}

#[test]
fn failures_collapse_to_an_empty_mapping() -> Result<()> {
    // Missing file.
    let missing = std::path::Path::new("/no/such/config.json");
    assert_eq!(load_config(missing), Value::new_object());

    // Unsupported extension, even with valid JSON inside.
    let file = write_temp(".php", r#"{"a": 1}"#)?;
    assert_eq!(load_config(file.path()), Value::new_object());

    // Parse failure.
    let file = write_temp(".json", "{not json")?;
    assert_eq!(load_config(file.path()), Value::new_object());

    // A scalar document is not a container.
    let file = write_temp(".json", "5")?;
    assert_eq!(load_config(file.path()), Value::new_object());
    Ok(())
}
