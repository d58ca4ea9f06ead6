// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg(test)]

use anyhow::Result;
use dotpath::{AccessError, Repository, Value};

fn config() -> Result<Repository> {
    Ok(Repository::new(Value::from_json_str(
        r#"{
            "app": {"name": "demo", "providers": ["core"]},
            "null": null,
            "feature": false
        }"#,
    )?))
}

#[test]
fn non_mapping_roots_start_empty() -> Result<()> {
    let repo = Repository::new(Value::from_json_str("[1, 2]")?);
    assert_eq!(*repo.all(), Value::new_object());
    assert_eq!(*Repository::default().all(), Value::new_object());
    Ok(())
}

#[test]
fn has_and_get_use_dotted_paths() -> Result<()> {
    let repo = config()?;
    assert!(repo.has("app.name"));
    assert!(repo.has("null"));
    assert!(!repo.has("app.version"));

    assert_eq!(repo.get("app.name"), Value::from("demo"));
    assert_eq!(repo.get("feature"), Value::from(false));
    assert_eq!(repo.get("app.version"), Value::Null);
    assert_eq!(
        repo.get_or("app.version", Value::from("1.0")),
        Value::from("1.0")
    );
    // Present null beats the default.
    assert_eq!(repo.get_or("null", Value::from("x")), Value::Null);
    Ok(())
}

#[test]
fn get_many_mixes_defaults() -> Result<()> {
    let repo = config()?;
    let out = repo.get_many(&[
        ("app.name", None),
        ("app.version", Some(Value::from("1.0"))),
        ("missing", None),
    ]);
    assert_eq!(
        out,
        Value::from_json_str(
            r#"{"app.name": "demo", "app.version": "1.0", "missing": null}"#
        )?
    );
    Ok(())
}

#[test]
fn set_creates_nesting_on_demand() -> Result<()> {
    let mut repo = config()?;
    repo.set("app.version", Value::from("1.0"))?;
    repo.set("cache.ttl", Value::from(60u64))?;
    assert_eq!(repo.get("app.version"), Value::from("1.0"));
    assert_eq!(repo.get("cache.ttl"), Value::from(60u64));
    Ok(())
}

#[test]
fn merge_overlays_top_level_entries() -> Result<()> {
    let mut repo = config()?;
    repo.merge(Value::from_json_str(
        r#"{"feature": true, "extra": {"a": 1}}"#,
    )?);
    assert_eq!(repo.get("feature"), Value::from(true));
    assert_eq!(repo.get("extra.a"), Value::from(1u64));
    assert_eq!(repo.get("app.name"), Value::from("demo"));

    // Anything other than a mapping merges nothing.
    let before = repo.all().clone();
    repo.merge(Value::from(5u64));
    assert_eq!(*repo.all(), before);
    Ok(())
}

#[test]
fn push_and_prepend_edit_sequences() -> Result<()> {
    let mut repo = config()?;
    repo.push("app.providers", Value::from("auth"))?;
    repo.prepend("app.providers", Value::from("boot"))?;
    assert_eq!(
        repo.get("app.providers"),
        Value::from_json_str(r#"["boot", "core", "auth"]"#)?
    );

    // Absent and null entries become fresh sequences.
    repo.push("app.aliases", Value::from("a"))?;
    repo.push("null", Value::from("n"))?;
    assert_eq!(repo.get("app.aliases"), Value::from_json_str(r#"["a"]"#)?);
    assert_eq!(repo.get("null"), Value::from_json_str(r#"["n"]"#)?);

    assert_eq!(
        repo.push("app.name", Value::from("x")),
        Err(AccessError::NotASequence {
            path: "app.name".to_string()
        })
    );
    Ok(())
}

#[test]
fn forget_drops_entries_silently() -> Result<()> {
    let mut repo = config()?;
    repo.forget("app.name");
    repo.forget("no.such.key");
    assert!(!repo.has("app.name"));
    assert!(repo.has("app.providers"));
    Ok(())
}

#[test]
fn subscript_reads_resolve_dotted_paths() -> Result<()> {
    let repo = config()?;
    assert_eq!(repo["app.name"], Value::from("demo"));
    assert_eq!(repo["app.providers.0"], Value::from("core"));
    assert_eq!(repo["missing.path"], Value::Null);
    assert_eq!(repo["app.providers.*"], Value::Null);
    Ok(())
}

#[test]
fn subscript_writes_vivify_like_set() -> Result<()> {
    let mut repo = config()?;
    repo["app.version"] = Value::from("1.0");
    repo["brand.new.key"] = Value::from(true);
    assert_eq!(repo.get("app.version"), Value::from("1.0"));
    assert_eq!(repo.get("brand.new.key"), Value::from(true));
    Ok(())
}
