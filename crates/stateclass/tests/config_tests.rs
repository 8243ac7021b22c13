//! Config loading tests

use stateclass::*;
use std::path::PathBuf;
use tempfile::TempDir;

fn temp_config(contents: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stateclass.toml");
    std::fs::write(&path, contents).unwrap();
    (dir, path)
}

#[test]
fn test_load_from_file() {
    let (_dir, path) = temp_config(
        r#"
        separator = "|"

        [attributes]
        class = "data-state"
        target = "data-state-target"

        [keywords]
        trigger = "this"
        "#,
    );

    let config = StateclassConfig::load(&path).unwrap();

    assert_eq!(config.separator, "|");
    assert_eq!(config.attributes.class, "data-state");
    assert_eq!(config.attributes.scope, "data-class-scope");
    assert_eq!(config.keywords.trigger, "this");
    assert_eq!(config.keywords.unscoped, "false");
}

#[test]
fn test_load_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.toml");
    assert!(matches!(
        StateclassConfig::load(&path),
        Err(StateclassError::Io(_))
    ));
}

#[test]
fn test_loaded_config_drives_toggler() {
    let (_dir, path) = temp_config(
        r#"
        separator = "|"

        [attributes]
        class = "data-state"
        target = "data-state-target"
        behavior = "data-state-how"

        [keywords]
        trigger = "this"
        "#,
    );
    let config = StateclassConfig::load(&path).unwrap();

    let mut doc = Document::parse(
        r#"
        <button id="t" data-state="on|pressed" data-state-target="x|this" data-state-how="add|add">go</button>
        <div class="x" id="d"></div>
        "#,
    )
    .unwrap();
    let toggler = Toggler::bind(config, &doc, doc.root());
    let t = doc.element_by_id("t").unwrap();

    toggler.activate(&mut doc, t).unwrap();

    let d = doc.element_by_id("d").unwrap();
    assert!(doc.has_class(d, "on"));
    assert!(doc.has_class(t, "pressed"));
}
