//! Tests for the process-wide configuration store.
//!
//! Invariants:
//! - Every test mutates shared state, so all of them run under `serial_test`.
//! - Each test starts with `init`, which replaces whatever a previous test left behind.

use std::path::PathBuf;

use layered_config::{LogLevel, Scalar, ambient};
use serial_test::serial;
use tempfile::TempDir;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn yaml(text: &str) -> serde_yaml::Mapping {
    serde_yaml::from_str(text).expect("valid yaml")
}

#[test]
#[serial]
fn test_init_populates_ambient_store() {
    ambient::init("development", fixtures_dir(), LogLevel::Debug);

    assert_eq!(
        ambient::get_string("database.settingsCollection").unwrap(),
        "dev_table"
    );
    assert_eq!(ambient::get_integer("server.port").unwrap(), 8888);
    assert_eq!(
        ambient::get_string("nested.more.extrem.super.extrem.fancy").unwrap(),
        "cool"
    );
    assert!(!ambient::get_boolean("auth.enabled").unwrap());
    assert!(ambient::get_boolean_or("auth.enabled.new", true).unwrap());
    assert_eq!(ambient::get_integer_or("missing.key", 7).unwrap(), 7);
    assert_eq!(ambient::get_string_or("missing.key", "x").unwrap(), "x");
}

#[test]
#[serial]
fn test_add_map_and_sub_config() {
    ambient::init("development", fixtures_dir(), LogLevel::Warn);

    ambient::add_map(
        "",
        &yaml("foobar: toll\nlorem:\n  ipsum: true\n"),
    );
    assert_eq!(ambient::get_string("foobar").unwrap(), "toll");
    assert!(ambient::get_boolean_or("lorem.ipsum", false).unwrap());

    let tenant = ambient::sub_config("tenants.tenant1");
    assert_eq!(tenant.get_string("id").unwrap(), "t1");
    assert_eq!(tenant.len(), 2);

    assert_eq!(ambient::first_level_keys().len(), 8);
    assert!(ambient::keys().contains(&"lorem.ipsum".to_string()));
}

#[test]
#[serial]
fn test_init_replaces_previous_contents() {
    ambient::init("development", fixtures_dir(), LogLevel::Error);
    ambient::add_map("", &yaml("transient: 1\n"));
    assert_eq!(ambient::get("transient"), Some(Scalar::from(1)));

    ambient::init("development", fixtures_dir(), LogLevel::Error);
    assert_eq!(ambient::get("transient"), None);
    assert_eq!(ambient::get_or("transient", false), Scalar::from(false));
}

#[test]
#[serial]
fn test_init_with_empty_directory_yields_empty_store() {
    let temp_dir = TempDir::new().unwrap();
    ambient::init("development", temp_dir.path(), LogLevel::Error);

    assert!(ambient::snapshot().is_empty());
    assert_eq!(ambient::get_integer("server.port").unwrap(), 0);
}

#[test]
#[serial]
fn test_snapshot_is_independent() {
    ambient::init("development", fixtures_dir(), LogLevel::Error);

    let mut copy = ambient::snapshot();
    copy.insert("server.port", 1);

    assert_eq!(ambient::get_integer("server.port").unwrap(), 8888);
}

#[test]
#[serial]
fn test_concurrent_readers_after_init() {
    ambient::init("development", fixtures_dir(), LogLevel::Error);

    let handles: Vec<_> = (0..4)
        .map(|_| std::thread::spawn(|| ambient::get_integer("server.port").unwrap()))
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 8888);
    }
}
