//! Tests for TOML bootstrap loading and graceful degradation
//!
//! - Missing TOML files SHALL NOT cause termination
//! - Malformed TOML files are reported as configuration errors
//! - Partial files only override the keys they name

use myco_common::config::{load_toml_config, Overrides, ServiceConfig};
use myco_common::Error;
use std::io::Write;
use std::path::PathBuf;

#[test]
fn test_missing_config_file_yields_defaults() {
    let path = PathBuf::from("/tmp/mycolog-definitely-missing/config.toml");
    let config = load_toml_config(&path).expect("missing file should not be an error");

    assert!(config.database_path.is_none());
    assert!(config.port.is_none());
    assert!(config.logging.level.is_none());
}

#[test]
fn test_full_config_file_is_parsed() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
database_path = "/srv/mycolog/data.db"
host = "0.0.0.0"
port = 8080
seed_file = "/srv/mycolog/seed.json"

[logging]
level = "debug"
"#
    )
    .unwrap();

    let toml = load_toml_config(file.path()).unwrap();
    let config = ServiceConfig::resolve(Overrides::default(), toml);

    assert_eq!(config.database_path, PathBuf::from("/srv/mycolog/data.db"));
    assert_eq!(config.bind_address(), "0.0.0.0:8080");
    assert_eq!(config.seed_file, Some(PathBuf::from("/srv/mycolog/seed.json")));
    assert_eq!(config.log_level, "debug");
}

#[test]
fn test_partial_config_file_keeps_other_defaults() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "port = 7001").unwrap();

    let config = ServiceConfig::resolve(Overrides::default(), load_toml_config(file.path()).unwrap());

    assert_eq!(config.port, 7001);
    assert_eq!(config.host, "127.0.0.1");
    assert_eq!(config.log_level, "info");
}

#[test]
fn test_malformed_config_file_is_an_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "port = \"not a number").unwrap();

    match load_toml_config(file.path()) {
        Err(Error::Config(msg)) => assert!(msg.contains("Failed to parse")),
        other => panic!("expected config error, got {:?}", other),
    }
}

#[test]
fn test_command_line_overrides_win() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "port = 7001\ndatabase_path = \"/from/toml.db\"").unwrap();

    let overrides = Overrides {
        database_path: Some(PathBuf::from("/from/cli.db")),
        log_level: Some("warn".to_string()),
        ..Default::default()
    };
    let config = ServiceConfig::resolve(overrides, load_toml_config(file.path()).unwrap());

    assert_eq!(config.database_path, PathBuf::from("/from/cli.db"));
    assert_eq!(config.port, 7001);
    assert_eq!(config.log_level, "warn");
}
