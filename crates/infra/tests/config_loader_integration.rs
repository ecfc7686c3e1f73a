//! Integration tests for the configuration loader
//!
//! Tests the end-to-end behavior of loading configuration from files.

use std::io::Write;

use copion_domain::{LogFormat, SaveOrdering, StorageBackend};
use copion_infra::config;
use tempfile::Builder;

#[test]
fn load_config_from_json_file() {
    let json_content = r#"{
        "server": { "host": "0.0.0.0", "port": 7000 },
        "storage": { "backend": "sqlite", "path": "/var/lib/copion/perfiles.db", "pool_size": 8 },
        "persistence": { "save_ordering": "serialized", "save_retries": 2 },
        "logging": { "level": "warn", "format": "json" }
    }"#;

    let mut file = Builder::new().suffix(".json").tempfile().expect("temp file created");
    file.write_all(json_content.as_bytes()).expect("config written");

    let config = config::load_from_file(Some(file.path().to_path_buf())).unwrap();

    assert_eq!(config.server.port, 7000);
    assert_eq!(config.storage.backend, StorageBackend::Sqlite);
    assert_eq!(config.storage.pool_size, 8);
    assert_eq!(config.persistence.save_ordering, SaveOrdering::Serialized);
    assert_eq!(config.persistence.save_retries, 2);
    assert_eq!(config.logging.format, LogFormat::Json);
}

#[test]
fn load_config_from_partial_toml_file() {
    let toml_content = r#"
[storage]
path = "datos/perfiles.json"
"#;

    let mut file = Builder::new().suffix(".toml").tempfile().expect("temp file created");
    file.write_all(toml_content.as_bytes()).expect("config written");

    let config = config::load_from_file(Some(file.path().to_path_buf())).unwrap();

    assert_eq!(config.storage.path, "datos/perfiles.json");
    assert_eq!(config.storage.backend, StorageBackend::Json);
    assert_eq!(config.server.port, 5000);
    assert_eq!(config.persistence.save_retries, 1);
}

#[test]
fn invalid_toml_is_a_config_error() {
    let mut file = Builder::new().suffix(".toml").tempfile().expect("temp file created");
    file.write_all(b"[storage\npath = ").expect("config written");

    let err = config::load_from_file(Some(file.path().to_path_buf())).unwrap_err();

    assert!(matches!(err, copion_domain::CopionError::Config(_)));
}
