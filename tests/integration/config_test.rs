use jetson_exporter::core::config::{ExporterConfig, DEFAULT_SNAPSHOT_PATH};
use jetson_exporter::ExporterError;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_config_default() {
    let config = ExporterConfig::default();
    assert_eq!(config.update_period_secs, 1.0);
    assert_eq!(config.snapshot_path, PathBuf::from(DEFAULT_SNAPSHOT_PATH));
    assert_eq!(config.log_level, "info");
}

#[test]
fn test_config_roundtrip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("exporter.json");

    let mut config = ExporterConfig::default();
    config.set_update_period_secs(2.5);
    config.set_listen_address("127.0.0.1:9300").unwrap();
    config.set_snapshot_path("/tmp/jtop.json");
    config.set_log_level("debug");
    config.save(&path).unwrap();

    let loaded = ExporterConfig::load(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_config_partial_file_uses_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("exporter.json");
    std::fs::write(&path, r#"{"update_period_secs": 0.75}"#).unwrap();

    let loaded = ExporterConfig::load(&path).unwrap();
    assert_eq!(loaded.update_period_secs, 0.75);
    assert_eq!(loaded.listen_address, ExporterConfig::default().listen_address);
    assert!(loaded.validate().is_ok());
}

#[test]
fn test_config_empty_file_is_default() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("exporter.json");
    std::fs::write(&path, "\n").unwrap();

    assert_eq!(ExporterConfig::load(&path).unwrap(), ExporterConfig::default());
}

#[test]
fn test_config_invalid_json() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("exporter.json");
    std::fs::write(&path, "{ not json").unwrap();

    assert!(matches!(
        ExporterConfig::load(&path),
        Err(ExporterError::Json(_))
    ));
}

#[test]
fn test_config_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let result = ExporterConfig::load(&temp_dir.path().join("absent.json"));
    assert!(matches!(result, Err(ExporterError::Io(_))));
}

#[test]
fn test_config_fast_interval_from_file_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("exporter.json");
    std::fs::write(&path, r#"{"update_period_secs": 0.2}"#).unwrap();

    let loaded = ExporterConfig::load(&path).unwrap();
    assert!(matches!(
        loaded.validate(),
        Err(ExporterError::InvalidConfiguration(_))
    ));
}
