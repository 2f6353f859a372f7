use gist_preview_config::{ConfigError, LogLevel, PreviewConfig};
use tempfile::TempDir;

#[test]
fn test_save_then_load_roundtrip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.yaml");

    let mut config = PreviewConfig::default();
    config.classifier.confidence_threshold = 0.65;
    config.cdn.react_version = "18.3.1".to_string();
    config.log_level = LogLevel::Debug;
    config.save_to(&path).unwrap();

    assert!(path.exists());
    assert!(!path.with_extension("yaml.tmp").exists());

    let loaded = PreviewConfig::load_from(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_load_invalid_yaml_is_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "classifier: [unclosed").unwrap();

    let err = PreviewConfig::load_from(&path).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::Parse(_))
    ));
}

#[test]
fn test_load_rejects_semantic_errors() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "classifier:\n  confidence_threshold: -0.2\n").unwrap();

    let err = PreviewConfig::load_from(&path).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::Validation(_))
    ));
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = PreviewConfig::load_from(&dir.path().join("absent.yaml")).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::Io(_))
    ));
}

#[test]
fn test_config_path_is_under_config_dir() {
    let path = PreviewConfig::config_path();
    assert!(path.starts_with(PreviewConfig::config_dir()));
    assert_eq!(path.file_name().unwrap(), "config.yaml");
}

#[test]
fn test_config_dir_follows_platform_config_dir() {
    match dirs::config_dir() {
        Some(base) => assert_eq!(PreviewConfig::config_dir(), base.join("gist-preview")),
        None => assert_eq!(PreviewConfig::config_dir(), std::path::PathBuf::from(".")),
    }
}

