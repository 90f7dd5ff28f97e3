use abi_bridge::{ConfigError, HostConfig};
use std::io::Write;

#[test]
fn test_defaults_match_go_toolchain() {
    let config = HostConfig::default();
    assert_eq!(config.import_module, "go");
    assert_eq!(config.memory_export, "mem");
    assert_eq!(config.run_export, "run");
    assert_eq!(config.resume_export, "resume");
}

#[test]
fn test_partial_file_keeps_other_defaults() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"resume_export": "wake", "memory_export": "memory"}}"#).unwrap();

    let config = HostConfig::from_file(file.path()).unwrap();
    assert_eq!(config.resume_export, "wake");
    assert_eq!(config.memory_export, "memory");
    assert_eq!(config.import_module, "go");
}

#[test]
fn test_missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");
    let err = HostConfig::from_file(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
    assert!(err.to_string().contains("absent.json"));
}

#[test]
fn test_malformed_json_is_parse_error() {
    assert!(matches!(
        HostConfig::from_json_str("{\"import_module\": 3}"),
        Err(ConfigError::Parse(_))
    ));
}
