//! Tests for loading assembler configuration from TOML.
use kumitate::config::{AssemblerConfig, PackagePolicy};
use kumitate::error::ConfigError;
use std::fs;

#[test]
fn test_empty_config_uses_defaults() {
    let config = AssemblerConfig::from_toml_str("").expect("Failed to parse config");
    assert_eq!(config, AssemblerConfig::default());
    assert_eq!(config.indent_width, 4);
    assert_eq!(config.function_suffix, "_request");
    assert_eq!(config.package_policy, PackagePolicy::FirstWins);
    assert_eq!(config.models.base_import, "from pydantic import BaseModel");
}

#[test]
fn test_partial_config_overrides() {
    let toml = r#"
        indent_width = 2
        package_policy = "strict"

        [models]
        base_class = "Schema"
    "#;
    let config = AssemblerConfig::from_toml_str(toml).expect("Failed to parse config");

    assert_eq!(config.indent_width, 2);
    assert_eq!(config.package_policy, PackagePolicy::Strict);
    assert_eq!(config.models.base_class, "Schema");
    assert_eq!(config.models.package, "pydantic");
    assert_eq!(config.function_suffix, "_request");
}

#[test]
fn test_config_from_file() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("kumitate.toml");
    fs::write(&path, "function_suffix = \"_endpoint\"\n").unwrap();

    let config = AssemblerConfig::from_file(&path).expect("Failed to load config");
    assert_eq!(config.function_suffix, "_endpoint");
}

#[test]
fn test_invalid_config_is_rejected() {
    assert!(matches!(
        AssemblerConfig::from_toml_str("package_policy = \"last-wins\""),
        Err(ConfigError::Parse(_))
    ));
    assert!(matches!(
        AssemblerConfig::from_file("/definitely/not/here.toml"),
        Err(ConfigError::Read { .. })
    ));
}
