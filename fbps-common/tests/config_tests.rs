//! Tests for configuration resolution
//!
//! Covers:
//! - Priority order: CLI → environment → TOML → compiled default
//! - Missing/malformed TOML files never abort resolution
//!
//! Note: Uses serial_test to prevent ENV variable race conditions.
//! Tests that manipulate FBPS_* variables are marked with #[serial].

use fbps_common::config::{
    load_toml_config, CliOverrides, ServiceConfig, TomlConfig, DEFAULT_DATABASE_FILE,
    DEFAULT_HOST, DEFAULT_LOG_LEVEL, DEFAULT_PORT, ENV_HOST, ENV_LOG_LEVEL, ENV_PORT,
    ENV_ROOT_FOLDER,
};
use serial_test::serial;
use std::env;
use std::path::PathBuf;

fn clear_env() {
    env::remove_var(ENV_ROOT_FOLDER);
    env::remove_var(ENV_HOST);
    env::remove_var(ENV_PORT);
    env::remove_var(ENV_LOG_LEVEL);
}

#[test]
#[serial]
fn test_compiled_defaults_without_overrides() {
    clear_env();

    let config = ServiceConfig::resolve(&CliOverrides::default(), None);

    assert!(!config.root_folder.as_os_str().is_empty());
    assert_eq!(config.host, DEFAULT_HOST);
    assert_eq!(config.port, DEFAULT_PORT);
    assert_eq!(config.log_level, DEFAULT_LOG_LEVEL);
    assert_eq!(config.database_file, DEFAULT_DATABASE_FILE);
}

#[test]
#[serial]
fn test_toml_overrides_defaults() {
    clear_env();

    let toml_config = TomlConfig {
        root_folder: Some(PathBuf::from("/tmp/fbps-toml-root")),
        database_file: Some("league.db".to_string()),
        host: Some("0.0.0.0".to_string()),
        port: Some(6001),
        log_level: Some("debug".to_string()),
    };
    let config = ServiceConfig::resolve(&CliOverrides::default(), Some(&toml_config));

    assert_eq!(config.root_folder, PathBuf::from("/tmp/fbps-toml-root"));
    assert_eq!(config.database_path(), PathBuf::from("/tmp/fbps-toml-root/league.db"));
    assert_eq!(config.bind_address(), "0.0.0.0:6001");
    assert_eq!(config.log_level, "debug");
}

#[test]
#[serial]
fn test_env_overrides_toml() {
    clear_env();
    env::set_var(ENV_ROOT_FOLDER, "/tmp/fbps-env-root");
    env::set_var(ENV_PORT, "6002");

    let toml_config = TomlConfig {
        root_folder: Some(PathBuf::from("/tmp/fbps-toml-root")),
        port: Some(6001),
        ..Default::default()
    };
    let config = ServiceConfig::resolve(&CliOverrides::default(), Some(&toml_config));

    assert_eq!(config.root_folder, PathBuf::from("/tmp/fbps-env-root"));
    assert_eq!(config.port, 6002);

    clear_env();
}

#[test]
#[serial]
fn test_cli_overrides_env() {
    clear_env();
    env::set_var(ENV_HOST, "10.0.0.1");
    env::set_var(ENV_LOG_LEVEL, "warn");

    let cli = CliOverrides {
        host: Some("192.168.1.5".to_string()),
        ..Default::default()
    };
    let config = ServiceConfig::resolve(&cli, None);

    assert_eq!(config.host, "192.168.1.5");
    assert_eq!(config.log_level, "warn");

    clear_env();
}

#[test]
#[serial]
fn test_invalid_env_port_falls_through() {
    clear_env();
    env::set_var(ENV_PORT, "not-a-port");

    let config = ServiceConfig::resolve(&CliOverrides::default(), None);
    assert_eq!(config.port, DEFAULT_PORT);

    clear_env();
}

#[test]
fn test_load_toml_config_from_file() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    std::fs::write(&path, "root_folder = \"/srv/fbps\"\nport = 7000\n").unwrap();

    let config = load_toml_config(&path).unwrap();
    assert_eq!(config.root_folder, Some(PathBuf::from("/srv/fbps")));
    assert_eq!(config.port, Some(7000));
}

#[test]
fn test_load_toml_config_malformed_is_error() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    std::fs::write(&path, "port = [this is not toml").unwrap();

    assert!(load_toml_config(&path).is_err());
}

#[test]
fn test_ensure_root_folder_idempotent() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let config = ServiceConfig {
        root_folder: temp_dir.path().join("a").join("b"),
        database_file: DEFAULT_DATABASE_FILE.to_string(),
        host: DEFAULT_HOST.to_string(),
        port: DEFAULT_PORT,
        log_level: DEFAULT_LOG_LEVEL.to_string(),
    };

    assert!(config.ensure_root_folder().is_ok());
    assert!(config.ensure_root_folder().is_ok());
    assert!(config.root_folder.is_dir());
}
