//! Config files on disk: init, edit, load.

use assetry_cli::AssetryConfig;
use assetry_cli::config_handlers::{cmd_config_get, cmd_config_init, cmd_config_set};
use tempfile::TempDir;

#[test]
fn test_init_then_edit_then_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");
    let path_str = path.to_str().unwrap();

    cmd_config_init(Some(path_str), false).unwrap();
    cmd_config_set(Some(path_str), "api.token", "field-team").unwrap();
    cmd_config_set(Some(path_str), "api.timeout_secs", "10").unwrap();

    let config = AssetryConfig::from_file(&path).unwrap();
    assert_eq!(config.api.token.as_deref(), Some("field-team"));
    assert_eq!(config.api.timeout_secs, 10);
    assert_eq!(cmd_config_get(Some(path_str), "api.timeout_secs").unwrap(), "10");

    let client = config.to_client_config();
    assert_eq!(client.token.as_deref(), Some("field-team"));
}

#[test]
fn test_missing_file_loads_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.toml");

    let config = AssetryConfig::load(path.to_str()).unwrap();

    assert!(config.picker.require_identifier);
}

#[test]
fn test_malformed_file_is_a_config_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[api\nbase_url = ").unwrap();

    let err = AssetryConfig::load(path.to_str()).unwrap_err();

    assert!(err.to_string().starts_with("configuration error: failed to parse"));
}

#[test]
fn test_zero_timeout_in_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[api]\ntimeout_secs = 0\n").unwrap();

    let err = AssetryConfig::load(path.to_str()).unwrap_err();

    assert!(err.to_string().contains("timeout_secs must be at least 1"));
}
