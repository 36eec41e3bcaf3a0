//! Client Configuration Tests
//!
//! Loading from disk, defaults, validation, and building a client from a
//! loaded configuration.

use std::fs;

use garagenet::cli::connect;
use garagenet::client::AuthMode;
use garagenet::config::{ClientConfig, ConfigError};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn write_config(contents: &str) -> (TempDir, std::path::PathBuf) {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("garagenet.json");
    fs::write(&path, contents).unwrap();
    (tmp, path)
}

// =============================================================================
// Loading
// =============================================================================

#[test]
fn test_load_with_defaults() {
    let (_tmp, path) = write_config(r#"{"endpoint": "https://api.garagenet.example/graphql", "api_key": "da2-abc"}"#);
    let config = ClientConfig::load(&path).unwrap();

    assert_eq!(config.timeout_secs, 30);
    assert_eq!(config.api_key.as_deref(), Some("da2-abc"));
}

#[test]
fn test_missing_file() {
    let tmp = TempDir::new().unwrap();
    let result = ClientConfig::load(&tmp.path().join("absent.json"));
    assert!(matches!(result, Err(ConfigError::Read { .. })));
}

#[test]
fn test_invalid_json() {
    let (_tmp, path) = write_config("{ endpoint: nope");
    assert!(matches!(ClientConfig::load(&path), Err(ConfigError::Parse(_))));
}

#[test]
fn test_invalid_values() {
    let (_tmp, path) = write_config(r#"{"endpoint": "https://api.example.com", "timeout_secs": 0}"#);
    assert!(matches!(ClientConfig::load(&path), Err(ConfigError::Invalid(_))));

    let (_tmp, path) = write_config(r#"{"endpoint": "https://api.example.com", "api_key": "   "}"#);
    assert!(matches!(ClientConfig::load(&path), Err(ConfigError::Invalid(_))));
}

// =============================================================================
// Client Construction
// =============================================================================

#[tokio::test]
async fn test_connect_uses_api_key_without_token() {
    let config = ClientConfig::new("https://api.example.com/graphql").with_api_key("da2-abc");
    let client = connect(&config, None).unwrap();

    assert_eq!(client.selector().mode().await, AuthMode::ApiKey);
    assert_eq!(client.credential().await.unwrap().mode(), AuthMode::ApiKey);
}

#[tokio::test]
async fn test_connect_with_token_uses_user_pool() {
    let config = ClientConfig::new("https://api.example.com/graphql");
    let client = connect(&config, Some("jwt-token".to_string())).unwrap();

    assert_eq!(client.selector().mode().await, AuthMode::UserPool);
}
