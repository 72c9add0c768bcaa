//! Tests for environment-driven client configuration

use atelier_core::config::{ClientConfig, ConfigError};

// Environment variables are process-global, so everything touching them
// lives in one test.
#[test]
fn from_env_honors_overrides_and_rejects_bad_values() {
    std::env::remove_var("ATELIER_BASE_URL");
    std::env::remove_var("ATELIER_API_KEY");
    std::env::remove_var("ATELIER_TIMEOUT_SECS");

    // With nothing set, defaults apply.
    let config = ClientConfig::from_env().unwrap();
    assert_eq!(config, ClientConfig::default());

    // Overrides are picked up.
    std::env::set_var("ATELIER_BASE_URL", "http://playground.internal:9000");
    std::env::set_var("ATELIER_API_KEY", "pg-from-env");
    std::env::set_var("ATELIER_TIMEOUT_SECS", "5");

    let config = ClientConfig::from_env().unwrap();
    assert_eq!(config.base_url, "http://playground.internal:9000");
    assert_eq!(
        config.api_key.as_ref().map(|k| k.expose_secret()),
        Some("pg-from-env")
    );
    assert_eq!(config.timeout_secs, 5);
    assert!(config.validate().is_ok());

    // An empty key is treated as unset.
    std::env::set_var("ATELIER_API_KEY", "");
    let config = ClientConfig::from_env().unwrap();
    assert!(config.api_key.is_none());

    // A malformed timeout is a configuration error.
    std::env::set_var("ATELIER_TIMEOUT_SECS", "soon");
    let result = ClientConfig::from_env();
    match result {
        Err(ConfigError::InvalidEnvVar { var, .. }) => {
            assert_eq!(var, "ATELIER_TIMEOUT_SECS");
        }
        other => panic!("Expected InvalidEnvVar, got: {:?}", other),
    }

    std::env::remove_var("ATELIER_BASE_URL");
    std::env::remove_var("ATELIER_API_KEY");
    std::env::remove_var("ATELIER_TIMEOUT_SECS");
}
