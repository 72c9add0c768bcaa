//! Client configuration
//!
//! Configuration for the playground client: service base URL, optional API
//! key and timeouts. Values come from explicit construction or from the
//! environment, with sensible defaults for local development.

mod error;
mod secrets;

pub use error::{ConfigError, ConfigResult};
pub use secrets::SecretString;

use std::env;
use url::Url;

/// Default service address for local development
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

const ENV_BASE_URL: &str = "ATELIER_BASE_URL";
const ENV_API_KEY: &str = "ATELIER_API_KEY";
const ENV_TIMEOUT_SECS: &str = "ATELIER_TIMEOUT_SECS";

/// Configuration for a [`crate::client::PlaygroundClient`]
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Root URL of the playground service
    pub base_url: String,

    /// Optional bearer token sent with every request
    pub api_key: Option<SecretString>,

    /// Timeout for non-streaming requests, in seconds
    ///
    /// Streaming requests are not bounded by this value; a stream lives
    /// until it terminates or the consumer abandons it.
    pub timeout_secs: u64,

    /// Connection establishment timeout, in seconds
    pub connect_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    /// Create a configuration pointing at the given service root
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the API key
    pub fn with_api_key(mut self, api_key: impl Into<SecretString>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the non-streaming request timeout
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Set the connection timeout
    pub fn with_connect_timeout_secs(mut self, connect_timeout_secs: u64) -> Self {
        self.connect_timeout_secs = connect_timeout_secs;
        self
    }

    /// Build a configuration from the environment
    ///
    /// Reads `ATELIER_BASE_URL`, `ATELIER_API_KEY` and
    /// `ATELIER_TIMEOUT_SECS`; absent variables fall back to defaults.
    pub fn from_env() -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Ok(base_url) = env::var(ENV_BASE_URL) {
            config.base_url = base_url;
        }

        if let Ok(api_key) = env::var(ENV_API_KEY) {
            if !api_key.is_empty() {
                config.api_key = Some(SecretString::new(api_key));
            }
        }

        if let Ok(timeout) = env::var(ENV_TIMEOUT_SECS) {
            config.timeout_secs =
                timeout
                    .parse()
                    .map_err(|_| ConfigError::InvalidEnvVar {
                        var: ENV_TIMEOUT_SECS.to_string(),
                        message: format!("expected a number of seconds, got '{}'", timeout),
                    })?;
        }

        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> ConfigResult<()> {
        let url = Url::parse(&self.base_url).map_err(|e| ConfigError::InvalidBaseUrl {
            url: self.base_url.clone(),
            message: e.to_string(),
        })?;

        match url.scheme() {
            "http" | "https" => {}
            other => {
                return Err(ConfigError::InvalidBaseUrl {
                    url: self.base_url.clone(),
                    message: format!("unsupported scheme '{}'", other),
                })
            }
        }

        if self.timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                message: "timeout_secs must be greater than zero".to_string(),
            });
        }
        if self.connect_timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                message: "connect_timeout_secs must be greater than zero".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = ClientConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn rejects_unparseable_base_url() {
        let config = ClientConfig::new("not a url");
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn rejects_non_http_scheme() {
        let config = ClientConfig::new("ftp://example.com");
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn rejects_zero_timeout() {
        let config = ClientConfig::default().with_timeout_secs(0);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn builder_sets_api_key() {
        let config = ClientConfig::new("http://localhost:9000").with_api_key("pg-test");
        assert_eq!(
            config.api_key.as_ref().map(|k| k.expose_secret()),
            Some("pg-test")
        );
    }
}
