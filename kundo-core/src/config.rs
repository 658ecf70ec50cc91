//! Centralized configuration for Kundo.
//!
//! All tunable parameters and settings are defined here to avoid
//! hard-coded values scattered throughout the codebase.

use std::time::Duration;

use crate::mode::RuntimeMode;
use crate::{KundoError, Result};

/// Default OMDb endpoint used when `OMDB_API_URL` is not set.
pub const DEFAULT_OMDB_API_URL: &str = "http://www.omdbapi.com/";

/// Central configuration for all Kundo components.
///
/// Groups related configuration settings into logical sections.
/// Supports environment variable overrides for runtime customization.
#[derive(Debug, Clone, Default)]
pub struct KundoConfig {
    pub omdb: OmdbConfig,
    pub server: ServerConfig,
    pub search: SearchConfig,
}

/// OMDb provider access.
#[derive(Debug, Clone)]
pub struct OmdbConfig {
    /// API key sent as `apikey`; required in production mode
    pub api_key: Option<String>,
    /// Base URL of the provider
    pub base_url: String,
    /// Upper bound for a single provider call (None = wait for the transport)
    pub request_timeout: Option<Duration>,
}

impl Default for OmdbConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_OMDB_API_URL.to_string(),
            request_timeout: None,
        }
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl ServerConfig {
    /// Address string suitable for `TcpListener::bind`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Search page behavior.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Quiet period before a typed query is committed
    pub debounce: Duration,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(300),
        }
    }
}

impl KundoConfig {
    /// Creates configuration with environment variable overrides.
    ///
    /// Allows runtime configuration via environment variables while
    /// maintaining sensible defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary variable source.
    ///
    /// Unparseable numeric values are ignored and the default is kept.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(api_key) = lookup("OMDB_API_KEY").filter(|key| !key.trim().is_empty()) {
            config.omdb.api_key = Some(api_key);
        }

        if let Some(base_url) = lookup("OMDB_API_URL").filter(|url| !url.trim().is_empty()) {
            config.omdb.base_url = base_url;
        }

        if let Some(seconds) = lookup("KUNDO_REQUEST_TIMEOUT_SECS")
            .and_then(|value| value.parse::<u64>().ok())
        {
            config.omdb.request_timeout = Some(Duration::from_secs(seconds));
        }

        if let Some(host) = lookup("KUNDO_HOST") {
            config.server.host = host;
        }

        if let Some(port) = lookup("KUNDO_PORT").and_then(|value| value.parse::<u16>().ok()) {
            config.server.port = port;
        }

        if let Some(millis) =
            lookup("KUNDO_DEBOUNCE_MS").and_then(|value| value.parse::<u64>().ok())
        {
            config.search.debounce = Duration::from_millis(millis);
        }

        config
    }

    /// Checks that everything the given mode needs is present.
    ///
    /// # Errors
    ///
    /// - `KundoError::Configuration` - Production mode without an OMDb API key
    pub fn validate(&self, mode: RuntimeMode) -> Result<()> {
        if mode.is_production() && self.omdb.api_key.is_none() {
            return Err(KundoError::Configuration {
                reason: "OMDB_API_KEY is not defined in environment variables".to_string(),
            });
        }
        Ok(())
    }

    /// Creates a configuration suitable for tests: no debounce wait worth
    /// mentioning and an API key so production wiring validates.
    pub fn for_testing() -> Self {
        Self {
            omdb: OmdbConfig {
                api_key: Some("test-api-key".to_string()),
                ..Default::default()
            },
            search: SearchConfig {
                debounce: Duration::from_millis(10),
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_default_config_values() {
        let config = KundoConfig::default();

        assert_eq!(config.omdb.base_url, "http://www.omdbapi.com/");
        assert!(config.omdb.api_key.is_none());
        assert!(config.omdb.request_timeout.is_none());
        assert_eq!(config.server.bind_address(), "127.0.0.1:3000");
        assert_eq!(config.search.debounce, Duration::from_millis(300));
    }

    #[test]
    fn test_lookup_overrides() {
        let config = KundoConfig::from_lookup(lookup_from(&[
            ("OMDB_API_KEY", "abc123"),
            ("OMDB_API_URL", "http://localhost:9999/"),
            ("KUNDO_HOST", "0.0.0.0"),
            ("KUNDO_PORT", "8080"),
            ("KUNDO_DEBOUNCE_MS", "150"),
            ("KUNDO_REQUEST_TIMEOUT_SECS", "5"),
        ]));

        assert_eq!(config.omdb.api_key.as_deref(), Some("abc123"));
        assert_eq!(config.omdb.base_url, "http://localhost:9999/");
        assert_eq!(config.omdb.request_timeout, Some(Duration::from_secs(5)));
        assert_eq!(config.server.bind_address(), "0.0.0.0:8080");
        assert_eq!(config.search.debounce, Duration::from_millis(150));
    }

    #[test]
    fn test_invalid_numbers_keep_defaults() {
        let config = KundoConfig::from_lookup(lookup_from(&[
            ("KUNDO_PORT", "not-a-port"),
            ("KUNDO_DEBOUNCE_MS", "-1"),
            ("OMDB_API_KEY", "   "),
        ]));

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.search.debounce, Duration::from_millis(300));
        assert!(config.omdb.api_key.is_none());
    }

    #[test]
    fn test_missing_api_key_is_a_production_fault() {
        let config = KundoConfig::default();
        assert!(matches!(
            config.validate(RuntimeMode::Production),
            Err(KundoError::Configuration { .. })
        ));
        assert!(config.validate(RuntimeMode::Development).is_ok());
        assert!(
            KundoConfig::for_testing()
                .validate(RuntimeMode::Production)
                .is_ok()
        );
    }
}
