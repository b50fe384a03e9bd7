//! Query proxy configuration

use serde::{Deserialize, Serialize};

use crate::error::InsightsError;

/// Port used when neither a flag nor `PORT` selects one
pub const DEFAULT_PORT: u16 = 9001;

/// Base URL of the Insights query API
pub const DEFAULT_UPSTREAM_URL: &str = "https://insights-api.newrelic.com";

/// Directory served for everything outside `/proxy`
pub const DEFAULT_STATIC_DIR: &str = "./";

/// Query proxy configuration
///
/// Values are resolved as: explicit override, then environment
/// (`PORT`, `INSIGHTS_UPSTREAM_URL`, `INSIGHTS_STATIC_DIR`), then defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyConfig {
    /// Port to listen on (default: 9001)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    /// Upstream API base URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upstream_url: Option<String>,

    /// Directory for static file serving
    #[serde(skip_serializing_if = "Option::is_none")]
    pub static_dir: Option<String>,
}

impl ProxyConfig {
    /// Load configuration from the process environment (and `.env`, if present)
    pub fn from_env() -> Result<Self, InsightsError> {
        // Load .env file if present (ignores errors)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, InsightsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match non_empty("PORT") {
            Some(raw) => Some(raw.trim().parse::<u16>().map_err(|e| {
                InsightsError::Config(format!("Invalid PORT '{}': {}", raw, e))
            })?),
            None => None,
        };

        Ok(Self {
            port,
            upstream_url: non_empty("INSIGHTS_UPSTREAM_URL"),
            static_dir: non_empty("INSIGHTS_STATIC_DIR"),
        })
    }

    /// Apply command-line overrides on top of this configuration
    pub fn with_overrides(
        mut self,
        port: Option<u16>,
        upstream_url: Option<String>,
        static_dir: Option<String>,
    ) -> Self {
        if port.is_some() {
            self.port = port;
        }
        if upstream_url.is_some() {
            self.upstream_url = upstream_url;
        }
        if static_dir.is_some() {
            self.static_dir = static_dir;
        }
        self
    }

    /// Get the listen port, defaulting to 9001
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Get the upstream base URL without a trailing slash
    pub fn upstream_url(&self) -> &str {
        self.upstream_url
            .as_deref()
            .unwrap_or(DEFAULT_UPSTREAM_URL)
            .trim_end_matches('/')
    }

    /// Get the static file directory
    pub fn static_dir(&self) -> &str {
        self.static_dir.as_deref().unwrap_or(DEFAULT_STATIC_DIR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_config_defaults() {
        let config = ProxyConfig::default();
        assert_eq!(config.port(), 9001);
        assert_eq!(config.upstream_url(), "https://insights-api.newrelic.com");
        assert_eq!(config.static_dir(), "./");
    }

    #[test]
    fn test_config_from_lookup() {
        let config = ProxyConfig::from_lookup(lookup(&[
            ("PORT", "3000"),
            ("INSIGHTS_UPSTREAM_URL", "http://127.0.0.1:8080/"),
        ]))
        .unwrap();
        assert_eq!(config.port(), 3000);
        assert_eq!(config.upstream_url(), "http://127.0.0.1:8080");
        assert_eq!(config.static_dir(), "./");
    }

    #[test]
    fn test_config_empty_port_falls_back() {
        let config = ProxyConfig::from_lookup(lookup(&[("PORT", "")])).unwrap();
        assert_eq!(config.port(), 9001);
    }

    #[test]
    fn test_config_invalid_port() {
        let result = ProxyConfig::from_lookup(lookup(&[("PORT", "ninety")]));
        assert!(matches!(result, Err(InsightsError::Config(_))));
    }

    #[test]
    fn test_config_overrides() {
        let config = ProxyConfig::from_lookup(lookup(&[("PORT", "3000")]))
            .unwrap()
            .with_overrides(Some(4000), None, Some("public".to_string()));
        assert_eq!(config.port(), 4000);
        assert_eq!(config.static_dir(), "public");
        assert_eq!(config.upstream_url(), DEFAULT_UPSTREAM_URL);
    }
}
