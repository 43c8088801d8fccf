//! Configuration for the completion endpoint connection

use std::time::Duration;
use whodunit_core::ServerSettings;

/// Endpoint used when nothing is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:1234/v1";
/// Model identifier used when nothing is configured.
pub const DEFAULT_MODEL: &str = "Your-Model-Name-Here";
/// Token sent when nothing is configured; local servers ignore it.
pub const DEFAULT_API_KEY: &str = "lm-studio";

/// Configuration for the completion endpoint connection
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServerConfig {
    /// Base URL including the API prefix (e.g., "http://localhost:1234/v1")
    pub base_url: String,
    /// Model identifier to use for inference
    pub model: String,
    /// Optional bearer token
    pub api_key: Option<String>,
    /// Per-request timeout
    pub timeout: Duration,
}

impl ServerConfig {
    /// Create a new configuration with no API key and a five minute timeout
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key: None,
            timeout: Duration::from_secs(300),
        }
    }

    /// Create config from environment variables
    ///
    /// Reads:
    /// - `LM_STUDIO_BASE_URL` (default: "http://localhost:1234/v1")
    /// - `LM_STUDIO_MODEL` (default: "Your-Model-Name-Here")
    /// - `LM_STUDIO_API_KEY` (default: "lm-studio")
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str, default: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Self::new(
            read("LM_STUDIO_BASE_URL", DEFAULT_BASE_URL),
            read("LM_STUDIO_MODEL", DEFAULT_MODEL),
        )
        .with_api_key(read("LM_STUDIO_API_KEY", DEFAULT_API_KEY))
    }

    /// Build from the `[server]` configuration section
    pub fn from_settings(settings: &ServerSettings) -> Self {
        let config = Self::new(&settings.base_url, &settings.model)
            .with_timeout(Duration::from_secs(settings.timeout_secs));
        match &settings.api_key {
            Some(key) if !key.is_empty() => config.with_api_key(key),
            _ => config,
        }
    }

    /// Set the API key
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Full URL of an endpoint below the base URL
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_target_local_development_endpoint() {
        let config = ServerConfig::from_lookup(|_| None);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.api_key.as_deref(), Some(DEFAULT_API_KEY));
    }

    #[test]
    fn environment_values_win() {
        let config = ServerConfig::from_lookup(|key| match key {
            "LM_STUDIO_BASE_URL" => Some("http://10.0.0.5:8000/v1/".to_string()),
            "LM_STUDIO_MODEL" => Some("qwen2.5-7b".to_string()),
            _ => None,
        });
        assert_eq!(config.base_url, "http://10.0.0.5:8000/v1");
        assert_eq!(config.model, "qwen2.5-7b");
        assert_eq!(
            config.endpoint("/chat/completions"),
            "http://10.0.0.5:8000/v1/chat/completions"
        );
    }
}
