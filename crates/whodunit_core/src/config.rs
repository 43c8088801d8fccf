//! Configuration loading.
//!
//! Sources, later ones winning:
//! 1. Bundled defaults (`whodunit.toml` shipped with the crate)
//! 2. `~/.config/whodunit/whodunit.toml`
//! 3. `./whodunit.toml`
//! 4. `LM_STUDIO_BASE_URL`, `LM_STUDIO_MODEL`, `LM_STUDIO_API_KEY`

use config::{Config, ConfigBuilder, File, FileFormat, builder::DefaultState};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};
use whodunit_error::{ConfigError, WhodunitError, WhodunitResult};

const DEFAULT_CONFIG: &str = include_str!("../../../whodunit.toml");

/// Environment variables mapped onto configuration keys.
const ENV_OVERRIDES: [(&str, &str); 3] = [
    ("LM_STUDIO_BASE_URL", "server.base_url"),
    ("LM_STUDIO_MODEL", "server.model"),
    ("LM_STUDIO_API_KEY", "server.api_key"),
];

/// Model server settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Base URL of the OpenAI-compatible API, including `/v1`
    pub base_url: String,
    /// Model identifier sent with every request
    pub model: String,
    /// Bearer token; local servers accept anything
    #[serde(default)]
    pub api_key: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Temperature for free-text chats
    pub temperature: f32,
    /// Temperature for JSON chats
    pub json_temperature: f32,
}

/// Generation pipeline settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationSettings {
    /// Target cast size
    pub num_characters: usize,
    /// Documents retrieved per request
    pub retrieval_k: usize,
}

/// Web front end settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebSettings {
    /// Socket address to listen on
    pub bind: String,
    /// Location used when the form leaves it blank
    pub default_location: String,
    /// Theme used when the form leaves it blank
    pub default_theme: String,
    /// Stored sessions kept before the oldest is dropped
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
}

fn default_max_sessions() -> usize {
    100
}

/// Data file locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSettings {
    /// Directory holding `appetizers.csv`, `main_courses.csv`, `desserts.csv`
    pub recipes_dir: PathBuf,
    /// Directory of `.txt`/`.md` background documents
    pub corpus_dir: PathBuf,
    /// Where exported documents are written
    pub output_dir: PathBuf,
}

/// Top-level whodunit configuration.
///
/// # Example
///
/// ```
/// use whodunit_core::WhodunitConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = WhodunitConfig::bundled()?;
/// assert_eq!(config.generation.num_characters, 7);
/// assert_eq!(config.web.default_location, "Hamburg");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhodunitConfig {
    /// Model server
    pub server: ServerSettings,
    /// Generation pipeline
    pub generation: GenerationSettings,
    /// Web front end
    pub web: WebSettings,
    /// Data files
    pub data: DataSettings,
}

impl WhodunitConfig {
    /// Only the bundled defaults, ignoring user files and environment.
    #[instrument]
    pub fn bundled() -> WhodunitResult<Self> {
        finish(Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml)))
    }

    /// Bundled defaults overlaid with a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> WhodunitResult<Self> {
        debug!("Loading configuration from file");
        let builder = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from(path.as_ref()));
        finish(builder)
    }

    /// Load with full precedence, reading overrides from the process environment.
    #[instrument]
    pub fn load() -> WhodunitResult<Self> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    /// Load with full precedence, reading overrides through `lookup`.
    pub fn load_with<F>(lookup: F) -> WhodunitResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        debug!("Loading configuration with precedence: env > current dir > home dir > bundled");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/whodunit/whodunit.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("whodunit").required(false));

        for (variable, key) in ENV_OVERRIDES {
            let value = lookup(variable).filter(|v| !v.trim().is_empty());
            if value.is_some() {
                debug!(variable, key, "Applying environment override");
            }
            builder = builder.set_override_option(key, value).map_err(|e| {
                WhodunitError::from(ConfigError::new(format!(
                    "Failed to apply {}: {}",
                    variable, e
                )))
            })?;
        }

        finish(builder)
    }
}

fn finish(builder: ConfigBuilder<DefaultState>) -> WhodunitResult<WhodunitConfig> {
    builder
        .build()
        .map_err(|e| {
            WhodunitError::from(ConfigError::new(format!(
                "Failed to build configuration: {}",
                e
            )))
        })?
        .try_deserialize()
        .map_err(|e| {
            WhodunitError::from(ConfigError::new(format!(
                "Failed to parse configuration: {}",
                e
            )))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn bundled_defaults_parse() {
        let config = WhodunitConfig::bundled().unwrap();
        assert_eq!(config.server.base_url, "http://localhost:1234/v1");
        assert_eq!(config.server.model, "Your-Model-Name-Here");
        assert_eq!(config.server.api_key.as_deref(), Some("lm-studio"));
        assert_eq!(config.generation.retrieval_k, 5);
        assert_eq!(config.web.max_sessions, 100);
        assert!((config.server.json_temperature - 0.6).abs() < f32::EPSILON);
    }

    #[test]
    fn file_overrides_bundled_values() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[generation]\nnum_characters = 5\nretrieval_k = 3").unwrap();

        let config = WhodunitConfig::from_file(file.path()).unwrap();
        assert_eq!(config.generation.num_characters, 5);
        assert_eq!(config.generation.retrieval_k, 3);
        assert_eq!(config.web.default_location, "Hamburg");
    }

    #[test]
    fn environment_overrides_server_settings() {
        let config = WhodunitConfig::load_with(|key| match key {
            "LM_STUDIO_BASE_URL" => Some("http://gpu-box:8080/v1".to_string()),
            "LM_STUDIO_MODEL" => Some("mistral-7b".to_string()),
            "LM_STUDIO_API_KEY" => Some("   ".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(config.server.base_url, "http://gpu-box:8080/v1");
        assert_eq!(config.server.model, "mistral-7b");
        assert!(config.server.api_key.is_some());
    }
}
