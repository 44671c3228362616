//! Configuration management for the tarot client
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:8000/api"
//!
//! [ui]
//! tick_rate_ms = 100
//! colors = true
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::api::http::DEFAULT_BASE_URL;
use crate::error::{ConfigError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Event loop tick in milliseconds (drives animation frames)
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,

    #[serde(default = "default_colors")]
    pub colors: bool,
}

fn default_tick_rate_ms() -> u64 {
    100
}

fn default_colors() -> bool {
    true
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate_ms(),
            colors: default_colors(),
        }
    }
}

impl Config {
    /// Load configuration from the default location
    ///
    /// A missing file is not an error: defaults are used instead. Environment
    /// overrides are applied afterwards.
    pub fn load() -> Result<Self> {
        let config_path = resolve_config_path()?;
        let config = if config_path.exists() {
            Self::load_from_path(&config_path)?
        } else {
            tracing::debug!(path = %config_path.display(), "No config file, using defaults");
            Self::default_config()
        };
        config.with_env_overrides().validated()
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config: Config = toml::from_str(&content).map_err(ConfigError::ParseError)?;
        config.validated()
    }

    /// Create a default configuration
    pub fn default_config() -> Self {
        Self {
            api: ApiConfig::default(),
            ui: UiConfig::default(),
        }
    }

    /// Apply `TAROT_API_URL` and `NO_COLOR`
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var("TAROT_API_URL") {
            if !url.trim().is_empty() {
                self.api.base_url = url;
            }
        }
        if std::env::var_os("NO_COLOR").is_some() {
            self.ui.colors = false;
        }
        self
    }

    /// Reject values the client cannot run with
    pub fn validated(self) -> Result<Self> {
        if self.api.base_url.trim().is_empty() {
            return Err(ConfigError::MissingField("api.base_url".to_string()).into());
        }
        if self.ui.tick_rate_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "ui.tick_rate_ms".to_string(),
                reason: "must be greater than zero".to_string(),
            }
            .into());
        }
        Ok(self)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}

/// Resolve the configuration file path following XDG Base Directory spec
pub fn resolve_config_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var("TAROT_CONFIG") {
        return Ok(PathBuf::from(shellexpand::tilde(&path).to_string()));
    }

    let config_dir = dirs::config_dir()
        .ok_or_else(|| ConfigError::MissingField("config directory".to_string()))?;

    Ok(config_dir.join("tarot").join("config.toml"))
}

/// Resolve the data directory path following XDG Base Directory spec
pub fn resolve_data_path() -> Result<PathBuf> {
    let data_dir = dirs::data_dir()
        .ok_or_else(|| ConfigError::MissingField("data directory".to_string()))?;

    Ok(data_dir.join("tarot"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TarotError;
    use serial_test::serial;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_config() {
        let config = Config::default_config();
        assert_eq!(config.api.base_url, "http://localhost:8000/api");
        assert_eq!(config.ui.tick_rate_ms, 100);
        assert!(config.ui.colors);
    }

    #[test]
    fn test_load_full_config() {
        let file = write_config(
            r#"
[api]
base_url = "https://tarot.example.com/api"

[ui]
tick_rate_ms = 50
colors = false
"#,
        );

        let config = Config::load_from_path(file.path()).unwrap();
        assert_eq!(config.api.base_url, "https://tarot.example.com/api");
        assert_eq!(config.ui.tick_rate_ms, 50);
        assert!(!config.ui.colors);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let file = write_config("[api]\nbase_url = \"http://10.0.0.2:8000/api\"\n");

        let config = Config::load_from_path(file.path()).unwrap();
        assert_eq!(config.api.base_url, "http://10.0.0.2:8000/api");
        assert_eq!(config.ui, UiConfig::default());
    }

    #[test]
    fn test_zero_tick_rate_rejected() {
        let file = write_config("[ui]\ntick_rate_ms = 0\n");

        let err = Config::load_from_path(file.path()).unwrap_err();
        assert!(matches!(
            err,
            TarotError::Config(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_empty_base_url_rejected() {
        let file = write_config("[api]\nbase_url = \"\"\n");
        assert!(Config::load_from_path(file.path()).is_err());
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let file = write_config("[api\nbase_url = ");
        let err = Config::load_from_path(file.path()).unwrap_err();
        assert!(matches!(err, TarotError::Config(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = Config::load_from_path(Path::new("/nonexistent/tarot/config.toml")).unwrap_err();
        assert!(matches!(err, TarotError::Config(ConfigError::ReadError(_))));
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        std::env::set_var("TAROT_API_URL", "http://override:9000/api");
        std::env::set_var("NO_COLOR", "1");

        let config = Config::default_config().with_env_overrides();

        std::env::remove_var("TAROT_API_URL");
        std::env::remove_var("NO_COLOR");

        assert_eq!(config.api.base_url, "http://override:9000/api");
        assert!(!config.ui.colors);
    }

    #[test]
    #[serial]
    fn test_config_path_from_env_expands_tilde() {
        std::env::set_var("TAROT_CONFIG", "~/tarot-test.toml");
        let path = resolve_config_path().unwrap();
        std::env::remove_var("TAROT_CONFIG");

        assert!(path.ends_with("tarot-test.toml"));
        assert!(!path.to_string_lossy().starts_with('~'));
    }

    #[test]
    #[serial]
    fn test_load_without_file_uses_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        std::env::set_var("TAROT_CONFIG", dir.path().join("missing.toml"));
        std::env::remove_var("TAROT_API_URL");
        std::env::remove_var("NO_COLOR");

        let config = Config::load();
        std::env::remove_var("TAROT_CONFIG");

        assert_eq!(config.unwrap(), Config::default_config());
    }
}
