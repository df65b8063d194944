use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    env, fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Environment variable that overrides `weather_api.api_key` from the file.
pub const API_KEY_ENV: &str = "GUARDIAN_WEATHER_API_KEY";

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("The configuration value 'weather_api.api_key' must be provided")]
    MissingApiKey,

    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Could not determine platform config directory")]
    NoConfigDir,
}

/// Listener settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".to_string(), port: 8080 }
    }
}

/// Credentials and endpoint for the upstream weather provider.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WeatherApiConfig {
    pub api_key: Option<String>,

    /// Root of the provider API, without the `/weather` path.
    pub base_url: String,
}

impl Default for WeatherApiConfig {
    fn default() -> Self {
        Self { api_key: None, base_url: DEFAULT_BASE_URL.to_string() }
    }
}

impl WeatherApiConfig {
    /// The API key, if one is set and is not blank.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|key| !key.trim().is_empty())
    }
}

/// Top-level configuration.
///
/// Example TOML:
/// ```toml
/// [server]
/// port = 8080
///
/// [weather_api]
/// api_key = "..."
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub weather_api: WeatherApiConfig,
}

impl Config {
    /// Load config from `path` (or the platform default location), then apply
    /// environment overrides. A missing file yields defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::config_file_path()?,
        };

        let mut cfg = Self::load_file(&path)?;
        cfg.apply_env_overrides(env::var(API_KEY_ENV).ok());
        Ok(cfg)
    }

    /// Read a single TOML file without consulting the environment.
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;

        Self::from_toml(&contents).map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
    }

    pub fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf, ConfigError> {
        let dirs = ProjectDirs::from("dev", "api-guardian", "guardian").ok_or(ConfigError::NoConfigDir)?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    fn apply_env_overrides(&mut self, api_key: Option<String>) {
        if let Some(key) = api_key {
            self.weather_api.api_key = Some(key);
        }
    }

    /// Startup gate: the process must not serve traffic without a usable key.
    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        self.weather_api.api_key().ok_or(ConfigError::MissingApiKey)
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.weather_api.api_key = Some(api_key.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_have_no_key() {
        let cfg = Config::default();

        assert!(cfg.weather_api.api_key().is_none());
        assert_eq!(cfg.weather_api.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.server.port, 8080);
    }

    #[test]
    fn require_api_key_rejects_missing_empty_and_whitespace() {
        for key in [None, Some(""), Some("   "), Some("\t\n")] {
            let mut cfg = Config::default();
            cfg.weather_api.api_key = key.map(str::to_string);

            let err = cfg.require_api_key().unwrap_err();
            assert!(matches!(err, ConfigError::MissingApiKey));
        }
    }

    #[test]
    fn require_api_key_returns_key_verbatim() {
        let cfg = Config::default().with_api_key(" KEY ");
        assert_eq!(cfg.require_api_key().unwrap(), " KEY ");
    }

    #[test]
    fn parses_partial_toml() {
        let cfg = Config::from_toml(
            r#"
            [weather_api]
            api_key = "OPEN_KEY"
            "#,
        )
        .expect("valid toml");

        assert_eq!(cfg.weather_api.api_key(), Some("OPEN_KEY"));
        assert_eq!(cfg.weather_api.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.server.host, "127.0.0.1");
    }

    #[test]
    fn env_override_replaces_file_key() {
        let mut cfg = Config::default().with_api_key("FROM_FILE");
        cfg.apply_env_overrides(Some("FROM_ENV".to_string()));
        assert_eq!(cfg.weather_api.api_key(), Some("FROM_ENV"));

        cfg.apply_env_overrides(None);
        assert_eq!(cfg.weather_api.api_key(), Some("FROM_ENV"));
    }

    #[test]
    fn load_file_missing_returns_default() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_file(&dir.path().join("absent.toml")).unwrap();
        assert!(cfg.weather_api.api_key().is_none());
    }

    #[test]
    fn load_file_reports_parse_errors_with_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nport = \"not a number\"").unwrap();

        let err = Config::load_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
