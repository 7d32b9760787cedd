use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::provider::{geocoder::DEFAULT_GEOCODING_URL, weather::DEFAULT_WEATHER_URL};

/// Environment variable that overrides the stored API key.
pub const API_KEY_ENV: &str = "API_KEY";

/// Provider endpoints; both default to OpenWeather.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub geocoding_url: String,
    pub weather_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            geocoding_url: DEFAULT_GEOCODING_URL.to_string(),
            weather_url: DEFAULT_WEATHER_URL.to_string(),
        }
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// timeout_secs = 10
///
/// [endpoints]
/// geocoding_url = "http://api.openweathermap.org/geo/1.0/direct"
/// weather_url = "https://api.openweathermap.org/data/2.5/weather"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Shared by the geocoding and weather providers.
    pub api_key: Option<String>,

    /// Per-request timeout. Unset means requests may block indefinitely.
    pub timeout_secs: Option<u64>,

    pub endpoints: Endpoints,
}

impl Config {
    /// Load the config file and apply environment overrides.
    pub fn resolve() -> Result<Self> {
        let mut cfg = Self::load()?;
        cfg.apply_env(|name| std::env::var(name).ok());
        Ok(cfg)
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-agent", "weather-agent")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Overlay values from the environment. Empty variables are ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(API_KEY_ENV).filter(|k| !k.trim().is_empty()) {
            self.api_key = Some(key);
        }
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    /// Returns the API key, if one is configured and non-blank.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_uses_openweather_endpoints() {
        let cfg = Config::default();

        assert_eq!(cfg.api_key(), None);
        assert_eq!(cfg.timeout_secs, None);
        assert_eq!(cfg.endpoints.geocoding_url, DEFAULT_GEOCODING_URL);
        assert_eq!(cfg.endpoints.weather_url, DEFAULT_WEATHER_URL);
    }

    #[test]
    fn env_overrides_file_key() {
        let mut cfg = Config::default();
        cfg.set_api_key("FILE_KEY".into());

        cfg.apply_env(|name| (name == API_KEY_ENV).then(|| "ENV_KEY".to_string()));

        assert_eq!(cfg.api_key(), Some("ENV_KEY"));
    }

    #[test]
    fn blank_env_key_is_ignored() {
        let mut cfg = Config::default();
        cfg.set_api_key("FILE_KEY".into());

        cfg.apply_env(|_| Some("   ".to_string()));

        assert_eq!(cfg.api_key(), Some("FILE_KEY"));
    }

    #[test]
    fn blank_stored_key_is_ignored() {
        let mut cfg = Config::default();
        cfg.set_api_key(String::new());

        assert_eq!(cfg.api_key(), None);
    }

    #[test]
    fn partial_file_keeps_default_endpoints() {
        let cfg: Config = toml::from_str(
            r#"
            api_key = "KEY"

            [endpoints]
            weather_url = "http://localhost:9000/weather"
            "#,
        )
        .expect("valid toml");

        assert_eq!(cfg.api_key(), Some("KEY"));
        assert_eq!(cfg.endpoints.geocoding_url, DEFAULT_GEOCODING_URL);
        assert_eq!(cfg.endpoints.weather_url, "http://localhost:9000/weather");
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.set_api_key("KEY".into());
        cfg.timeout_secs = Some(15);
        cfg.save_to(&path).expect("save");

        let loaded = Config::load_from(&path).expect("load");
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn missing_file_loads_default() {
        let dir = tempfile::tempdir().expect("tempdir");
        let loaded = Config::load_from(&dir.path().join("absent.toml")).expect("load");

        assert_eq!(loaded, Config::default());
    }
}
