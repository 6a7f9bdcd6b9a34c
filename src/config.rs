//! Console configuration.
//!
//! Stored in `config.yaml` under the user config directory and overridable
//! through environment variables:
//! - `OPSDESK_API_URL` — API base URL (takes precedence over the file)
//! - `OPSDESK_CONFIG_DIR` — alternate config directory (used by tests)

use std::env;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{DeskError, Result};

/// Default origin of the helpdesk API in a development setup
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api/v1";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the helpdesk API, including the `/api/v1` prefix
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    /// Department code applied to ticket listings when no `--department`
    /// flag is given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_department: Option<String>,
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> PathBuf {
        if let Ok(dir) = env::var("OPSDESK_CONFIG_DIR")
            && !dir.is_empty()
        {
            return PathBuf::from(dir).join("config.yaml");
        }

        directories::ProjectDirs::from("", "", "opsdesk")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
            .unwrap_or_else(|| PathBuf::from("config.yaml"))
    }

    /// Load configuration from file, or return default if not found
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path)?;
        let config: Config = serde_yaml_ng::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_yaml_ng::to_string(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    /// Resolve the API base URL: environment variable, then config file,
    /// then the development default. Validates the URL and strips any
    /// trailing slash so path joining stays predictable.
    pub fn api_url(&self) -> Result<String> {
        let raw = if let Ok(value) = env::var("OPSDESK_API_URL")
            && !value.is_empty()
        {
            value
        } else {
            self.api_url
                .clone()
                .unwrap_or_else(|| DEFAULT_API_URL.to_string())
        };

        let parsed = Url::parse(&raw)
            .map_err(|e| DeskError::Config(format!("invalid API URL '{}': {}", raw, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(DeskError::Config(format!(
                "invalid API URL '{}': expected http or https",
                raw
            )));
        }

        Ok(raw.trim_end_matches('/').to_string())
    }

    /// Look up a config value by key (for `config get`)
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        match key {
            "api_url" => Ok(self.api_url.clone()),
            "default_department" => Ok(self.default_department.clone()),
            _ => Err(DeskError::Config(format!("unknown config key '{}'", key))),
        }
    }

    /// Set a config value by key (for `config set`)
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "api_url" => {
                Url::parse(value).map_err(|e| {
                    DeskError::Config(format!("invalid API URL '{}': {}", value, e))
                })?;
                self.api_url = Some(value.to_string());
            }
            "default_department" => {
                self.default_department = Some(value.to_string());
            }
            _ => return Err(DeskError::Config(format!("unknown config key '{}'", key))),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        // SAFETY: tests touching the environment are marked #[serial]
        unsafe {
            env::remove_var("OPSDESK_API_URL");
            env::remove_var("OPSDESK_CONFIG_DIR");
        }
    }

    #[test]
    #[serial]
    fn test_default_api_url() {
        clear_env();
        let config = Config::default();
        assert_eq!(config.api_url().unwrap(), DEFAULT_API_URL);
    }

    #[test]
    #[serial]
    fn test_env_overrides_file() {
        clear_env();
        let config = Config {
            api_url: Some("http://desk.internal/api/v1".to_string()),
            ..Default::default()
        };
        // SAFETY: #[serial]
        unsafe { env::set_var("OPSDESK_API_URL", "http://other:9000/api/v1") };
        assert_eq!(config.api_url().unwrap(), "http://other:9000/api/v1");
        clear_env();
        assert_eq!(config.api_url().unwrap(), "http://desk.internal/api/v1");
    }

    #[test]
    #[serial]
    fn test_trailing_slash_stripped() {
        clear_env();
        let config = Config {
            api_url: Some("http://desk.internal/api/v1/".to_string()),
            ..Default::default()
        };
        assert_eq!(config.api_url().unwrap(), "http://desk.internal/api/v1");
    }

    #[test]
    #[serial]
    fn test_invalid_url_rejected() {
        clear_env();
        let config = Config {
            api_url: Some("not a url".to_string()),
            ..Default::default()
        };
        assert!(config.api_url().is_err());

        let mut config = Config::default();
        assert!(config.set("api_url", "::bad::").is_err());
        assert!(config.set("api_url", "http://desk.internal/api/v1").is_ok());
    }

    #[test]
    #[serial]
    fn test_save_and_load_roundtrip() {
        clear_env();
        let dir = tempfile::tempdir().unwrap();
        // SAFETY: #[serial]
        unsafe { env::set_var("OPSDESK_CONFIG_DIR", dir.path()) };

        let mut config = Config::default();
        config.set("api_url", "http://desk.internal/api/v1").unwrap();
        config.set("default_department", "technical_support").unwrap();
        config.save().unwrap();

        let loaded = Config::load().unwrap();
        assert_eq!(
            loaded.get("api_url").unwrap().as_deref(),
            Some("http://desk.internal/api/v1")
        );
        assert_eq!(
            loaded.get("default_department").unwrap().as_deref(),
            Some("technical_support")
        );
        clear_env();
    }

    #[test]
    fn test_unknown_key() {
        let mut config = Config::default();
        assert!(config.get("nope").is_err());
        assert!(config.set("nope", "x").is_err());
    }
}
