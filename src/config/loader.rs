//! Configuration Loader
//!
//! Loads client settings from config files and the environment. Later
//! sources override earlier ones.

use crate::config::settings::ClientConfig;
use crate::error::{ChatworkError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable holding the API token
pub const API_TOKEN_ENV: &str = "CHATWORK_API_TOKEN";

/// Environment variable overriding the base URL
pub const BASE_URL_ENV: &str = "CHATWORK_BASE_URL";

/// Environment variable pointing at an explicit config file
pub const CONFIG_PATH_ENV: &str = "CHATWORK_CONFIG_PATH";

/// Config file contents. Every field is optional so files can be layered.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    api_key: Option<String>,
    base_url: Option<String>,
    timeout_secs: Option<u64>,
}

/// Configuration loader with support for multiple sources
pub struct ConfigLoader {
    config: ClientConfig,
}

impl ConfigLoader {
    /// Load from default file locations, then the environment
    pub fn new() -> Result<Self> {
        // Load .env file if present
        let _ = dotenvy::dotenv();

        let mut loader = Self {
            config: ClientConfig::default(),
        };

        loader.load_from_default_paths()?;
        loader.apply_env(|name| std::env::var(name).ok());

        Ok(loader)
    }

    /// Load a specific config file, then the environment
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let _ = dotenvy::dotenv();

        let mut loader = Self {
            config: ClientConfig::default(),
        };

        loader.load_from_file(path)?;
        loader.apply_env(|name| std::env::var(name).ok());

        Ok(loader)
    }

    /// Load configuration from default paths
    fn load_from_default_paths(&mut self) -> Result<()> {
        // Lowest priority first so later files win
        for path in Self::get_config_paths().into_iter().rev() {
            if path.exists() {
                self.load_from_file(&path)?;
            }
        }

        Ok(())
    }

    /// Config paths in priority order, highest first
    fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. Environment variable
        if let Ok(custom_path) = std::env::var(CONFIG_PATH_ENV) {
            paths.push(PathBuf::from(custom_path));
        }

        // 2. Current directory
        paths.push(PathBuf::from("chatwork.json"));

        // 3. User config directory
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("chatwork").join("config.json"));
        }

        // 4. Home directory
        if let Some(home_dir) = dirs::home_dir() {
            paths.push(home_dir.join(".chatwork").join("config.json"));
        }

        paths
    }

    /// Load configuration from a specific file
    fn load_from_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ChatworkError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let file: FileConfig = serde_json::from_str(&content).map_err(|e| {
            ChatworkError::Config(format!("Failed to parse {}: {}", path.display(), e))
        })?;

        tracing::debug!(path = %path.display(), "loaded config file");
        self.merge(file);
        Ok(())
    }

    fn merge(&mut self, other: FileConfig) {
        if let Some(api_key) = other.api_key {
            self.config.api_key = api_key;
        }
        if let Some(base_url) = other.base_url {
            self.config.base_url = base_url;
        }
        if other.timeout_secs.is_some() {
            self.config.timeout_secs = other.timeout_secs;
        }
    }

    /// Apply environment overrides using `lookup` to read variables
    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(api_key) = lookup(API_TOKEN_ENV).filter(|v| !v.is_empty()) {
            self.config.api_key = api_key;
        }
        if let Some(base_url) = lookup(BASE_URL_ENV).filter(|v| !v.is_empty()) {
            self.config.base_url = base_url;
        }
    }

    /// Get the loaded configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Take ownership of the configuration, failing if no API key was found
    pub fn into_config(self) -> Result<ClientConfig> {
        if self.config.api_key.is_empty() {
            return Err(ChatworkError::Config(format!(
                "No API token configured. Set {} or add api_key to chatwork.json",
                API_TOKEN_ENV
            )));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_BASE_URL;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn empty_loader() -> ConfigLoader {
        ConfigLoader {
            config: ClientConfig::default(),
        }
    }

    #[test]
    fn test_load_from_custom_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"{{
                "api_key": "file-token",
                "timeout_secs": 15
            }}"#
        )
        .unwrap();

        let mut loader = empty_loader();
        loader.load_from_file(file.path()).unwrap();

        let config = loader.into_config().unwrap();
        assert_eq!(config.api_key, "file-token");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, Some(15));
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not json").unwrap();

        let mut loader = empty_loader();
        let err = loader.load_from_file(file.path()).unwrap_err();
        assert!(matches!(err, ChatworkError::Config(_)));
    }

    #[test]
    fn test_later_file_overrides_earlier() {
        let mut loader = empty_loader();
        loader.merge(FileConfig {
            api_key: Some("first".to_string()),
            base_url: Some("http://first".to_string()),
            timeout_secs: None,
        });
        loader.merge(FileConfig {
            api_key: Some("second".to_string()),
            ..Default::default()
        });

        assert_eq!(loader.config().api_key, "second");
        assert_eq!(loader.config().base_url, "http://first");
    }

    #[test]
    fn test_env_overrides_file() {
        let env: HashMap<&str, &str> = [
            (API_TOKEN_ENV, "env-token"),
            (BASE_URL_ENV, "http://localhost:9999"),
        ]
        .into_iter()
        .collect();

        let mut loader = empty_loader();
        loader.merge(FileConfig {
            api_key: Some("file-token".to_string()),
            ..Default::default()
        });
        loader.apply_env(|name| env.get(name).map(|v| v.to_string()));

        assert_eq!(loader.config().api_key, "env-token");
        assert_eq!(loader.config().base_url, "http://localhost:9999");
    }

    #[test]
    fn test_missing_api_key() {
        let err = empty_loader().into_config().unwrap_err();
        assert!(matches!(err, ChatworkError::Config(_)));
    }
}
