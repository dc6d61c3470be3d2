use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Environment variable that overrides the configured content source.
pub const CONTENT_URL_ENV: &str = "STRAPI_URL";
/// Content source used when neither the environment nor a config file sets one.
pub const DEFAULT_CONTENT_URL: &str = "http://localhost:1337";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    pub content_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            content_url: DEFAULT_CONTENT_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand environment variables in the content URL
        config.content_url = Self::expand_env(&config.content_url).unwrap_or(config.content_url);

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/blockpage");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Content source URL: `STRAPI_URL` if set and non-empty, then the config
    /// file's value, then [`DEFAULT_CONTENT_URL`].
    pub fn content_url_from_env_or(config: Option<&Config>) -> String {
        match std::env::var(CONTENT_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => url,
            _ => config
                .map(|c| c.content_url.clone())
                .unwrap_or_else(|| DEFAULT_CONTENT_URL.to_string()),
        }
    }

    fn expand_env(value: &str) -> Option<String> {
        match shellexpand::env(value) {
            Ok(expanded) => Some(expanded.into_owned()),
            Err(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_config_path() {
        let config_path = Config::config_path();
        let path_str = config_path.to_string_lossy();

        // Should not contain tilde anymore
        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/blockpage/config.toml"));
    }

    #[test]
    fn test_load_full_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(
            &config_file,
            "content_url = \"https://cms.example.com\"\nrequest_timeout_secs = 3\n",
        )
        .unwrap();

        let loaded = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(
            loaded,
            Config {
                content_url: "https://cms.example.com".to_string(),
                request_timeout_secs: 3,
            }
        );
    }

    #[test]
    fn test_timeout_defaults_when_omitted() {
        let config: Config = toml::from_str(r#"content_url = "http://cms:1337""#).unwrap();

        assert_eq!(config.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_expand_env_in_url() {
        unsafe {
            env::set_var("BLOCKPAGE_TEST_HOST", "cms.internal");
        }

        let expanded = Config::expand_env("http://$BLOCKPAGE_TEST_HOST:1337");
        assert_eq!(expanded.as_deref(), Some("http://cms.internal:1337"));

        unsafe {
            env::remove_var("BLOCKPAGE_TEST_HOST");
        }
    }

    #[test]
    fn test_expand_env_with_unknown_var() {
        assert_eq!(Config::expand_env("http://$BLOCKPAGE_UNSET_VAR_XYZ"), None);
    }

    #[test]
    fn test_expand_env_plain_url() {
        assert_eq!(
            Config::expand_env("https://cms.example.com").as_deref(),
            Some("https://cms.example.com")
        );
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = Config::load_from_path(&non_existent_config).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_load_invalid_config_reports_path() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "content_url = [").unwrap();

        let err = Config::load_from_path(&config_file).unwrap_err();

        assert!(matches!(err, ConfigError::ConfigParseError { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn test_content_url_resolution_order() {
        let from_file = Config {
            content_url: "http://from-file:1337".to_string(),
            ..Config::default()
        };

        unsafe {
            env::remove_var(CONTENT_URL_ENV);
        }
        assert_eq!(
            Config::content_url_from_env_or(Some(&from_file)),
            "http://from-file:1337"
        );
        assert_eq!(Config::content_url_from_env_or(None), DEFAULT_CONTENT_URL);

        unsafe {
            env::set_var(CONTENT_URL_ENV, "http://from-env:1337");
        }
        assert_eq!(
            Config::content_url_from_env_or(Some(&from_file)),
            "http://from-env:1337"
        );

        unsafe {
            env::remove_var(CONTENT_URL_ENV);
        }
    }
}
