//! Configuration management with layered hierarchy
//!
//! Values are merged in priority order, later layers winning:
//!
//! 1. Built-in defaults
//! 2. Global user config (`<config-dir>/resctl/config.yaml`, or `RESCTL_CONFIG`)
//! 3. Environment variables (`RESCTL_API_URL`, `RESCTL_TOKEN`, `RESCTL_OUTPUT`)
//! 4. Command-line options (applied by the caller through [`Config::merge`])

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_API_URL: &str = "http://localhost:8080";
pub const DEFAULT_OUTPUT: &str = "table";

/// Environment variable that points at an alternative config file
pub const CONFIG_ENV: &str = "RESCTL_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yml::Error,
    },
}

/// resctl configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the API server
    pub api_url: Option<String>,

    /// Bearer token sent with every request
    pub token: Option<String>,

    /// Default output format
    pub output: Option<String>,
}

impl Config {
    /// Built-in defaults
    pub fn defaults() -> Self {
        Self {
            api_url: Some(DEFAULT_API_URL.to_string()),
            token: None,
            output: Some(DEFAULT_OUTPUT.to_string()),
        }
    }

    /// Load configuration from defaults, the config file and the process environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    /// Load configuration reading environment variables through `env`
    pub fn load_with<E>(env: E) -> Result<Self, ConfigError>
    where
        E: Fn(&str) -> Option<String>,
    {
        let mut config = Config::defaults();

        if let Some(path) = Self::path_with(&env) {
            if path.exists() {
                tracing::debug!(path = %path.display(), "loading config file");
                config.merge(Self::read(&path)?);
            }
        }

        config.merge(Self::from_env(&env));
        Ok(config)
    }

    /// Path of the config file in use
    pub fn path() -> Option<PathBuf> {
        Self::path_with(|key| std::env::var(key).ok())
    }

    fn path_with<E>(env: E) -> Option<PathBuf>
    where
        E: Fn(&str) -> Option<String>,
    {
        if let Some(path) = env(CONFIG_ENV).filter(|p| !p.is_empty()) {
            return Some(PathBuf::from(path));
        }
        directories::ProjectDirs::from("", "", "resctl")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Read a single config file
    ///
    /// An empty file is an empty config.
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        if contents.trim().is_empty() {
            return Ok(Config::default());
        }
        serde_yml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn from_env<E>(env: E) -> Self
    where
        E: Fn(&str) -> Option<String>,
    {
        Self {
            api_url: env("RESCTL_API_URL"),
            token: env("RESCTL_TOKEN"),
            output: env("RESCTL_OUTPUT"),
        }
    }

    /// Merge another config into this one (other takes precedence)
    pub fn merge(&mut self, other: Config) {
        if other.api_url.is_some() {
            self.api_url = other.api_url;
        }
        if other.token.is_some() {
            self.token = other.token;
        }
        if other.output.is_some() {
            self.output = other.output;
        }
    }

    /// Look up a value by its config key
    pub fn get(&self, key: &str) -> Option<&str> {
        match key {
            "api_url" => self.api_url.as_deref(),
            "token" => self.token.as_deref(),
            "output" => self.output.as_deref(),
            _ => None,
        }
    }

    pub fn api_url(&self) -> &str {
        self.api_url.as_deref().unwrap_or(DEFAULT_API_URL)
    }

    pub fn output(&self) -> &str {
        self.output.as_deref().unwrap_or(DEFAULT_OUTPUT)
    }
}
