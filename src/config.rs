//! Configuration management for tosspay.

use crate::constants::{
    self, API_HOST, API_KEY_ENV, DEFAULT_HTTP_TIMEOUT_SECS, SANDBOX_API_KEY,
};
use crate::error::{Result, TossPayError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Which gateway environment the client talks to.
///
/// Both environments share the same host; development uses the published
/// sandbox API key so no merchant registration is needed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    #[default]
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Merchant API key sent with every request
    pub api_key: String,
    #[serde(default)]
    pub environment: Environment,
    /// Override for the gateway base URL (used against test servers)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// HTTP request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_HTTP_TIMEOUT_SECS
}

/// Builder for creating Config instances
///
/// # Examples
///
/// ```
/// use tosspay::config::{Config, Environment};
///
/// let config = Config::builder()
///     .api_key("sk_live_example")
///     .timeout(10)
///     .build()
///     .unwrap();
/// assert_eq!(config.environment, Environment::Production);
/// ```
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    api_key: Option<String>,
    environment: Environment,
    base_url: Option<String>,
    timeout_secs: Option<u64>,
}

impl ConfigBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    #[must_use]
    pub fn environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Point the client at a different base URL, e.g. a local mock gateway.
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    #[must_use]
    pub fn timeout(mut self, seconds: u64) -> Self {
        self.timeout_secs = Some(seconds);
        self
    }

    /// Build the configuration.
    ///
    /// A missing API key is only an error in production; development falls
    /// back to the sandbox key.
    pub fn build(self) -> Result<Config> {
        let api_key = match (self.api_key, self.environment) {
            (Some(key), _) => key,
            (None, Environment::Development) => SANDBOX_API_KEY.to_string(),
            (None, Environment::Production) => {
                return Err(TossPayError::config_missing(format!(
                    "No API key configured. Pass one explicitly or set {API_KEY_ENV}."
                )))
            }
        };

        let config = Config {
            api_key,
            environment: self.environment,
            base_url: self.base_url,
            timeout_secs: self.timeout_secs.unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS),
        };

        config.validate()?;
        Ok(config)
    }
}

impl Config {
    /// Create a production config with the given merchant API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            environment: Environment::Production,
            base_url: None,
            timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
        }
    }

    /// Create a development config using the shared sandbox API key.
    pub fn development() -> Self {
        Self {
            api_key: SANDBOX_API_KEY.to_string(),
            environment: Environment::Development,
            base_url: None,
            timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
        }
    }

    /// Create a new config builder
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Create a production config from the `TOSSPAY_API_KEY` environment variable.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(API_KEY_ENV).map_err(|_| {
            TossPayError::config_missing(format!("{API_KEY_ENV} is not set in the environment."))
        })?;
        let config = Self::new(api_key);
        config.validate()?;
        Ok(config)
    }

    /// Load config from the specified path or default location (~/.tosspay/config.toml)
    pub fn load_from(config_path: Option<impl AsRef<Path>>) -> Result<Self> {
        let config_path = if let Some(path) = config_path {
            PathBuf::from(path.as_ref())
        } else {
            Self::default_config_path()?
        };

        if !config_path.exists() {
            return Err(TossPayError::config_missing(format!(
                "Config file not found at {}.",
                config_path.display()
            )));
        }

        let content = std::fs::read_to_string(&config_path).map_err(|e| {
            TossPayError::config_missing(format!(
                "Failed to read config file at {}: {}",
                config_path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| {
            TossPayError::config_missing(format!(
                "Failed to parse config file at {}: {}",
                config_path.display(),
                e
            ))
        })?;

        config.validate().map_err(|e| {
            TossPayError::config_missing(format!(
                "Invalid configuration in {}: {}",
                config_path.display(),
                e
            ))
        })?;

        Ok(config)
    }

    /// Load config from the default location (~/.tosspay/config.toml)
    pub fn load() -> Result<Self> {
        Self::load_from(None::<&str>)
    }

    /// Get the default config file path (~/.tosspay/config.toml)
    pub fn default_config_path() -> Result<PathBuf> {
        constants::default_config_path().ok_or(TossPayError::NoConfigDir)
    }

    /// Save config to the default location with validation
    pub fn save(&self) -> Result<()> {
        self.validate()?;

        let config_path = Self::default_config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
            crate::permissions::set_secure_dir_permissions(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, &content)?;

        // The file holds the merchant API key
        crate::permissions::set_secure_file_permissions(&config_path)?;

        Ok(())
    }

    /// Gateway base URL: the override if set, the fixed host otherwise.
    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(API_HOST)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(TossPayError::InvalidConfig(
                "API key must not be empty.".to_string(),
            ));
        }
        Ok(())
    }
}
