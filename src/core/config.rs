//! Configuration - Type-safe config loaded from `config.toml`
//!
//! Credentials may live in the file, but are normally taken from the
//! `ROOSTOO_API_KEY` / `ROOSTOO_SECRET_KEY` environment variables (a `.env`
//! file is honoured).

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::{Error, Result};
use crate::signer::Credentials;

pub const DEFAULT_BASE_URL: &str = "https://mock-api.roostoo.com";
pub const API_KEY_ENV: &str = "ROOSTOO_API_KEY";
pub const SECRET_KEY_ENV: &str = "ROOSTOO_SECRET_KEY";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Application settings
    #[serde(default)]
    pub app: AppConfig,

    /// Exchange endpoint and credentials
    #[serde(default)]
    pub exchange: ExchangeConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Log level, used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct ExchangeConfig {
    /// REST base URL, without trailing slash
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key (loaded from env if not provided)
    pub api_key: Option<String>,

    /// API secret (loaded from env if not provided); never serialized
    #[serde(skip_serializing)]
    pub api_secret: Option<String>,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
}

fn default_log_level() -> String {
    "info".to_string()
}
fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}
fn default_timeout() -> u64 {
    10
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            api_secret: None,
            request_timeout_secs: default_timeout(),
        }
    }
}

impl std::fmt::Debug for ExchangeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExchangeConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key)
            .field("api_secret", &self.api_secret.as_ref().map(|_| "[REDACTED]"))
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl Config {
    /// Load from TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read config: {}", e)))?;

        Self::parse(&content)
    }

    /// Parse from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }

    /// Load from `config.toml` in the working directory, falling back to defaults.
    pub fn load_or_default() -> Self {
        let path = Path::new("config.toml");
        if !path.exists() {
            tracing::debug!("No config.toml found, using defaults");
            return Self::default();
        }

        match Self::load(path) {
            Ok(cfg) => {
                tracing::info!("Loaded config from {}", path.display());
                cfg
            }
            Err(e) => {
                tracing::warn!("{}, using defaults", e);
                Self::default()
            }
        }
    }
}

impl ExchangeConfig {
    /// Resolve the credential pair: explicit values first, then the environment.
    pub fn credentials(&self) -> Result<Credentials> {
        dotenv::dotenv().ok();

        let api_key = resolve(self.api_key.as_deref(), API_KEY_ENV)?;
        let api_secret = resolve(self.api_secret.as_deref(), SECRET_KEY_ENV)?;

        Ok(Credentials::new(api_key, api_secret))
    }
}

fn resolve(explicit: Option<&str>, env_var: &str) -> Result<String> {
    match explicit {
        Some(value) if !value.is_empty() => Ok(value.to_string()),
        _ => std::env::var(env_var)
            .map_err(|_| Error::Config(format!("Missing environment variable: {}", env_var))),
    }
}
