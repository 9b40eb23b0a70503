//! Runtime configuration
//!
//! Resolved once at startup and passed down; nothing reads the environment
//! while a search is running.
//!
//! Precedence (lowest → highest):
//! 1. Built-in defaults
//! 2. TOML file given with `--config`
//! 3. Environment (`MEASUREMENTS_API_BASE_URL`, `MEASUREMENTS_API_TIMEOUT_SECS`)
//! 4. Command-line flags
//!
//! File format:
//! ```toml
//! [api]
//! base_url = "http://localhost:8080"
//! timeout_secs = 30
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::Url;
use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const ENV_BASE_URL: &str = "MEASUREMENTS_API_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "MEASUREMENTS_API_TIMEOUT_SECS";

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid base URL '{value}': {reason}")]
    InvalidBaseUrl { value: String, reason: String },

    #[error("Invalid timeout '{0}': expected a positive number of seconds")]
    InvalidTimeout(String),
}

/// Result type for configuration
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Values supplied on the command line (all optional)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub config_file: Option<PathBuf>,
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Resolved configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    base_url: Url,
    request_timeout: Duration,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    api: ApiSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ApiSection {
    base_url: Option<String>,
    timeout_secs: Option<u64>,
}

impl Config {
    /// Build a config from explicit values
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            request_timeout: parse_timeout(timeout_secs)?,
        })
    }

    /// Measurement Store base address
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Transport-level timeout for one search request
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// Resolve from defaults, file, process environment and overrides
    pub fn resolve(overrides: &Overrides) -> Result<Self> {
        Self::resolve_with_env(overrides, |key| std::env::var(key).ok())
    }

    /// Resolve with an injected environment lookup
    pub fn resolve_with_env<F>(overrides: &Overrides, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut base_url = DEFAULT_BASE_URL.to_string();
        let mut timeout_secs = DEFAULT_TIMEOUT_SECS;

        if let Some(ref path) = overrides.config_file {
            let file = load_file(path)?;
            if let Some(url) = file.api.base_url {
                base_url = url;
            }
            if let Some(secs) = file.api.timeout_secs {
                timeout_secs = secs;
            }
        }

        if let Some(url) = env(ENV_BASE_URL).filter(|v| !v.trim().is_empty()) {
            base_url = url;
        }
        if let Some(raw) = env(ENV_TIMEOUT_SECS).filter(|v| !v.trim().is_empty()) {
            timeout_secs = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidTimeout(raw.clone()))?;
        }

        if let Some(ref url) = overrides.base_url {
            base_url = url.clone();
        }
        if let Some(secs) = overrides.timeout_secs {
            timeout_secs = secs;
        }

        let config = Self::new(&base_url, timeout_secs)?;
        tracing::debug!(
            base_url = %config.base_url,
            timeout_secs,
            "configuration resolved"
        );
        Ok(config)
    }
}

fn load_file(path: &Path) -> Result<FileConfig> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(toml::from_str(&content)?)
}

fn parse_base_url(value: &str) -> Result<Url> {
    let invalid = |reason: &str| ConfigError::InvalidBaseUrl {
        value: value.to_string(),
        reason: reason.to_string(),
    };

    let url = Url::parse(value.trim()).map_err(|e| invalid(&e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("scheme must be http or https"));
    }
    if url.cannot_be_a_base() || url.host_str().is_none() {
        return Err(invalid("missing host"));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(invalid("must not contain a query or fragment"));
    }
    Ok(url)
}

fn parse_timeout(secs: u64) -> Result<Duration> {
    if secs == 0 {
        return Err(ConfigError::InvalidTimeout(secs.to_string()));
    }
    Ok(Duration::from_secs(secs))
}
