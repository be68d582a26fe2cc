// src/core/config_manager.rs
//! Configuration for the search provider and the HTTP server.
//!
//! Sources, lowest precedence first: built-in defaults, an optional YAML file,
//! environment variables. Nothing is read lazily; the resulting values are
//! passed explicitly to [`crate::core::SponsorSearchClient::new`].

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::SearchError;
use crate::utils::mask_secret;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_LOG_FILE: &str = "/tmp/sponsorseeker.log";
const DEFAULT_CONFIG_FILE: &str = "config.yaml";

#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub api_key: String,
    pub model: String,
    pub endpoint: String,
    pub timeout_seconds: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
        }
    }
}

// Keeps the key out of logs and panics.
impl fmt::Debug for SearchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchConfig")
            .field("api_key", &mask_secret(&self.api_key))
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

impl SearchConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    pub fn has_credential(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// Checks everything except the credential, which the client checks itself.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.model.trim().is_empty() {
            return Err(SearchError::Config("model must not be empty".into()));
        }
        if self.endpoint.trim().is_empty() {
            return Err(SearchError::Config("endpoint must not be empty".into()));
        }
        if self.timeout_seconds == 0 {
            return Err(SearchError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub port: u16,
    pub log_file: PathBuf,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConfigManager {
    pub search: SearchConfig,
    pub server: ServerSettings,
}

impl ConfigManager {
    /// Load configuration from the config file (if any) and the process environment.
    pub fn load() -> Result<Self> {
        let base = match Self::config_path() {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        base.with_env_overrides(|key| std::env::var(key).ok())
    }

    fn config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("SPONSOR_SEEKER_CONFIG") {
            return Some(PathBuf::from(path));
        }
        let default = PathBuf::from(DEFAULT_CONFIG_FILE);
        default.exists().then_some(default)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        info!("Loading configuration from {}", path.display());
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_yaml_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).context("Invalid configuration YAML")
    }

    /// Apply environment overrides through `lookup`, which maps a variable name to its value.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup("GEMINI_API_KEY").or_else(|| lookup("API_KEY")) {
            self.search.api_key = key;
        }
        if let Some(model) = lookup("GEMINI_MODEL") {
            self.search.model = model;
        }
        if let Some(endpoint) = lookup("GEMINI_API_URL") {
            self.search.endpoint = endpoint;
        }
        if let Some(timeout) = lookup("SEARCH_TIMEOUT_SECS") {
            self.search.timeout_seconds = timeout
                .parse()
                .context("SEARCH_TIMEOUT_SECS must be a number of seconds")?;
        }
        if let Some(port) = lookup("SPONSOR_SEEKER_PORT") {
            self.server.port = port
                .parse()
                .context("SPONSOR_SEEKER_PORT must be a valid port number")?;
        }
        if let Some(log_file) = lookup("SPONSOR_SEEKER_LOG") {
            self.server.log_file = PathBuf::from(log_file);
        }
        Ok(self)
    }
}
