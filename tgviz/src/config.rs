//! Configuration for the TGViz client and processor
//!
//! A config is usually built in code with [`TgvizConfig::new`], but host
//! applications that keep their tgviz settings in a TOML file can load
//! it via [`TgvizConfig::load_from`]:
//!
//! ```toml
//! token = "tgv_live_xxxxxxxxxxxx"
//! timeout_secs = 2.5
//! is_async = false
//! exclude_events = ["inline_query", "chosen_inline_result"]
//! client_library = "teloxide/0.17"
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Default TGViz ingestion endpoint
pub const DEFAULT_API_URL: &str = "https://api.tgviz.com/v1/post-update";

/// TGViz middleware configuration
///
/// All fields except `token` have defaults. The exclusion set is owned
/// by each config value, so mutating one instance never leaks into
/// another.
#[derive(Debug, Clone, Deserialize)]
pub struct TgvizConfig {
    /// Bot token issued by TGViz (required secret)
    pub token: String,

    /// Ingestion endpoint URL
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// HTTP request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: f64,

    /// Report fire-and-forget instead of awaiting the API decision
    #[serde(default = "default_is_async")]
    pub is_async: bool,

    /// Event type names that are never reported
    #[serde(default = "default_exclude_events")]
    pub exclude_events: HashSet<String>,

    /// Identifier of the bot library the host links, as "name/version".
    /// Reported as "unknown" when unset.
    #[serde(default)]
    pub client_library: Option<String>,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_timeout_secs() -> f64 {
    5.0
}

fn default_is_async() -> bool {
    true
}

fn default_exclude_events() -> HashSet<String> {
    HashSet::from(["inline_query".to_string()])
}

impl TgvizConfig {
    /// Build a config with the given token and default everything else.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            api_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
            is_async: default_is_async(),
            exclude_events: default_exclude_events(),
            client_library: None,
        }
    }

    /// Load a config from a TOML file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config file {:?}: {}", path, e)))?;

        let config: TgvizConfig = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration, returning an error message if invalid
    pub fn validate(&self) -> Result<()> {
        if self.token.is_empty() {
            return Err(Error::Config("token must not be empty".to_string()));
        }
        if self.api_url.is_empty() {
            return Err(Error::Config("api_url must not be empty".to_string()));
        }
        if !self.timeout_secs.is_finite() || self.timeout_secs <= 0.0 {
            return Err(Error::Config(
                "timeout_secs must be a positive number".to_string(),
            ));
        }
        Ok(())
    }
}
