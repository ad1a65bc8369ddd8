use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
pub const DEFAULT_USER_AGENT: &str = "bike-barometer/0.1";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Settings for an [`OwmClient`](crate::OwmClient).
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// base_url = "https://api.openweathermap.org/data/2.5"
/// timeout_secs = 10
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub api_key: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Sent as `User-Agent`; an empty string omits the header.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
        }
    }

    /// Parse a config from TOML text. Reading the text is up to the caller.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let cfg: ClientConfig =
            toml::from_str(contents).context("Failed to parse OpenWeatherMap client config")?;

        if cfg.api_key.trim().is_empty() {
            return Err(anyhow!(
                "OpenWeatherMap client config has an empty `api_key`.\n\
                 Hint: get a key at https://openweathermap.org/appid and set it in the config."
            ));
        }

        Ok(cfg)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize client config to TOML")
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
