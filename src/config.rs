use crate::error::{RankerError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_CONFIG_FILE: &str = "config.json";

/// Settings read once from `config.json` and handed to the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Prefix of the organization listing, `<BASE_URL><org>/repos`.
    #[serde(rename = "BASE_URL", default = "default_base_url")]
    pub base_url: String,
    /// Prefix of per-repository resources, `<REPO_URL><org>/<repo>/pulls`.
    #[serde(rename = "REPO_URL", default = "default_repo_url")]
    pub repo_url: String,
    #[serde(rename = "API_TOKEN", default)]
    pub api_token: Option<String>,
    #[serde(rename = "CACHE", default)]
    pub cache: CacheSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheSettings {
    #[serde(rename = "DEFAULT_BACKEND_DB", default)]
    pub backend: CacheBackend,
    /// Expiry in seconds, given as a number or a numeric string.
    #[serde(
        rename = "DEFAULT_TIMEOUT",
        default = "default_timeout",
        deserialize_with = "seconds"
    )]
    pub expire_after_secs: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    #[default]
    Memory,
    None,
}

fn default_base_url() -> String {
    "https://api.github.com/orgs/".to_string()
}

fn default_repo_url() -> String {
    "https://api.github.com/repos/".to_string()
}

fn default_timeout() -> u64 {
    300
}

fn seconds<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            backend: CacheBackend::default(),
            expire_after_secs: default_timeout(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            repo_url: default_repo_url(),
            api_token: None,
            cache: CacheSettings::default(),
        }
    }
}

impl CacheSettings {
    pub fn expire_after(&self) -> Duration {
        Duration::from_secs(self.expire_after_secs)
    }
}

impl Settings {
    /// Load settings from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            warn!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&raw)?;
        debug!(path = %path.display(), "Loaded settings");
        Ok(settings)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw)
            .map_err(|e| RankerError::Config(format!("Malformed config: {}", e)))
    }

    /// Pick the token: an explicit one wins over `API_TOKEN`.
    pub fn resolve_token(&self, explicit: Option<String>) -> Result<String> {
        explicit
            .filter(|t| !t.trim().is_empty())
            .or_else(|| self.api_token.clone().filter(|t| !t.trim().is_empty()))
            .ok_or_else(|| RankerError::Config("No API key has been supplied".to_string()))
    }
}
