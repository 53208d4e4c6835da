use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::style::SummaryStyle;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrieflyConfig {
    #[serde(default)]
    pub service: ServiceConfig,

    #[serde(default)]
    pub summary: SummaryDefaults,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Base URL of the summarization API; `/summarize` is appended.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryDefaults {
    #[serde(default)]
    pub default_style: SummaryStyle,

    /// Starting length. Ignored when the style does not offer it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_length: Option<u32>,
}

fn default_base_url() -> String {
    "http://127.0.0.1:8080/api/v1".to_string()
}
fn default_timeout() -> u64 {
    30
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for SummaryDefaults {
    fn default() -> Self {
        Self {
            default_style: SummaryStyle::default(),
            default_length: None,
        }
    }
}

impl SummaryDefaults {
    /// Starting length for the configured style.
    pub fn initial_length(&self) -> u32 {
        match self.default_length {
            Some(length) => self.default_style.reconcile_length(length),
            None => self.default_style.initial_length(),
        }
    }
}

impl BrieflyConfig {
    /// Load config from ~/.config/briefly/config.toml, creating defaults if missing.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load config from an explicit path, creating defaults if missing.
    pub fn load_from(config_path: &Path) -> crate::error::Result<Self> {
        if config_path.exists() {
            debug!(path = %config_path.display(), "Loading config");
            let contents = std::fs::read_to_string(config_path).map_err(|e| {
                crate::error::BrieflyError::Config(format!("Failed to read config: {e}"))
            })?;
            Self::parse(&contents)
        } else {
            let config = BrieflyConfig::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    /// Parse a TOML document.
    pub fn parse(contents: &str) -> crate::error::Result<Self> {
        toml::from_str(contents).map_err(|e| {
            crate::error::BrieflyError::Config(format!("Failed to parse config: {e}"))
        })
    }

    pub fn save_to(&self, config_path: &Path) -> crate::error::Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self).map_err(|e| {
            crate::error::BrieflyError::Config(format!("Failed to serialize config: {e}"))
        })?;
        std::fs::write(config_path, contents)?;
        Ok(())
    }

    /// Get the config file path.
    pub fn config_path() -> crate::error::Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            crate::error::BrieflyError::Config("Could not determine config directory".into())
        })?;
        Ok(config_dir.join("briefly").join("config.toml"))
    }

    /// The summarize endpoint.
    pub fn summarize_url(&self) -> String {
        format!("{}/summarize", self.service.base_url.trim_end_matches('/'))
    }
}
