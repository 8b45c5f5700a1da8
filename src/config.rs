//! Resolver configuration
//!
//! Configuration is a plain serde struct; every key is optional and falls back
//! to its default.
//!
//! ```yaml
//! year: 2025
//! selection: completed_only
//! missing_driver: drop
//! openf1:
//!   base_url: https://api.openf1.org/v1
//!   user_agent: paddock/0.1
//! ```

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::{Result, ResultsError};

/// Default OpenF1 endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.openf1.org/v1";

/// Which sessions the selector may report on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPolicy {
    /// Only sessions that have already ended
    #[default]
    CompletedOnly,
    /// Every session of the year, including in-progress and future ones
    AllSessions,
}

/// What to do with a driver that appears in timing data but not in the driver list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingDriverPolicy {
    /// Leave the driver out; later positions are not renumbered
    #[default]
    Drop,
    /// Keep an `"Unknown driver #N"` row
    Placeholder,
}

/// OpenF1 client settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenF1Config {
    pub base_url: String,
    pub user_agent: String,
}

impl Default for OpenF1Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: concat!("paddock/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Top-level resolver configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Season to report on; the current UTC year when unset
    pub year: Option<i32>,
    pub selection: SelectionPolicy,
    pub missing_driver: MissingDriverPolicy,
    pub openf1: OpenF1Config,
}

impl ResolverConfig {
    /// Parse and validate a YAML document.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml_ng::from_str(yaml).map_err(|e| ResultsError::Parse {
            context: "Resolver config deserialization".to_string(),
            details: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a YAML config file.
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)
            .map_err(|e| ResultsError::file_error(path.to_path_buf(), e))
            .with_context(|| format!("Reading resolver config from {}", path.display()))?;
        let config = Self::from_yaml(&yaml)
            .with_context(|| format!("Parsing resolver config {}", path.display()))?;
        debug!(path = %path.display(), ?config, "Loaded resolver config");
        Ok(config)
    }

    /// Check values that serde cannot.
    pub fn validate(&self) -> Result<()> {
        if let Some(year) = self.year {
            if !(1950..=2100).contains(&year) {
                return Err(ResultsError::config(format!("year {year} outside 1950..=2100")));
            }
        }

        let base_url = self.openf1.base_url.trim();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ResultsError::config(format!(
                "openf1.base_url must be an http(s) URL, got '{base_url}'"
            )));
        }

        if self.openf1.user_agent.trim().is_empty() {
            return Err(ResultsError::config("openf1.user_agent must not be empty"));
        }

        Ok(())
    }
}
