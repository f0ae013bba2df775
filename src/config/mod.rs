//! Configuration management for listwatch.
//!
//! Search groups, webhooks and polling knobs are read once at startup from
//! `config/searches.json` (or a `.toml` file) and then overlaid with the
//! `DISCORD_WEBHOOK_*` environment variables. A missing file is an empty
//! configuration.

pub mod poll;
pub mod webhooks;

pub use poll::PollConfig;
pub use webhooks::WebhookConfig;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::domain::Job;

pub const DEFAULT_CONFIG_PATH: &str = "config/searches.json";
pub const DEFAULT_GROUP: &str = "A";

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub groups: BTreeMap<String, Vec<Job>>,
    pub webhooks: WebhookConfig,
    pub poll: PollConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    /// `.toml` files are TOML, everything else is JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => ConfigFormat::Toml,
            _ => ConfigFormat::Json,
        }
    }
}

impl Config {
    /// Load the file at `path` and apply environment overrides.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load_file(path)?;
        config.webhooks.apply_env();
        Ok(config)
    }

    /// Load the file at `path` without touching the environment.
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content, ConfigFormat::from_path(path), path)
    }

    pub fn parse(content: &str, format: ConfigFormat, path: &Path) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        match format {
            ConfigFormat::Json => serde_json::from_str(content).map_err(|e| ConfigError::Json {
                path: path.to_path_buf(),
                source: e,
            }),
            ConfigFormat::Toml => toml::from_str(content).map_err(|e| ConfigError::Toml {
                path: path.to_path_buf(),
                source: e,
            }),
        }
    }

    /// Jobs for a group; group names are matched trimmed and upper-cased.
    pub fn jobs_for(&self, group: &str) -> &[Job] {
        let wanted = normalize_group(group);
        self.groups
            .iter()
            .find(|(name, _)| normalize_group(name) == wanted)
            .map(|(_, jobs)| jobs.as_slice())
            .unwrap_or(&[])
    }

    pub fn group_names(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }
}

pub fn normalize_group(group: &str) -> String {
    group.trim().to_uppercase()
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },
}
