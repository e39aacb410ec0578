//! Configuration management for the LTV Boost crates.
//!
//! All tools share a single configuration file at `~/.ltvboost/config.json`.
//!
//! # Configuration Priority
//!
//! 1. Environment variables (LTVBOOST_* prefix)
//! 2. Explicit config file values
//! 3. Default values
//!
//! # Environment Variable Mapping
//!
//! - `LTVBOOST_LOG_LEVEL` → observability.log_level
//! - `LTVBOOST_LOG_FORMAT` → observability.log_format
//! - `LTVBOOST_CREATIVE_AOV` → metrics.creative_assumed_aov
//! - `LTVBOOST_TOP_CREATIVES` → metrics.top_creatives

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Get the configuration directory path.
pub fn config_dir() -> PathBuf {
    directories::UserDirs::new().map_or_else(
        || PathBuf::from(".ltvboost"),
        |dirs| dirs.home_dir().join(".ltvboost"),
    )
}

/// Get the configuration file path.
pub fn config_path() -> PathBuf {
    config_dir().join("config.json")
}

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// JSON Schema reference
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Logging configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,

    /// Calculator constants
    #[serde(default)]
    pub metrics: MetricsConfig,

    /// Ads calculator settings
    #[serde(default)]
    pub ads: AdsConfig,
}

impl Config {
    /// Load configuration from the default path.
    pub fn load() -> Result<Self> {
        let path = config_path();
        if !path.exists() {
            tracing::info!("Config file not found, using defaults");
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))
    }

    /// Load configuration with environment variable overrides.
    pub fn load_with_env() -> Result<Self> {
        let mut config = Self::load()?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides to the configuration.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary key lookup.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(level) = lookup("LTVBOOST_LOG_LEVEL") {
            self.observability.log_level = level;
        }
        if let Some(format) = lookup("LTVBOOST_LOG_FORMAT") {
            self.observability.log_format = format;
        }
        if let Some(aov) = lookup("LTVBOOST_CREATIVE_AOV") {
            match aov.parse() {
                Ok(v) => self.metrics.creative_assumed_aov = v,
                Err(_) => tracing::warn!(value = %aov, "Ignoring unparsable LTVBOOST_CREATIVE_AOV"),
            }
        }
        if let Some(top) = lookup("LTVBOOST_TOP_CREATIVES") {
            match top.parse() {
                Ok(v) => self.metrics.top_creatives = v,
                Err(_) => tracing::warn!(value = %top, "Ignoring unparsable LTVBOOST_TOP_CREATIVES"),
            }
        }
    }

    /// Save configuration to a specific path, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level", alias = "level")]
    pub log_level: String,

    /// Log format (json, pretty)
    #[serde(default = "default_log_format", alias = "format")]
    pub log_format: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

/// Constants used by the calculators.
///
/// Defaults reproduce the figures merchants already see on the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Revenue attributed to each purchase when evaluating ad creatives.
    #[serde(default = "default_creative_assumed_aov")]
    pub creative_assumed_aov: f64,

    /// Share of monthly revenue treated as the ad spend scaling ceiling.
    #[serde(default = "default_max_ad_spend_share")]
    pub max_ad_spend_share: f64,

    /// Number of creatives shown in the "top performers" view.
    #[serde(default = "default_top_creatives")]
    pub top_creatives: usize,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            creative_assumed_aov: default_creative_assumed_aov(),
            max_ad_spend_share: default_max_ad_spend_share(),
            top_creatives: default_top_creatives(),
        }
    }
}

/// Ads calculator settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdsConfig {
    /// Budget multipliers shown as scaling scenarios.
    #[serde(default = "default_scaling_factors")]
    pub scaling_factors: Vec<f64>,
}

impl Default for AdsConfig {
    fn default() -> Self {
        Self {
            scaling_factors: default_scaling_factors(),
        }
    }
}

fn default_log_level() -> String {
    "info".into()
}
fn default_log_format() -> String {
    "pretty".into()
}
fn default_creative_assumed_aov() -> f64 {
    50.0
}
fn default_max_ad_spend_share() -> f64 {
    0.20
}
fn default_top_creatives() -> usize {
    3
}
fn default_scaling_factors() -> Vec<f64> {
    vec![1.1, 1.2, 1.3]
}
