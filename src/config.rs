// src/config.rs

//! Defines the configuration structures for the plot feed assigner.
//!
//! The configuration is deserialized from a JSON file. Every section carries
//! `#[serde(default)]`, so a partial file (or no file at all) yields sensible
//! values. The process-wide `CONFIG` is loaded lazily on first use from the
//! path in `PLOT_FEEDS_CONFIG`, falling back to defaults.

use anyhow::{Context, Result};
use log::{info, warn};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable naming the JSON config file to load into `CONFIG`.
pub const CONFIG_PATH_ENV: &str = "PLOT_FEEDS_CONFIG";

/// Global configuration, loaded on first access.
pub static CONFIG: Lazy<Config> = Lazy::new(Config::load_from_env);

// --- Top-Level Configuration Structure ---

/// Root of the configuration file.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Plot assignment settings.
    pub plot: PlotConfig,
    /// Logging settings used by the binary.
    pub logging: LoggingConfig,
}

impl Config {
    /// Reads and parses a JSON config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_json_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let config = serde_json::from_str(text)?;
        Ok(config)
    }

    /// Loads from `PLOT_FEEDS_CONFIG` if set, otherwise returns defaults.
    /// A file that cannot be read or parsed is logged and ignored.
    pub fn load_from_env() -> Self {
        let Some(path) = std::env::var_os(CONFIG_PATH_ENV) else {
            return Config::default();
        };
        match Config::load(Path::new(&path)) {
            Ok(config) => {
                info!("Configuration loaded from {:?}.", path);
                config
            }
            Err(e) => {
                warn!("{:#}. Using default configuration.", e);
                Config::default()
            }
        }
    }
}

// --- Plot Configuration ---

/// Settings that shape how feeds are assigned to subplots.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PlotConfig {
    /// Maximum number of feeds on a single subplot. Also caps the total
    /// number of series in shared-axis mode.
    pub max_items_per_plot: usize,
    /// Joins a row's independent feed id with each dependent feed id in
    /// shared-axis mode.
    pub non_time_feed_separator: String,
    /// View property that selects ordinal-position grouping.
    pub group_by_ordinal_position_key: String,
}

impl Default for PlotConfig {
    fn default() -> Self {
        PlotConfig {
            max_items_per_plot: 10,
            non_time_feed_separator: "/".to_string(),
            group_by_ordinal_position_key: "GroupByOrdinalPosition".to_string(),
        }
    }
}

// --- Logging Configuration ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is not set.
    pub default_filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            default_filter: "info".to_string(),
        }
    }
}
