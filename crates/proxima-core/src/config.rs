//! Proxima configuration module.
//!
//! Provides configuration file support via `proxima.toml`, environment
//! variables, and programmatic overrides.
//!
//! # Priority (highest to lowest)
//!
//! 1. Environment variables (`PROXIMA_*`)
//! 2. Configuration file (`proxima.toml`)
//! 3. Default values

use crate::index::hnsw::HnswParams;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to parse configuration file.
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Invalid configuration value.
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue {
        /// Configuration key that failed validation.
        key: String,
        /// Validation error message.
        message: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// HNSW index configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HnswConfig {
    /// Target per-layer degree (M parameter). Layer 0 uses `2 * m`.
    pub m: usize,
    /// Candidate pool width during construction.
    pub ef_construction: usize,
}

impl Default for HnswConfig {
    fn default() -> Self {
        Self {
            m: 16,
            ef_construction: 200,
        }
    }
}

/// Search configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Default `ef` candidate-pool width when the caller does not pass one.
    pub default_ef: usize,
    /// Maximum results per query.
    pub max_results: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_ef: 50,
            max_results: 1000,
        }
    }
}

/// Limits configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum vector dimension accepted at index creation.
    pub max_dimensions: usize,
    /// Maximum number of indexes per registry.
    pub max_indexes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_dimensions: 4096,
            max_indexes: 1000,
        }
    }
}

/// Logging configuration section.
///
/// The library itself only emits `tracing` events; the host process installs
/// a subscriber honoring these settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace.
    pub level: String,
    /// Log format: text or json.
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

/// Main Proxima configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ProximaConfig {
    /// HNSW index configuration.
    pub hnsw: HnswConfig,
    /// Search configuration.
    pub search: SearchConfig,
    /// Limits configuration.
    pub limits: LimitsConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

impl ProximaConfig {
    /// Loads configuration from default sources (`proxima.toml` + env).
    ///
    /// # Errors
    ///
    /// Returns an error if configuration parsing fails.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_path("proxima.toml")
    }

    /// Loads configuration from a specific file path, merged with defaults
    /// and `PROXIMA_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration parsing fails.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let figment = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed("PROXIMA_").split("_").lowercase(false));

        figment
            .extract()
            .map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Creates a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let figment = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::string(toml_str));

        figment
            .extract()
            .map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(2..=128).contains(&self.hnsw.m) {
            return Err(ConfigError::InvalidValue {
                key: "hnsw.m".to_string(),
                message: format!("value {} is out of range [2, 128]", self.hnsw.m),
            });
        }

        if !(16..=4096).contains(&self.hnsw.ef_construction) {
            return Err(ConfigError::InvalidValue {
                key: "hnsw.ef_construction".to_string(),
                message: format!(
                    "value {} is out of range [16, 4096]",
                    self.hnsw.ef_construction
                ),
            });
        }

        if self.search.default_ef == 0 {
            return Err(ConfigError::InvalidValue {
                key: "search.default_ef".to_string(),
                message: "value must be >= 1".to_string(),
            });
        }

        if self.search.max_results == 0 || self.search.max_results > 100_000 {
            return Err(ConfigError::InvalidValue {
                key: "search.max_results".to_string(),
                message: format!(
                    "value {} is out of range [1, 100000]",
                    self.search.max_results
                ),
            });
        }

        if self.limits.max_dimensions == 0 || self.limits.max_dimensions > 65536 {
            return Err(ConfigError::InvalidValue {
                key: "limits.max_dimensions".to_string(),
                message: format!(
                    "value {} is out of range [1, 65536]",
                    self.limits.max_dimensions
                ),
            });
        }

        let valid_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::InvalidValue {
                key: "logging.level".to_string(),
                message: format!(
                    "value '{}' is invalid, expected one of: {valid_levels:?}",
                    self.logging.level
                ),
            });
        }

        Ok(())
    }

    /// Returns the HNSW construction parameters described by this
    /// configuration.
    #[must_use]
    pub fn hnsw_params(&self) -> HnswParams {
        HnswParams::custom(self.hnsw.m, self.hnsw.ef_construction)
    }
}
