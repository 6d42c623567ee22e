//! Application configuration loaded from `config.toml`.
//!
//! Every section is optional; missing sections and fields fall back to the
//! built-in defaults, so a bare install runs without any config file.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::cache::CacheConfig;
use crate::indicators::structs::IndicatorConfig;
use crate::viewport::ViewportConfig;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Cache section as written in TOML (durations in whole seconds).
#[derive(Debug, Clone, Deserialize)]
struct CacheToml {
    pub ttl_seconds: Option<u64>,
    pub max_entries: Option<usize>,
}

/// Logging section from config.toml
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level_filter: Option<String>,
    pub log_dir: Option<String>,
    pub file_output: bool,
}

/// Full TOML configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct TomlConfig {
    pub engine: Option<IndicatorConfig>,
    pub viewport: Option<ViewportConfig>,
    pub cache: Option<CacheToml>,
    pub logging: Option<LoggingSettings>,
}

/// Runtime configuration (converted from TOML, defaults filled in)
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub engine: IndicatorConfig,
    pub viewport: ViewportConfig,
    pub cache: CacheConfig,
    pub logging: LoggingSettings,
}

impl AppConfig {
    /// Load from a TOML file, or fall back to defaults when the file does
    /// not exist.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)?;
        let parsed: TomlConfig = toml::from_str(&raw)?;
        let config = Self::from_toml(parsed);
        config.validate().map_err(ConfigError::Invalid)?;
        Ok(config)
    }

    fn from_toml(parsed: TomlConfig) -> Self {
        let cache_defaults = CacheConfig::default();
        let cache = match parsed.cache {
            Some(section) => CacheConfig {
                ttl: section
                    .ttl_seconds
                    .map(Duration::from_secs)
                    .unwrap_or(cache_defaults.ttl),
                max_entries: section.max_entries.unwrap_or(cache_defaults.max_entries),
            },
            None => cache_defaults,
        };

        Self {
            engine: parsed.engine.unwrap_or_default(),
            viewport: parsed.viewport.unwrap_or_default(),
            cache,
            logging: parsed.logging.unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        self.engine.validate()?;
        self.viewport.validate()?;
        self.cache.validate()?;
        Ok(())
    }
}
