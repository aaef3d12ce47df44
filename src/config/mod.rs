//! Application configuration loading and validation.
//!
//! Configuration is loaded from a TOML file. Every section is optional, so an
//! empty file yields the defaults: pretty `info` logging, no filters, equal
//! book weights and all three strategies enabled.

use serde::Deserialize;
use std::path::Path;

use crate::domain::Scanner;
use crate::error::{ConfigError, Result};

mod logging;
mod scan;
mod strategy;

pub use logging::LoggingConfig;
pub use scan::ScanConfig;
pub use strategy::{StrategiesConfig, STRATEGY_NAMES};

/// Main application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub strategies: StrategiesConfig,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse(&content)
    }

    /// Parse and validate configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        self.logging.validate()?;
        self.scan.validate()?;
        self.strategies.validate()?;
        Ok(())
    }

    /// Scanner with the configured strategies and filters.
    #[must_use]
    pub fn scanner(&self) -> Scanner {
        Scanner::new(self.strategies.build_registry(), self.scan.params())
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}
