//! Strategy configuration for detection strategies.

use serde::Deserialize;
use tracing::warn;

use crate::domain::strategy::{
    ArbitrageConfig, ArbitrageStrategy, MiddleConfig, MiddleStrategy, PositiveEvConfig,
    PositiveEvStrategy, StrategyRegistry,
};
use crate::error::ConfigError;

/// Names accepted in `strategies.enabled`.
pub const STRATEGY_NAMES: [&str; 3] = ["positive_ev", "arbitrage", "middle"];

/// Configuration for all detection strategies.
#[derive(Debug, Clone, Deserialize)]
pub struct StrategiesConfig {
    /// Enabled strategy names.
    #[serde(default = "default_enabled_strategies")]
    pub enabled: Vec<String>,

    /// +EV strategy config.
    #[serde(default)]
    pub positive_ev: PositiveEvConfig,

    /// Arbitrage strategy config.
    #[serde(default)]
    pub arbitrage: ArbitrageConfig,

    /// Middle strategy config.
    #[serde(default)]
    pub middle: MiddleConfig,
}

fn default_enabled_strategies() -> Vec<String> {
    STRATEGY_NAMES.iter().map(ToString::to_string).collect()
}

impl Default for StrategiesConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled_strategies(),
            positive_ev: PositiveEvConfig::default(),
            arbitrage: ArbitrageConfig::default(),
            middle: MiddleConfig::default(),
        }
    }
}

impl StrategiesConfig {
    /// Build a strategy registry from the enabled list, in listed order.
    pub fn build_registry(&self) -> StrategyRegistry {
        let mut registry = StrategyRegistry::new();

        for name in &self.enabled {
            match normalize_strategy_name(name).as_str() {
                "positive_ev" => {
                    registry.register(Box::new(PositiveEvStrategy::new(self.positive_ev.clone())));
                }
                "arbitrage" => {
                    registry.register(Box::new(ArbitrageStrategy::new(self.arbitrage.clone())));
                }
                "middle" => {
                    registry.register(Box::new(MiddleStrategy::new(self.middle.clone())));
                }
                unknown => {
                    warn!(
                        strategy = name,
                        normalized_strategy = unknown,
                        "Unknown strategy in config, skipping"
                    );
                }
            }
        }

        registry
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if let Some(unknown) = self
            .enabled
            .iter()
            .find(|name| !STRATEGY_NAMES.contains(&normalize_strategy_name(name).as_str()))
        {
            return Err(ConfigError::InvalidValue {
                field: "strategies.enabled",
                reason: format!(
                    "unknown strategy \"{unknown}\", expected one of {}",
                    STRATEGY_NAMES.join(", ")
                ),
            });
        }

        let ev = &self.positive_ev;
        if !ev.min_ev_percent.is_finite() {
            return Err(ConfigError::InvalidValue {
                field: "strategies.positive_ev.min_ev_percent",
                reason: "must be a finite number".into(),
            });
        }
        if let Some(max) = ev.max_ev_percent {
            if !(max >= ev.min_ev_percent) {
                return Err(ConfigError::InvalidValue {
                    field: "strategies.positive_ev.max_ev_percent",
                    reason: format!("must be at least min_ev_percent ({})", ev.min_ev_percent),
                });
            }
        }
        if self.arbitrage.total_stake <= rust_decimal::Decimal::ZERO {
            return Err(ConfigError::InvalidValue {
                field: "strategies.arbitrage.total_stake",
                reason: "must be positive".into(),
            });
        }
        if self.middle.stake_per_side <= rust_decimal::Decimal::ZERO {
            return Err(ConfigError::InvalidValue {
                field: "strategies.middle.stake_per_side",
                reason: "must be positive".into(),
            });
        }
        Ok(())
    }
}

fn normalize_strategy_name(raw: &str) -> String {
    raw.trim().to_lowercase().replace('-', "_")
}
