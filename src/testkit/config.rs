//! Canonical test configurations.
//!
//! Single source of truth for config text and structs used across tests.

use crate::domain::strategy::{
    ArbitrageConfig, ArbitrageStrategy, MiddleConfig, MiddleStrategy, PositiveEvConfig,
    PositiveEvStrategy, StrategyRegistry,
};

/// A complete configuration file exercising every section.
pub const FULL_CONFIG: &str = r#"
[logging]
level = "warn"
format = "pretty"

[scan]
assumed_vig_percent = 4.5
sports = ["nfl", "nba"]
markets = ["moneyline", "spread", "total"]
flagged_only = false

[scan.weights]
pinnacle = 3.0
circa = 2.0

[strategies]
enabled = ["positive_ev", "arbitrage", "middle"]

[strategies.positive_ev]
min_ev_percent = 0.5
max_ev_percent = 20.0

[strategies.arbitrage]
total_stake = 1000

[strategies.middle]
stake_per_side = 110
"#;

/// Registry with a single strategy at default settings.
pub fn registry_with(name: &str) -> StrategyRegistry {
    let mut registry = StrategyRegistry::new();
    match name {
        "positive_ev" => {
            registry.register(Box::new(PositiveEvStrategy::new(PositiveEvConfig::default())));
        }
        "arbitrage" => {
            registry.register(Box::new(ArbitrageStrategy::new(ArbitrageConfig::default())));
        }
        "middle" => registry.register(Box::new(MiddleStrategy::new(MiddleConfig::default()))),
        other => panic!("unknown strategy {other}"),
    }
    registry
}
