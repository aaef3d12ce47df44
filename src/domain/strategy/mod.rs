//! Strategy abstraction for opportunity classification.
//!
//! This module provides a pluggable strategy system supporting multiple
//! detection algorithms:
//!
//! - **PositiveEv**: best price beats the de-vigged fair probability
//! - **Arbitrage**: best cross-book prices on both sides imply less than 100%
//! - **Middle**: opposite sides at different lines leave a both-win window
//!
//! # Architecture
//!
//! Each strategy implements the [`Strategy`] trait, which defines:
//! - `name()` - Unique identifier for logging/config
//! - `applies_to()` - Whether strategy should run for a market type
//! - `detect()` - Core detection logic
//!
//! The [`StrategyRegistry`] manages enabled strategies and coordinates detection.
//! Strategies are pure: the same context always yields the same signals.
//!
//! # Example
//!
//! ```ignore
//! use vigless::domain::strategy::{StrategyRegistry, ArbitrageStrategy};
//!
//! let mut registry = StrategyRegistry::new();
//! registry.register(Box::new(ArbitrageStrategy::new(Default::default())));
//!
//! let signals = registry.detect_all(&ctx);
//! ```

mod context;
pub mod arbitrage;
pub mod middle;
pub mod positive_ev;

pub use arbitrage::{find_arbitrage, ArbitrageConfig, ArbitrageLeg, ArbitrageSignal, ArbitrageStrategy};
pub use context::DetectionContext;
pub use middle::{find_middle, MiddleConfig, MiddleLeg, MiddleSignal, MiddleStrategy};
pub use positive_ev::{PositiveEvConfig, PositiveEvSignal, PositiveEvStrategy};

use serde::Serialize;

use crate::domain::market::{MarketKey, MarketType};
use crate::domain::opportunity::Classification;

/// A detection strategy that finds opportunities in an event's markets.
pub trait Strategy: Send + Sync {
    /// Unique identifier for this strategy.
    ///
    /// Used in configuration and logging.
    fn name(&self) -> &'static str;

    /// Check if this strategy should run for a market type.
    ///
    /// Middles only exist where lines do, so they skip moneylines.
    fn applies_to(&self, market: MarketType) -> bool;

    /// Detect opportunities given the event's current markets.
    ///
    /// Returns all found signals (may be empty).
    fn detect(&self, ctx: &DetectionContext) -> Vec<Signal>;
}

/// Something a strategy found.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Signal {
    PositiveEv(PositiveEvSignal),
    Arbitrage(ArbitrageSignal),
    Middle(MiddleSignal),
}

impl Signal {
    /// Tag this signal puts on the markets it involves.
    #[must_use]
    pub const fn classification(&self) -> Classification {
        match self {
            Self::PositiveEv(_) => Classification::Ev,
            Self::Arbitrage(_) => Classification::Arbitrage,
            Self::Middle(_) => Classification::Middling,
        }
    }

    /// Markets involved.
    #[must_use]
    pub fn keys(&self) -> Vec<&MarketKey> {
        match self {
            Self::PositiveEv(signal) => vec![&signal.key],
            Self::Arbitrage(signal) => signal.legs.iter().map(|leg| &leg.key).collect(),
            Self::Middle(signal) => vec![&signal.first.key, &signal.second.key],
        }
    }
}

/// Registry of enabled strategies.
///
/// The registry manages a collection of strategies and coordinates
/// running them during detection.
#[derive(Default)]
pub struct StrategyRegistry {
    strategies: Vec<Box<dyn Strategy>>,
}

impl StrategyRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in strategy at default settings.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(PositiveEvStrategy::new(PositiveEvConfig::default())));
        registry.register(Box::new(ArbitrageStrategy::new(ArbitrageConfig::default())));
        registry.register(Box::new(MiddleStrategy::new(MiddleConfig::default())));
        registry
    }

    /// Register a strategy.
    ///
    /// Strategies are run in registration order.
    pub fn register(&mut self, strategy: Box<dyn Strategy>) {
        self.strategies.push(strategy);
    }

    /// Get all registered strategies.
    pub fn strategies(&self) -> &[Box<dyn Strategy>] {
        &self.strategies
    }

    /// Number of registered strategies.
    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    /// Check if registry is empty.
    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    /// Run all applicable strategies and collect signals.
    ///
    /// Only strategies that apply to at least one market type present in the
    /// event are run.
    pub fn detect_all(&self, ctx: &DetectionContext) -> Vec<Signal> {
        let market_types = ctx.market_types();
        self.strategies
            .iter()
            .filter(|s| market_types.iter().any(|m| s.applies_to(*m)))
            .flat_map(|s| s.detect(ctx))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockStrategy {
        name: &'static str,
        applies: bool,
    }

    impl Strategy for MockStrategy {
        fn name(&self) -> &'static str {
            self.name
        }

        fn applies_to(&self, _market: MarketType) -> bool {
            self.applies
        }

        fn detect(&self, _ctx: &DetectionContext) -> Vec<Signal> {
            vec![]
        }
    }

    #[test]
    fn test_registry_new() {
        let registry = StrategyRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn test_registry_register() {
        let mut registry = StrategyRegistry::new();
        registry.register(Box::new(MockStrategy {
            name: "test",
            applies: true,
        }));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.strategies()[0].name(), "test");
    }

    #[test]
    fn test_registry_defaults() {
        let registry = StrategyRegistry::with_defaults();
        let names: Vec<&str> = registry.strategies().iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["positive_ev", "arbitrage", "middle"]);
    }
}
