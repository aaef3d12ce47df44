//! Positive expected value strategy.
//!
//! Flags a market when its best price pays more than the fair probability
//! says it should.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{DetectionContext, Signal, Strategy};
use crate::domain::aggregator::{MarketQuotes, MIN_BOOKS};
use crate::domain::fair::FairPrice;
use crate::domain::id::BookId;
use crate::domain::market::{MarketKey, MarketType};
use crate::domain::odds::Odds;
use crate::domain::pricing::expected_value_percent;

/// Configuration for +EV detection.
#[derive(Debug, Clone, Deserialize)]
pub struct PositiveEvConfig {
    /// EV percent the best price must strictly exceed.
    #[serde(default)]
    pub min_ev_percent: f64,

    /// Ignore EVs above this, usually a stale line rather than an edge.
    #[serde(default)]
    pub max_ev_percent: Option<f64>,
}

impl Default for PositiveEvConfig {
    fn default() -> Self {
        Self {
            min_ev_percent: 0.0,
            max_ev_percent: None,
        }
    }
}

/// A +EV price.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositiveEvSignal {
    pub key: MarketKey,
    pub book: BookId,
    pub odds: Odds,
    pub fair: FairPrice,
    pub ev_percent: f64,
}

/// +EV detector.
pub struct PositiveEvStrategy {
    config: PositiveEvConfig,
}

impl PositiveEvStrategy {
    /// Create a new strategy with the given configuration.
    #[must_use]
    pub const fn new(config: PositiveEvConfig) -> Self {
        Self { config }
    }

    /// Get the strategy configuration.
    #[must_use]
    pub const fn config(&self) -> &PositiveEvConfig {
        &self.config
    }

    fn evaluate(&self, group: &MarketQuotes, ctx: &DetectionContext) -> Option<PositiveEvSignal> {
        if group.book_count() < MIN_BOOKS {
            return None;
        }
        let best = group.best()?;

        let fair = match ctx.pricer.fair_price(group.key()) {
            Ok(fair) => fair?,
            Err(e) => {
                warn!(market = %group.key(), error = %e, "Skipping market without fair price");
                return None;
            }
        };

        let ev_percent = expected_value_percent(best.odds(), fair.probability).ok()?;
        if !self.qualifies(ev_percent) {
            return None;
        }

        Some(PositiveEvSignal {
            key: group.key().clone(),
            book: best.book().clone(),
            odds: best.odds(),
            fair,
            ev_percent,
        })
    }

    /// EV strictly above the floor and within the cap.
    fn qualifies(&self, ev_percent: f64) -> bool {
        ev_percent > self.config.min_ev_percent
            && self
                .config
                .max_ev_percent
                .map_or(true, |max| ev_percent <= max)
    }
}

impl Strategy for PositiveEvStrategy {
    fn name(&self) -> &'static str {
        "positive_ev"
    }

    fn applies_to(&self, _market: MarketType) -> bool {
        true
    }

    fn detect(&self, ctx: &DetectionContext) -> Vec<Signal> {
        ctx.groups()
            .iter()
            .filter_map(|group| self.evaluate(group, ctx))
            .map(Signal::PositiveEv)
            .collect()
    }
}
