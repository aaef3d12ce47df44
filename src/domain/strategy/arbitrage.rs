//! Cross-book arbitrage strategy.
//!
//! Detects two-way markets where the best prices at two different books
//! imply less than 100% combined. Staking each side in proportion to its
//! implied probability returns the same payout whichever side wins.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{DetectionContext, Signal, Strategy};
use crate::domain::aggregator::MarketQuotes;
use crate::domain::id::BookId;
use crate::domain::market::{MarketKey, MarketType};
use crate::domain::money::{to_f64, to_money, Money};
use crate::domain::odds::Odds;
use crate::domain::quote::Quote;

/// Configuration for arbitrage detection.
#[derive(Debug, Clone, Deserialize)]
pub struct ArbitrageConfig {
    /// Combined stake split across both legs.
    #[serde(default = "default_total_stake")]
    pub total_stake: Money,
}

fn default_total_stake() -> Money {
    Decimal::ONE_HUNDRED
}

impl Default for ArbitrageConfig {
    fn default() -> Self {
        Self {
            total_stake: default_total_stake(),
        }
    }
}

/// One side of an arbitrage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArbitrageLeg {
    pub key: MarketKey,
    pub book: BookId,
    pub odds: Odds,
    pub implied_probability: f64,
    /// Stake on this leg, rounded to cents.
    pub stake: Money,
    /// Return if this leg wins, stake included.
    pub payout: Money,
}

/// A guaranteed-profit pair of bets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArbitrageSignal {
    pub legs: Vec<ArbitrageLeg>,
    /// Sum of the legs' implied probabilities, below 1.
    pub total_implied: f64,
    pub total_stake: Money,
    /// `min(payout) − total_stake`.
    pub guaranteed_profit: Money,
    /// Profit as a percentage of the total stake.
    pub profit_percent: f64,
}

/// Arbitrage detector.
pub struct ArbitrageStrategy {
    config: ArbitrageConfig,
}

impl ArbitrageStrategy {
    /// Create a new strategy with the given configuration.
    #[must_use]
    pub const fn new(config: ArbitrageConfig) -> Self {
        Self { config }
    }

    /// Get the strategy configuration.
    #[must_use]
    pub const fn config(&self) -> &ArbitrageConfig {
        &self.config
    }
}

impl Strategy for ArbitrageStrategy {
    fn name(&self) -> &'static str {
        "arbitrage"
    }

    fn applies_to(&self, _market: MarketType) -> bool {
        true
    }

    fn detect(&self, ctx: &DetectionContext) -> Vec<Signal> {
        let mut signals = Vec::new();

        for group in ctx.groups() {
            let complements = ctx.complements(group.key());
            // Two-way markets only, each pair visited once.
            let [other] = complements.as_slice() else {
                continue;
            };
            if group.key() > other.key() {
                continue;
            }
            if let Some(signal) = find_arbitrage(group, other, self.config.total_stake) {
                signals.push(Signal::Arbitrage(signal));
            }
        }

        signals
    }
}

/// Find the cheapest cross-book pair between two complementary markets.
///
/// Returns a signal only when the pair's combined implied probability is
/// strictly below 1; exactly 1 is not an arbitrage.
///
/// # Panics
///
/// Panics if the two markets are not complements of each other.
pub fn find_arbitrage(
    side_a: &MarketQuotes,
    side_b: &MarketQuotes,
    total_stake: Money,
) -> Option<ArbitrageSignal> {
    assert!(
        side_a.key().complements().contains(side_b.key()),
        "{} and {} are not complementary markets",
        side_a.key(),
        side_b.key()
    );
    let (a, b) = cheapest_pair(side_a.quotes(), side_b.quotes())?;

    let p_a = a.odds().implied_probability();
    let p_b = b.odds().implied_probability();
    let total_implied = p_a + p_b;
    if total_implied >= 1.0 {
        return None;
    }

    let stake = to_f64(total_stake);
    let stake_a = stake * p_a / total_implied;
    let stake_b = stake * p_b / total_implied;
    let payout_a = stake_a * a.odds().decimal();
    let payout_b = stake_b * b.odds().decimal();
    let profit = payout_a.min(payout_b) - stake;

    Some(ArbitrageSignal {
        legs: vec![
            leg(side_a.key(), a, p_a, stake_a, payout_a),
            leg(side_b.key(), b, p_b, stake_b, payout_b),
        ],
        total_implied,
        total_stake,
        guaranteed_profit: to_money(profit),
        profit_percent: (1.0 / total_implied - 1.0) * 100.0,
    })
}

/// Lowest combined implied probability over pairs from different books.
fn cheapest_pair<'q>(side_a: &'q [Quote], side_b: &'q [Quote]) -> Option<(&'q Quote, &'q Quote)> {
    let mut best: Option<(&Quote, &Quote, f64)> = None;
    for a in side_a {
        for b in side_b {
            if a.book() == b.book() {
                continue;
            }
            let combined = a.odds().implied_probability() + b.odds().implied_probability();
            if best.map_or(true, |(_, _, current)| combined < current) {
                best = Some((a, b, combined));
            }
        }
    }
    best.map(|(a, b, _)| (a, b))
}

fn leg(key: &MarketKey, quote: &Quote, implied: f64, stake: f64, payout: f64) -> ArbitrageLeg {
    ArbitrageLeg {
        key: key.clone(),
        book: quote.book().clone(),
        odds: quote.odds(),
        implied_probability: implied,
        stake: to_money(stake),
        payout: to_money(payout),
    }
}
