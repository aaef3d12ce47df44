//! Middle strategy.
//!
//! Two books hanging different lines on opposite sides of a spread or total
//! can leave a window of outcomes where both bets win. Totals pair an Over
//! at `L1` with an Under at `L2 > L1`. Spreads pair home `h` with away `a`
//! where `a + h > 0`, and the window is measured in home margin of victory.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{DetectionContext, Signal, Strategy};
use crate::domain::aggregator::MarketQuotes;
use crate::domain::id::BookId;
use crate::domain::market::{Line, MarketKey, MarketType, Side};
use crate::domain::money::{to_f64, to_money, Money};
use crate::domain::odds::Odds;
use crate::domain::quote::Quote;

/// Configuration for middle detection.
#[derive(Debug, Clone, Deserialize)]
pub struct MiddleConfig {
    /// Stake placed on each of the two legs.
    #[serde(default = "default_stake_per_side")]
    pub stake_per_side: Money,
}

fn default_stake_per_side() -> Money {
    Decimal::ONE_HUNDRED
}

impl Default for MiddleConfig {
    fn default() -> Self {
        Self {
            stake_per_side: default_stake_per_side(),
        }
    }
}

/// One bet of a middle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MiddleLeg {
    pub key: MarketKey,
    pub book: BookId,
    pub odds: Odds,
}

/// A window where both legs win.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MiddleSignal {
    pub market: MarketType,
    /// Over for totals, home for spreads.
    pub first: MiddleLeg,
    /// Under for totals, away for spreads.
    pub second: MiddleLeg,
    /// Window bounds, exclusive. Total points or home margin.
    pub lower: Line,
    pub upper: Line,
    /// Whole-number results inside the window, inclusive.
    pub window: (i64, i64),
    pub width: Line,
    pub stake_per_side: Money,
    /// Net result when the final lands inside the window.
    pub both_win_profit: Money,
    /// Net result of the worse single-leg outcome outside the window.
    pub worst_case: Money,
}

/// Middle detector. Spreads and totals only.
pub struct MiddleStrategy {
    config: MiddleConfig,
}

impl MiddleStrategy {
    /// Create a new strategy with the given configuration.
    #[must_use]
    pub const fn new(config: MiddleConfig) -> Self {
        Self { config }
    }

    /// Get the strategy configuration.
    #[must_use]
    pub const fn config(&self) -> &MiddleConfig {
        &self.config
    }

    fn detect_market(
        &self,
        ctx: &DetectionContext,
        market: MarketType,
        first_side: Side,
        second_side: Side,
    ) -> Vec<Signal> {
        let firsts: Vec<_> = ctx
            .groups_of(market)
            .filter(|group| group.key().side == first_side)
            .collect();
        let seconds: Vec<_> = ctx
            .groups_of(market)
            .filter(|group| group.key().side == second_side)
            .collect();

        let mut signals = Vec::new();
        for first in &firsts {
            for second in &seconds {
                if let Some(signal) = find_middle(first, second, self.config.stake_per_side) {
                    signals.push(Signal::Middle(signal));
                }
            }
        }
        signals
    }
}

impl Strategy for MiddleStrategy {
    fn name(&self) -> &'static str {
        "middle"
    }

    fn applies_to(&self, market: MarketType) -> bool {
        market.has_line()
    }

    fn detect(&self, ctx: &DetectionContext) -> Vec<Signal> {
        let mut signals = self.detect_market(ctx, MarketType::Total, Side::Over, Side::Under);
        signals.extend(self.detect_market(ctx, MarketType::Spread, Side::Home, Side::Away));
        signals
    }
}

/// Find a middle between two markets.
///
/// `first` is the Over (totals) or home side (spreads), `second` the Under or
/// away side. Returns `None` when the lines leave no window, the window holds
/// no whole-number result, or no two different books quote the legs.
///
/// # Panics
///
/// Panics if the markets belong to different events or market types.
pub fn find_middle(
    first: &MarketQuotes,
    second: &MarketQuotes,
    stake_per_side: Money,
) -> Option<MiddleSignal> {
    let (lower, upper) = window_bounds(first.key(), second.key())?;
    let width = upper - lower;
    if width <= Decimal::ZERO {
        return None;
    }
    let window = integer_window(lower, upper)?;

    let stake = to_f64(stake_per_side);
    let (a, b, outcomes) = best_pair(first.quotes(), second.quotes(), stake)?;

    Some(MiddleSignal {
        market: first.key().market,
        first: leg(first.key(), a),
        second: leg(second.key(), b),
        lower,
        upper,
        window,
        width,
        stake_per_side,
        both_win_profit: to_money(outcomes.both),
        worst_case: to_money(outcomes.worst()),
    })
}

/// Exclusive bounds of the both-win window.
fn window_bounds(first: &MarketKey, second: &MarketKey) -> Option<(Line, Line)> {
    assert!(
        first.event_id == second.event_id && first.market == second.market,
        "{first} and {second} are not the same market"
    );
    let (first_line, second_line) = (first.line?, second.line?);

    match (first.market, first.side, second.side) {
        (MarketType::Total, Side::Over, Side::Under) => Some((first_line, second_line)),
        // Home h covers when margin > -h; away a covers when margin < a.
        (MarketType::Spread, Side::Home, Side::Away) => Some((-first_line, second_line)),
        _ => None,
    }
}

/// Whole-number results strictly inside `(lower, upper)`.
fn integer_window(lower: Line, upper: Line) -> Option<(i64, i64)> {
    let low = lower.floor().to_i64()? + 1;
    let high = upper.ceil().to_i64()? - 1;
    (low <= high).then_some((low, high))
}

/// Net results of a pair of bets at equal stake.
#[derive(Debug, Clone, Copy)]
struct Outcomes {
    first_only: f64,
    second_only: f64,
    both: f64,
}

impl Outcomes {
    fn new(first: Odds, second: Odds, stake: f64) -> Self {
        let first_win = stake * first.profit_per_unit();
        let second_win = stake * second.profit_per_unit();
        Self {
            first_only: first_win - stake,
            second_only: second_win - stake,
            both: first_win + second_win,
        }
    }

    fn worst(self) -> f64 {
        self.first_only.min(self.second_only)
    }
}

/// Pair from different books with the best worst case.
fn best_pair<'q>(
    firsts: &'q [Quote],
    seconds: &'q [Quote],
    stake: f64,
) -> Option<(&'q Quote, &'q Quote, Outcomes)> {
    let mut best: Option<(&Quote, &Quote, Outcomes)> = None;
    for a in firsts {
        for b in seconds {
            if a.book() == b.book() {
                continue;
            }
            let outcomes = Outcomes::new(a.odds(), b.odds(), stake);
            if best.map_or(true, |(_, _, current)| outcomes.worst() > current.worst()) {
                best = Some((a, b, outcomes));
            }
        }
    }
    best
}

fn leg(key: &MarketKey, quote: &Quote) -> MiddleLeg {
    MiddleLeg {
        key: key.clone(),
        book: quote.book().clone(),
        odds: quote.odds(),
    }
}
