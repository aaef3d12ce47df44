//! Expected value of a bet at an offered price.
//!
//! EV is always measured against a fair probability (de-vigged or
//! consensus), never the offering book's own implied probability, which
//! would just return the book's margin.

use crate::domain::error::OddsError;
use crate::domain::odds::{validate_probability, Odds};

/// Stake used when the caller does not care about absolute amounts.
pub const DEFAULT_STAKE: f64 = 100.0;

/// EV percent of staking on American odds with a known fair probability.
///
/// Payout on a win is `stake × odds/100` for positive odds and
/// `stake × 100/|odds|` for negative odds. EV is
/// `p × payout − (1 − p) × stake`, returned as a percentage of the stake.
///
/// # Errors
///
/// [`OddsError::InvalidOdds`] for zero odds, [`OddsError::InvalidProbability`]
/// outside (0, 1) and [`OddsError::InvalidStake`] for a non-positive stake.
pub fn calculate_ev(
    offered_american: i32,
    fair_probability: f64,
    stake: f64,
) -> Result<f64, OddsError> {
    if offered_american == 0 {
        return Err(OddsError::invalid(offered_american));
    }
    validate_probability(fair_probability)?;
    validate_stake(stake)?;

    let odds = f64::from(offered_american);
    let payout = if odds > 0.0 {
        stake * odds / 100.0
    } else {
        stake * 100.0 / odds.abs()
    };

    let ev = fair_probability * payout - (1.0 - fair_probability) * stake;
    Ok(ev / stake * 100.0)
}

/// EV percent of a canonical price; same contract as [`calculate_ev`].
///
/// # Errors
///
/// [`OddsError::InvalidProbability`] outside (0, 1).
pub fn expected_value_percent(odds: Odds, fair_probability: f64) -> Result<f64, OddsError> {
    validate_probability(fair_probability)?;
    let win = fair_probability * odds.profit_per_unit();
    let loss = 1.0 - fair_probability;
    Ok((win - loss) * 100.0)
}

/// Full-Kelly fraction of bankroll to stake, floored at zero.
///
/// `(b·p − (1 − p)) / b`, with `b` the net payout per unit.
///
/// # Errors
///
/// [`OddsError::InvalidProbability`] outside (0, 1).
pub fn kelly_fraction(odds: Odds, fair_probability: f64) -> Result<f64, OddsError> {
    validate_probability(fair_probability)?;
    let b = odds.profit_per_unit();
    let fraction = (b * fair_probability - (1.0 - fair_probability)) / b;
    Ok(fraction.max(0.0))
}

fn validate_stake(stake: f64) -> Result<(), OddsError> {
    if stake.is_finite() && stake > 0.0 {
        Ok(())
    } else {
        Err(OddsError::InvalidStake { stake })
    }
}
