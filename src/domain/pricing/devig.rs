//! Bookmaker margin removal.
//!
//! Normalizes the implied probabilities of every side of a market so they sum
//! to one. A sum below one (negative vig) is normalized the same way; stale
//! one-sided prices cause it and callers treat it as a data-quality signal.

use serde::Serialize;
use tracing::debug;

use crate::domain::error::OddsError;
use crate::domain::odds::{
    american_to_implied_probability, probability_to_american_rounded, validate_probability, Odds,
};

/// Result of de-vigging a two-way market quoted in American odds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TwoWayDevig {
    pub fair_prob_a: f64,
    pub fair_prob_b: f64,
    pub fair_odds_a: i32,
    pub fair_odds_b: i32,
    pub vig_percent: f64,
}

/// Fair probabilities for every side of an N-way market.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Devig {
    /// Fair probabilities, in input order.
    pub fair_probabilities: Vec<f64>,
    /// `(Σ implied − 1) × 100`.
    pub vig_percent: f64,
}

impl Devig {
    /// Fair American odds for each side, rounded.
    ///
    /// # Errors
    ///
    /// Propagates [`OddsError::InvalidProbability`]; cannot happen for a
    /// result of [`devig_probabilities`].
    pub fn fair_american(&self) -> Result<Vec<i32>, OddsError> {
        self.fair_probabilities
            .iter()
            .map(|p| probability_to_american_rounded(*p))
            .collect()
    }
}

/// De-vig a two-way market from American odds.
///
/// # Errors
///
/// Returns [`OddsError::InvalidOdds`] if either price is zero.
pub fn devig_two_way(odds_a: i32, odds_b: i32) -> Result<TwoWayDevig, OddsError> {
    let implied_a = american_to_implied_probability(odds_a)?;
    let implied_b = american_to_implied_probability(odds_b)?;

    let devig = devig_probabilities(&[implied_a, implied_b])?;
    let fair_prob_a = devig.fair_probabilities[0];
    let fair_prob_b = devig.fair_probabilities[1];

    Ok(TwoWayDevig {
        fair_prob_a,
        fair_prob_b,
        fair_odds_a: probability_to_american_rounded(fair_prob_a)?,
        fair_odds_b: probability_to_american_rounded(fair_prob_b)?,
        vig_percent: devig.vig_percent,
    })
}

/// Normalize the implied probabilities of N mutually exclusive outcomes.
///
/// # Errors
///
/// Returns [`OddsError::InsufficientOdds`] for fewer than two outcomes and
/// [`OddsError::InvalidProbability`] for any entry outside (0, 1).
pub fn remove_vig_from_probs(probs: &[f64]) -> Result<Vec<f64>, OddsError> {
    devig_probabilities(probs).map(|devig| devig.fair_probabilities)
}

/// Normalize implied probabilities and report the market's vig.
///
/// # Errors
///
/// Same as [`remove_vig_from_probs`].
pub fn devig_probabilities(probs: &[f64]) -> Result<Devig, OddsError> {
    if probs.len() < 2 {
        return Err(OddsError::InsufficientOdds {
            required: 2,
            actual: probs.len(),
        });
    }
    for p in probs {
        validate_probability(*p)?;
    }

    let total: f64 = probs.iter().sum();
    if total < 1.0 {
        debug!(total, "Implied probabilities sum below one");
    }

    Ok(Devig {
        fair_probabilities: probs.iter().map(|p| p / total).collect(),
        vig_percent: (total - 1.0) * 100.0,
    })
}

/// De-vig a market given one canonical price per side.
///
/// # Errors
///
/// Returns [`OddsError::InsufficientOdds`] for fewer than two sides.
pub fn devig_odds(odds: &[Odds]) -> Result<Devig, OddsError> {
    let implied: Vec<f64> = odds.iter().map(|o| o.implied_probability()).collect();
    devig_probabilities(&implied)
}

/// Estimate a fair probability when only one side of a market is quoted.
///
/// Assumes the missing sides carry the market's margin in proportion, so the
/// quoted side's share is `implied / (1 + vig)`. An approximation: the result
/// must be labelled as estimated wherever it is shown.
///
/// # Errors
///
/// Returns [`OddsError::InvalidProbability`] if `implied` is outside (0, 1)
/// or the assumed vig is negative or non-finite.
pub fn estimate_fair_probability(implied: f64, assumed_vig_percent: f64) -> Result<f64, OddsError> {
    validate_probability(implied)?;
    if !assumed_vig_percent.is_finite() || assumed_vig_percent < 0.0 {
        return Err(OddsError::InvalidProbability {
            probability: assumed_vig_percent / 100.0,
        });
    }
    Ok(implied / (1.0 + assumed_vig_percent / 100.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-6;

    #[test]
    fn two_way_reference_market() {
        let devig = devig_two_way(130, -150).unwrap();

        assert!((devig.fair_prob_a - 0.420_168).abs() < 1e-4);
        assert!((devig.fair_prob_b - 0.579_832).abs() < 1e-4);
        assert_eq!(devig.fair_odds_a, 138);
        assert_eq!(devig.fair_odds_b, -138);
        assert!((devig.vig_percent - 3.478).abs() < 0.01);
        assert!((devig.fair_prob_a + devig.fair_prob_b - 1.0).abs() < EPS);
    }

    #[test]
    fn two_way_sums_to_one() {
        for (a, b) in [(-110, -110), (250, -300), (-105, -115), (1000, -2000), (100, 100)] {
            let devig = devig_two_way(a, b).unwrap();
            assert!((devig.fair_prob_a + devig.fair_prob_b - 1.0).abs() < EPS);
        }
    }

    #[test]
    fn symmetric_market_is_even() {
        let devig = devig_two_way(-110, -110).unwrap();
        assert!((devig.fair_prob_a - 0.5).abs() < EPS);
        assert_eq!(devig.fair_odds_a, -100);
    }

    #[test]
    fn zero_odds_rejected() {
        assert!(matches!(
            devig_two_way(0, -110),
            Err(OddsError::InvalidOdds { .. })
        ));
    }

    #[test]
    fn n_way_sums_to_one() {
        let probs = [0.45, 0.30, 0.32];
        let fair = remove_vig_from_probs(&probs).unwrap();
        assert_eq!(fair.len(), 3);
        assert!((fair.iter().sum::<f64>() - 1.0).abs() < EPS);
        assert!(fair[0] > fair[2] && fair[2] > fair[1]);
    }

    #[test]
    fn negative_vig_still_normalizes() {
        let devig = devig_probabilities(&[0.45, 0.50]).unwrap();
        assert!(devig.vig_percent < 0.0);
        assert!((devig.fair_probabilities.iter().sum::<f64>() - 1.0).abs() < EPS);
        assert!((devig.fair_probabilities[0] - 0.45 / 0.95).abs() < EPS);
    }

    #[test]
    fn fewer_than_two_sides_rejected() {
        assert_eq!(
            remove_vig_from_probs(&[0.5]),
            Err(OddsError::InsufficientOdds {
                required: 2,
                actual: 1
            })
        );
        assert!(remove_vig_from_probs(&[]).is_err());
    }

    #[test]
    fn invalid_probability_rejected() {
        assert!(matches!(
            remove_vig_from_probs(&[0.5, 0.0]),
            Err(OddsError::InvalidProbability { .. })
        ));
    }

    #[test]
    fn devig_odds_matches_two_way() {
        let odds = [Odds::from_american(130).unwrap(), Odds::from_american(-150).unwrap()];
        let devig = devig_odds(&odds).unwrap();
        let reference = devig_two_way(130, -150).unwrap();

        assert!((devig.fair_probabilities[0] - reference.fair_prob_a).abs() < EPS);
        assert!((devig.vig_percent - reference.vig_percent).abs() < EPS);
        assert_eq!(devig.fair_american().unwrap(), vec![138, -138]);
    }

    #[test]
    fn estimate_shares_assumed_margin() {
        let fair = estimate_fair_probability(0.5238, 4.76).unwrap();
        assert!((fair - 0.5238 / 1.0476).abs() < EPS);
        assert!(estimate_fair_probability(0.5, -1.0).is_err());
        assert!(estimate_fair_probability(1.2, 4.0).is_err());
    }
}
