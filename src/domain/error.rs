//! Errors raised by the pricing pipeline.
//!
//! Every variant is local and recoverable: callers skip the offending market
//! and keep processing the rest of the batch.
//!
//! # Examples
//!
//! ```
//! use vigless::domain::{american_to_implied_probability, OddsError};
//!
//! let result = american_to_implied_probability(0);
//! assert!(matches!(result, Err(OddsError::InvalidOdds { .. })));
//! ```

use thiserror::Error;

/// Errors that occur when odds, probabilities or weights are unusable.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OddsError {
    /// Malformed or zero price.
    #[error("invalid odds: {odds}")]
    InvalidOdds {
        /// The rejected price, as supplied.
        odds: String,
    },

    /// Fewer sides or books than the computation requires.
    #[error("insufficient odds: need at least {required}, got {actual}")]
    InsufficientOdds {
        /// Minimum number of entries required.
        required: usize,
        /// Number of entries supplied.
        actual: usize,
    },

    /// Every supplied weight is zero, so no weighted mean exists.
    #[error("no valid weight: all {count} weights are zero")]
    NoValidWeight {
        /// Number of weighted entries.
        count: usize,
    },

    /// Probability outside the open interval (0, 1).
    #[error("probability must be in (0, 1), got {probability}")]
    InvalidProbability {
        /// The rejected probability.
        probability: f64,
    },

    /// Stake must be positive and finite.
    #[error("stake must be positive, got {stake}")]
    InvalidStake {
        /// The rejected stake.
        stake: f64,
    },

    /// Odds string could not be parsed.
    #[error("cannot parse odds '{input}': {reason}")]
    ParseOdds {
        /// The raw input.
        input: String,
        /// Why parsing failed.
        reason: &'static str,
    },
}

impl OddsError {
    pub(crate) fn invalid(odds: impl ToString) -> Self {
        Self::InvalidOdds {
            odds: odds.to_string(),
        }
    }
}
