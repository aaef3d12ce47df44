//! Odds notation conversion.
//!
//! Prices arrive as American (`+150`, `-110`) or decimal (`2.50`) odds. They
//! are stored as decimal odds, which represent both notations losslessly, and
//! converted to implied probability on demand.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::OddsError;

/// Convert American odds to the implied probability of the outcome.
///
/// Positive odds: `100 / (odds + 100)`. Negative odds: `|odds| / (|odds| + 100)`.
///
/// # Errors
///
/// Returns [`OddsError::InvalidOdds`] when `odds == 0`.
pub fn american_to_implied_probability(odds: i32) -> Result<f64, OddsError> {
    if odds == 0 {
        return Err(OddsError::invalid(odds));
    }
    let odds = f64::from(odds);
    if odds > 0.0 {
        Ok(100.0 / (odds + 100.0))
    } else {
        Ok(odds.abs() / (odds.abs() + 100.0))
    }
}

/// Convert decimal odds to implied probability (`1 / odds`).
///
/// # Errors
///
/// Returns [`OddsError::InvalidOdds`] unless `odds` is finite and above 1.
pub fn decimal_to_implied_probability(odds: f64) -> Result<f64, OddsError> {
    validate_decimal(odds)?;
    Ok(1.0 / odds)
}

/// Convert a probability to unrounded American odds.
///
/// `p >= 0.5` maps to negative odds `-100p / (1 - p)`, anything below to
/// positive odds `100(1 - p) / p`. Exactly 0.5 maps to -100.
///
/// # Errors
///
/// Returns [`OddsError::InvalidProbability`] outside (0, 1).
pub fn probability_to_american(probability: f64) -> Result<f64, OddsError> {
    validate_probability(probability)?;
    if probability >= 0.5 {
        Ok(-100.0 * probability / (1.0 - probability))
    } else {
        Ok(100.0 * (1.0 - probability) / probability)
    }
}

/// Convert a probability to American odds rounded to the nearest integer.
///
/// # Errors
///
/// Returns [`OddsError::InvalidProbability`] outside (0, 1).
pub fn probability_to_american_rounded(probability: f64) -> Result<i32, OddsError> {
    // Bounded by the probability check; |odds| < i32::MAX for any p a feed can express.
    probability_to_american(probability).map(|odds| odds.round() as i32)
}

/// Convert a probability to decimal odds (`1 / p`).
///
/// # Errors
///
/// Returns [`OddsError::InvalidProbability`] outside (0, 1).
pub fn probability_to_decimal(probability: f64) -> Result<f64, OddsError> {
    validate_probability(probability)?;
    Ok(1.0 / probability)
}

/// Convert American odds to decimal odds.
///
/// # Errors
///
/// Returns [`OddsError::InvalidOdds`] when `odds == 0`.
pub fn american_to_decimal(odds: i32) -> Result<f64, OddsError> {
    if odds == 0 {
        return Err(OddsError::invalid(odds));
    }
    let odds = f64::from(odds);
    if odds > 0.0 {
        Ok(1.0 + odds / 100.0)
    } else {
        Ok(1.0 + 100.0 / odds.abs())
    }
}

/// Convert decimal odds to unrounded American odds.
///
/// Decimal 2.0 (even money) maps to +100.
///
/// # Errors
///
/// Returns [`OddsError::InvalidOdds`] unless `odds` is finite and above 1.
pub fn decimal_to_american(odds: f64) -> Result<f64, OddsError> {
    validate_decimal(odds)?;
    if odds >= 2.0 {
        Ok((odds - 1.0) * 100.0)
    } else {
        Ok(-100.0 / (odds - 1.0))
    }
}

fn validate_decimal(odds: f64) -> Result<(), OddsError> {
    if odds.is_finite() && odds > 1.0 {
        Ok(())
    } else {
        Err(OddsError::invalid(odds))
    }
}

pub(crate) fn validate_probability(probability: f64) -> Result<(), OddsError> {
    if probability > 0.0 && probability < 1.0 {
        Ok(())
    } else {
        Err(OddsError::InvalidProbability { probability })
    }
}

/// A validated price in canonical (decimal) form.
///
/// Comparison is by payout: larger odds are better for the bettor.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "RawOdds", into = "f64")]
pub struct Odds(f64);

impl Odds {
    /// Build from American odds.
    ///
    /// American prices never have a magnitude below 100; anything in
    /// `(-100, 100)` could not be displayed back as the same price.
    ///
    /// # Errors
    ///
    /// Returns [`OddsError::InvalidOdds`] when `-100 < odds < 100`.
    pub fn from_american(odds: i32) -> Result<Self, OddsError> {
        if odds.unsigned_abs() < 100 {
            return Err(OddsError::invalid(odds));
        }
        american_to_decimal(odds).map(Self)
    }

    /// Build from decimal odds.
    ///
    /// # Errors
    ///
    /// Returns [`OddsError::InvalidOdds`] unless `odds` is finite and above 1.
    pub fn from_decimal(odds: f64) -> Result<Self, OddsError> {
        validate_decimal(odds)?;
        Ok(Self(odds))
    }

    /// Build the fair price for a probability.
    ///
    /// # Errors
    ///
    /// Returns [`OddsError::InvalidProbability`] outside (0, 1).
    pub fn from_probability(probability: f64) -> Result<Self, OddsError> {
        probability_to_decimal(probability).map(Self)
    }

    /// Decimal odds, stake included.
    #[must_use]
    pub const fn decimal(self) -> f64 {
        self.0
    }

    /// American odds rounded to the nearest integer, for display.
    #[must_use]
    pub fn american(self) -> i32 {
        let odds = if self.0 >= 2.0 {
            (self.0 - 1.0) * 100.0
        } else {
            -100.0 / (self.0 - 1.0)
        };
        odds.round() as i32
    }

    /// Implied probability of the outcome at this price.
    #[must_use]
    pub fn implied_probability(self) -> f64 {
        1.0 / self.0
    }

    /// Net winnings per unit staked.
    #[must_use]
    pub fn profit_per_unit(self) -> f64 {
        self.0 - 1.0
    }
}

impl fmt::Display for Odds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let american = self.american();
        if american > 0 {
            write!(f, "+{american}")
        } else {
            write!(f, "{american}")
        }
    }
}

impl From<Odds> for f64 {
    fn from(odds: Odds) -> Self {
        odds.0
    }
}

impl FromStr for Odds {
    type Err = OddsError;

    /// Parse `"+150"`, `"-110"`, `"2.50"`, `"150"` or `"even"`.
    ///
    /// A leading sign means American. Otherwise a value with a decimal point,
    /// or a magnitude below 100, is read as decimal odds.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(OddsError::ParseOdds {
                input: input.to_string(),
                reason: "empty",
            });
        }

        if matches!(trimmed.to_ascii_lowercase().as_str(), "even" | "evens" | "ev") {
            return Self::from_american(100);
        }

        if trimmed.starts_with('+') || trimmed.starts_with('-') {
            let american: i32 = trimmed.parse().map_err(|_| OddsError::ParseOdds {
                input: input.to_string(),
                reason: "American odds must be an integer",
            })?;
            return Self::from_american(american);
        }

        let value: f64 = trimmed.parse().map_err(|_| OddsError::ParseOdds {
            input: input.to_string(),
            reason: "not a number",
        })?;
        Self::from_number(value)
    }
}

impl Odds {
    /// Interpret a bare number: integers with magnitude ≥ 100 are American,
    /// everything else decimal.
    fn from_number(value: f64) -> Result<Self, OddsError> {
        if value.fract() == 0.0 && value.abs() >= 100.0 && value.abs() <= f64::from(i32::MAX) {
            Self::from_american(value as i32)
        } else {
            Self::from_decimal(value)
        }
    }
}

/// Unvalidated price as it appears on the wire: a number or a string.
///
/// Deserializing into this never fails on a bad price, so callers can
/// validate with [`Odds::try_from`] and skip a single bad quote.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawOdds {
    Number(f64),
    Text(String),
}

impl TryFrom<RawOdds> for Odds {
    type Error = OddsError;

    fn try_from(raw: RawOdds) -> Result<Self, Self::Error> {
        match raw {
            RawOdds::Number(value) => Self::from_number(value),
            RawOdds::Text(text) => text.parse(),
        }
    }
}
