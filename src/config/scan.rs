//! Scan filters and consensus settings.

use serde::Deserialize;

use crate::domain::pricing::BookWeights;
use crate::domain::{BookId, MarketType, ScanParams};
use crate::error::ConfigError;

/// `[scan]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScanConfig {
    /// Per-book consensus weights. Unlisted books weigh 1.
    #[serde(default)]
    pub weights: BookWeights,

    /// Margin assumed when a market has no quoted complement. Unset leaves
    /// such markets without a fair price.
    #[serde(default)]
    pub assumed_vig_percent: Option<f64>,

    /// Sport allow-list; empty allows all.
    #[serde(default)]
    pub sports: Vec<String>,

    /// Market-type allow-list; empty allows all.
    #[serde(default)]
    pub markets: Vec<MarketType>,

    /// Book allow-list; empty allows all.
    #[serde(default)]
    pub books: Vec<BookId>,

    /// Only report classified opportunities.
    #[serde(default)]
    pub flagged_only: bool,
}

impl ScanConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if let Some((book, weight)) = self.weights.first_invalid() {
            return Err(ConfigError::InvalidValue {
                field: "scan.weights",
                reason: format!("weight for {book} must be a non-negative number, got {weight}"),
            });
        }
        if let Some(vig) = self.assumed_vig_percent {
            if !vig.is_finite() || !(0.0..100.0).contains(&vig) {
                return Err(ConfigError::InvalidValue {
                    field: "scan.assumed_vig_percent",
                    reason: format!("must be in [0, 100), got {vig}"),
                });
            }
        }
        Ok(())
    }

    /// Scan parameters described by this section.
    #[must_use]
    pub fn params(&self) -> ScanParams {
        ScanParams {
            weights: self.weights.clone(),
            assumed_vig_percent: self.assumed_vig_percent,
            sports: self.sports.clone(),
            markets: self.markets.clone(),
            books: self.books.clone(),
            flagged_only: self.flagged_only,
        }
    }
}
