//! Multi-book consensus pricing.
//!
//! Combines the implied probabilities of several books into one estimate,
//! weighting each book by how much its prices are trusted. The result still
//! carries vig; de-vigging across every side is the caller's job, so a market
//! with only one side quoted never gets a unilateral "fair" label here.

use std::collections::HashMap;

use serde::Deserialize;

use crate::domain::error::OddsError;
use crate::domain::id::BookId;
use crate::domain::quote::BookPrice;

/// Weight applied to books missing from the map.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Per-book trust weights.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct BookWeights(HashMap<BookId, f64>);

impl BookWeights {
    /// Create an empty map (every book weighs [`DEFAULT_WEIGHT`]).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a book's weight.
    #[must_use]
    pub fn with(mut self, book: impl Into<BookId>, weight: f64) -> Self {
        self.0.insert(book.into(), weight);
        self
    }

    /// Weight for a book.
    #[must_use]
    pub fn weight(&self, book: &BookId) -> f64 {
        self.0.get(book).copied().unwrap_or(DEFAULT_WEIGHT)
    }

    /// First book whose weight is negative or non-finite.
    #[must_use]
    pub fn first_invalid(&self) -> Option<(&BookId, f64)> {
        self.0
            .iter()
            .find(|(_, w)| !w.is_finite() || **w < 0.0)
            .map(|(book, w)| (book, *w))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(BookId, f64)> for BookWeights {
    fn from_iter<I: IntoIterator<Item = (BookId, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Weighted mean implied probability, `Σ(p·w) / Σw`.
///
/// # Errors
///
/// [`OddsError::InsufficientOdds`] for no quotes, [`OddsError::NoValidWeight`]
/// when every weight is zero.
pub fn weighted_fair_probability(
    quotes: &[BookPrice],
    weights: &BookWeights,
) -> Result<f64, OddsError> {
    if quotes.is_empty() {
        return Err(OddsError::InsufficientOdds {
            required: 1,
            actual: 0,
        });
    }

    let (weighted, total_weight) = quotes.iter().fold((0.0, 0.0), |(sum, total), quote| {
        let weight = weights.weight(&quote.book);
        (sum + quote.implied_probability() * weight, total + weight)
    });

    if total_weight <= 0.0 {
        return Err(OddsError::NoValidWeight {
            count: quotes.len(),
        });
    }

    Ok(weighted / total_weight)
}
