//! Opportunity type with builder pattern.
//!
//! This module provides the `Opportunity` struct representing one aggregated,
//! classified market, along with `OpportunityBuilder` for safe construction.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use super::aggregator::AggregatedMarket;
use super::error::OddsError;
use super::fair::FairPrice;
use super::market::{Event, MarketKey};
use super::pricing::{expected_value_percent, kelly_fraction};
use super::quote::BookPrice;

/// What kind of opportunity a market represents.
///
/// Variants are ordered by precedence: when several apply, the greatest wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    #[default]
    None,
    Ev,
    Middling,
    Arbitrage,
}

impl Classification {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Ev => "ev",
            Self::Middling => "middling",
            Self::Arbitrage => "arbitrage",
        }
    }

    #[must_use]
    pub const fn is_flagged(self) -> bool {
        !matches!(self, Self::None)
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when building an Opportunity fails.
#[derive(Debug, Clone, PartialEq)]
pub enum OpportunityBuildError {
    /// Event is required but was not provided.
    MissingEvent,
    /// Aggregated market is required but was not provided.
    MissingMarket,
    /// The market belongs to a different event.
    EventMismatch,
    /// A book appears more than once across best price and field.
    DuplicateBook(String),
    /// The fair probability could not be priced.
    InvalidFair(OddsError),
}

impl fmt::Display for OpportunityBuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingEvent => write!(f, "event is required"),
            Self::MissingMarket => write!(f, "market is required"),
            Self::EventMismatch => write!(f, "market key does not belong to the event"),
            Self::DuplicateBook(book) => write!(f, "book {book} is quoted more than once"),
            Self::InvalidFair(err) => write!(f, "cannot price opportunity: {err}"),
        }
    }
}

impl std::error::Error for OpportunityBuildError {}

/// An aggregated, classified market.
///
/// Use `Opportunity::builder()` to construct instances. The builder derives
/// EV and Kelly fraction from the best price and the fair probability.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Opportunity {
    key: MarketKey,
    event: Event,
    my_price: BookPrice,
    field_prices: Vec<BookPrice>,
    fair: Option<FairPrice>,
    ev_percent: Option<f64>,
    kelly_fraction: Option<f64>,
    classification: Classification,
}

impl Opportunity {
    /// Create a new builder for constructing an Opportunity.
    pub fn builder() -> OpportunityBuilder {
        OpportunityBuilder::new()
    }

    #[must_use]
    pub const fn key(&self) -> &MarketKey {
        &self.key
    }

    #[must_use]
    pub const fn event(&self) -> &Event {
        &self.event
    }

    /// Best available price and its book.
    #[must_use]
    pub const fn my_price(&self) -> &BookPrice {
        &self.my_price
    }

    /// Every other book's price, ordered by book name.
    #[must_use]
    pub fn field_prices(&self) -> &[BookPrice] {
        &self.field_prices
    }

    #[must_use]
    pub const fn fair(&self) -> Option<&FairPrice> {
        self.fair.as_ref()
    }

    #[must_use]
    pub fn fair_probability(&self) -> Option<f64> {
        self.fair.map(|fair| fair.probability)
    }

    /// Vig of the market the fair probability came from.
    #[must_use]
    pub fn vig_percent(&self) -> Option<f64> {
        self.fair.map(|fair| fair.vig_percent)
    }

    /// EV of the best price against the fair probability.
    #[must_use]
    pub const fn ev_percent(&self) -> Option<f64> {
        self.ev_percent
    }

    #[must_use]
    pub const fn kelly_fraction(&self) -> Option<f64> {
        self.kelly_fraction
    }

    #[must_use]
    pub const fn classification(&self) -> Classification {
        self.classification
    }
}

/// Builder for constructing `Opportunity` instances.
///
/// # Example
///
/// ```ignore
/// let opportunity = Opportunity::builder()
///     .event(event)
///     .market(aggregated)
///     .fair(Some(fair))
///     .classification(Classification::Ev)
///     .build()?;
/// ```
#[derive(Debug, Default)]
pub struct OpportunityBuilder {
    event: Option<Event>,
    market: Option<AggregatedMarket>,
    fair: Option<FairPrice>,
    classification: Classification,
}

impl OpportunityBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn event(mut self, event: Event) -> Self {
        self.event = Some(event);
        self
    }

    pub fn market(mut self, market: AggregatedMarket) -> Self {
        self.market = Some(market);
        self
    }

    pub fn fair(mut self, fair: Option<FairPrice>) -> Self {
        self.fair = fair;
        self
    }

    pub fn classification(mut self, classification: Classification) -> Self {
        self.classification = classification;
        self
    }

    /// Build the Opportunity, calculating derived fields.
    ///
    /// # Errors
    ///
    /// Returns `OpportunityBuildError` if a required field is missing, the
    /// market belongs to another event, or a book is listed twice.
    pub fn build(self) -> Result<Opportunity, OpportunityBuildError> {
        let event = self.event.ok_or(OpportunityBuildError::MissingEvent)?;
        let market = self.market.ok_or(OpportunityBuildError::MissingMarket)?;

        if &market.key.event_id != event.id() {
            return Err(OpportunityBuildError::EventMismatch);
        }

        let mut seen = HashSet::new();
        for price in std::iter::once(&market.my_price).chain(&market.field_prices) {
            if !seen.insert(&price.book) {
                return Err(OpportunityBuildError::DuplicateBook(price.book.to_string()));
            }
        }

        let (ev_percent, kelly) = match self.fair {
            Some(fair) => {
                let odds = market.my_price.odds;
                let ev = expected_value_percent(odds, fair.probability)
                    .map_err(OpportunityBuildError::InvalidFair)?;
                let kelly = kelly_fraction(odds, fair.probability)
                    .map_err(OpportunityBuildError::InvalidFair)?;
                (Some(ev), Some(kelly))
            }
            None => (None, None),
        };

        Ok(Opportunity {
            key: market.key,
            event,
            my_price: market.my_price,
            field_prices: market.field_prices,
            fair: self.fair,
            ev_percent,
            kelly_fraction: kelly,
            classification: self.classification,
        })
    }
}
