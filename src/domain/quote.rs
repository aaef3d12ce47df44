//! Sportsbook quotes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{BookId, EventId};
use super::market::{Line, MarketKey, MarketType, Side};
use super::odds::Odds;

/// One book's price for one side of one market at a point in time.
///
/// Quotes are immutable; a refresh produces a new quote that supersedes the
/// old one with the same book and [`MarketKey`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    book: BookId,
    key: MarketKey,
    odds: Odds,
    timestamp: DateTime<Utc>,
}

impl Quote {
    pub fn new(book: BookId, key: MarketKey, odds: Odds, timestamp: DateTime<Utc>) -> Self {
        Self {
            book,
            key,
            odds,
            timestamp,
        }
    }

    /// Convenience constructor from the individual key fields.
    pub fn for_market(
        book: impl Into<BookId>,
        event_id: EventId,
        market: MarketType,
        side: Side,
        line: Option<Line>,
        odds: Odds,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self::new(
            book.into(),
            MarketKey::new(event_id, market, side, line),
            odds,
            timestamp,
        )
    }

    #[must_use]
    pub const fn book(&self) -> &BookId {
        &self.book
    }

    #[must_use]
    pub const fn key(&self) -> &MarketKey {
        &self.key
    }

    #[must_use]
    pub const fn odds(&self) -> Odds {
        self.odds
    }

    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Whether this quote replaces `other` on refresh.
    ///
    /// Only quotes for the same book and market supersede each other; equal
    /// timestamps favour the newcomer.
    #[must_use]
    pub fn supersedes(&self, other: &Self) -> bool {
        self.book == other.book && self.key == other.key && self.timestamp >= other.timestamp
    }

    /// The book and price, detached from the market key.
    #[must_use]
    pub fn price(&self) -> BookPrice {
        BookPrice::new(self.book.clone(), self.odds)
    }
}

/// A price offered by a specific book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookPrice {
    pub book: BookId,
    pub odds: Odds,
}

impl BookPrice {
    pub fn new(book: impl Into<BookId>, odds: Odds) -> Self {
        Self {
            book: book.into(),
            odds,
        }
    }

    /// Implied probability of the quoted price.
    #[must_use]
    pub fn implied_probability(&self) -> f64 {
        self.odds.implied_probability()
    }
}
