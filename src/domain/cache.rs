//! Thread-safe cache of the latest quote per book and market.

use parking_lot::RwLock;
use std::collections::HashMap;

use super::id::{BookId, EventId};
use super::market::MarketKey;
use super::quote::Quote;

/// Latest live quotes, written by feed fetchers and read as snapshots.
///
/// Fetchers for different events may write concurrently; the scanner only
/// ever sees immutable snapshots.
pub struct QuoteCache {
    quotes: RwLock<HashMap<(BookId, MarketKey), Quote>>,
}

impl QuoteCache {
    pub fn new() -> Self {
        Self {
            quotes: RwLock::new(HashMap::new()),
        }
    }

    /// Store a quote unless a newer one for the same book and market exists.
    ///
    /// Returns `true` when the quote was stored.
    pub fn upsert(&self, quote: Quote) -> bool {
        let slot = (quote.book().clone(), quote.key().clone());
        let mut quotes = self.quotes.write();
        match quotes.get(&slot) {
            Some(existing) if !quote.supersedes(existing) => false,
            _ => {
                quotes.insert(slot, quote);
                true
            }
        }
    }

    /// Snapshot of every live quote for one event.
    pub fn snapshot(&self, event_id: &EventId) -> Vec<Quote> {
        self.quotes
            .read()
            .values()
            .filter(|quote| &quote.key().event_id == event_id)
            .cloned()
            .collect()
    }

    /// Drop every quote for an event (e.g. once it has started).
    ///
    /// Returns the number of quotes removed.
    pub fn remove_event(&self, event_id: &EventId) -> usize {
        let mut quotes = self.quotes.write();
        let before = quotes.len();
        quotes.retain(|(_, key), _| &key.event_id != event_id);
        before - quotes.len()
    }

    /// Number of quotes in cache
    pub fn len(&self) -> usize {
        self.quotes.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for QuoteCache {
    fn default() -> Self {
        Self::new()
    }
}
