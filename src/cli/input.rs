//! JSON quote feed reader.
//!
//! ```json
//! {"events": [{"id": "nfl-kc-buf", "sport": "nfl", "home": "Chiefs", "away": "Bills",
//!   "quotes": [{"book": "pinnacle", "market": "spread", "side": "home",
//!               "line": -3.5, "odds": "-108", "timestamp": "2024-09-08T17:00:00Z"}]}]}
//! ```
//!
//! Odds may be American or decimal, as a string or a number. A missing
//! timestamp means "as of load time". A quote with an unusable price is
//! logged and skipped; only malformed JSON fails the whole feed.

use std::io::Read;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::domain::{
    BookId, Event, EventBatch, EventId, Line, MarketType, Odds, Quote, QuoteCache, RawOdds, Side,
};
use crate::error::Result;

#[derive(Debug, Deserialize)]
struct Feed {
    events: Vec<FeedEvent>,
}

#[derive(Debug, Deserialize)]
struct FeedEvent {
    id: EventId,
    sport: String,
    home: String,
    away: String,
    #[serde(default)]
    quotes: Vec<FeedQuote>,
}

#[derive(Debug, Deserialize)]
struct FeedQuote {
    book: BookId,
    market: MarketType,
    side: Side,
    #[serde(default)]
    line: Option<Line>,
    odds: RawOdds,
    #[serde(default)]
    timestamp: Option<DateTime<Utc>>,
}

/// Read a feed file, or stdin for `-`.
pub fn read_source(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut content = String::new();
        std::io::stdin().read_to_string(&mut content)?;
        Ok(content)
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}

/// Parse a feed into one batch per event.
///
/// Quotes pass through a [`QuoteCache`], so an event listed more than once
/// merges its quotes and only the newest quote per book and market survives.
/// The last listing of an event supplies its teams and sport.
pub fn parse_feed(content: &str) -> Result<Vec<EventBatch>> {
    let feed: Feed = serde_json::from_str(content)?;
    let loaded_at = Utc::now();
    let cache = QuoteCache::new();
    let mut events: Vec<Event> = Vec::new();
    let mut skipped = 0usize;

    for entry in feed.events {
        let event = Event::new(entry.id, entry.sport, entry.home, entry.away);
        for quote in entry.quotes {
            let odds = match Odds::try_from(quote.odds) {
                Ok(odds) => odds,
                Err(e) => {
                    warn!(
                        event = %event.id(),
                        book = %quote.book,
                        error = %e,
                        "Skipping quote with invalid odds"
                    );
                    skipped += 1;
                    continue;
                }
            };
            let stored = cache.upsert(Quote::for_market(
                quote.book,
                event.id().clone(),
                quote.market,
                quote.side,
                quote.line,
                odds,
                quote.timestamp.unwrap_or(loaded_at),
            ));
            if !stored {
                debug!(event = %event.id(), "Ignoring stale quote");
            }
        }

        match events.iter_mut().find(|e| e.id() == event.id()) {
            Some(existing) => *existing = event,
            None => events.push(event),
        }
    }

    info!(
        events = events.len(),
        quotes = cache.len(),
        skipped,
        "Loaded quote feed"
    );

    Ok(events
        .into_iter()
        .map(|event| {
            let mut quotes = cache.snapshot(event.id());
            quotes.sort_by(|a, b| (a.key(), a.book()).cmp(&(b.key(), b.book())));
            EventBatch::new(event, quotes)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn parses_mixed_odds_formats() {
        let batches = parse_feed(
            r#"{"events": [{"id": "e1", "sport": "nfl", "home": "Chiefs", "away": "Bills",
                "quotes": [
                    {"book": "a", "market": "moneyline", "side": "home", "odds": "-110"},
                    {"book": "b", "market": "moneyline", "side": "home", "odds": 1.95},
                    {"book": "c", "market": "total", "side": "over", "line": 47.5, "odds": 105}
                ]}]}"#,
        )
        .unwrap();

        assert_eq!(batches.len(), 1);
        let quotes = &batches[0].quotes;
        assert_eq!(quotes.len(), 3);
        assert!(quotes.iter().any(|q| q.odds().american() == -110));
        assert!(quotes.iter().any(|q| q.key().line == Some(dec!(47.5))));
    }

    #[test]
    fn repeated_event_keeps_newest_quote() {
        let batches = parse_feed(
            r#"{"events": [
                {"id": "e1", "sport": "nba", "home": "A", "away": "B", "quotes": [
                    {"book": "a", "market": "moneyline", "side": "home", "odds": -110,
                     "timestamp": "2024-01-01T00:00:10Z"}]},
                {"id": "e1", "sport": "nba", "home": "A", "away": "B", "quotes": [
                    {"book": "a", "market": "moneyline", "side": "home", "odds": -150,
                     "timestamp": "2024-01-01T00:00:00Z"}]}
            ]}"#,
        )
        .unwrap();

        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].quotes.len(), 1);
        assert_eq!(batches[0].quotes[0].odds().american(), -110);
    }

    #[test]
    fn invalid_odds_skip_only_that_quote() {
        let batches = parse_feed(
            r#"{"events": [{"id": "e1", "sport": "nfl", "home": "Chiefs", "away": "Bills", "quotes": [
                {"book": "a", "market": "moneyline", "side": "home", "odds": "+180"},
                {"book": "b", "market": "moneyline", "side": "away", "odds": -170},
                {"book": "c", "market": "moneyline", "side": "away", "odds": 0},
                {"book": "d", "market": "moneyline", "side": "home", "odds": "abc"},
                {"book": "e", "market": "moneyline", "side": "home", "odds": "+50"}]}]}"#,
        )
        .unwrap();

        assert_eq!(batches.len(), 1);
        let books: Vec<&str> = batches[0].quotes.iter().map(|q| q.book().as_str()).collect();
        assert_eq!(books.len(), 2);
        assert!(books.contains(&"a"));
        assert!(books.contains(&"b"));
    }

    #[test]
    fn malformed_json_fails_the_feed() {
        assert!(parse_feed(r#"{"events": [{"id": "e1""#).is_err());
        assert!(parse_feed(r#"{"events": [{"id": "e1", "sport": "nba", "home": "A", "away": "B",
            "quotes": [{"book": "a", "market": "moneyline", "side": "home", "odds": true}]}]}"#)
        .is_err());
    }
}
