//! Builders for domain primitives used across tests.
//!
//! Concise factories for [`Event`]s and [`Quote`]s so tests focus on
//! assertions rather than construction boilerplate. Prices are American
//! odds and panic if invalid.

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;

use crate::domain::{Event, EventBatch, EventId, MarketType, Odds, Quote, Side};

/// Fixed timestamp so repeated runs build identical quotes.
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 9, 8, 17, 0, 0)
        .single()
        .expect("valid timestamp")
}

/// An event between `home` and `away`.
pub fn event(id: &str, sport: &str, home: &str, away: &str) -> Event {
    Event::new(EventId::from(id), sport, home, away)
}

/// A quote at [`base_time`].
pub fn quote(
    event: &str,
    book: &str,
    market: MarketType,
    side: Side,
    line: Option<Decimal>,
    american: i32,
) -> Quote {
    quote_at(event, book, market, side, line, american, base_time())
}

/// A quote at an explicit time.
pub fn quote_at(
    event: &str,
    book: &str,
    market: MarketType,
    side: Side,
    line: Option<Decimal>,
    american: i32,
    at: DateTime<Utc>,
) -> Quote {
    Quote::for_market(
        book,
        EventId::from(event),
        market,
        side,
        line,
        Odds::from_american(american).expect("valid American odds"),
        at,
    )
}

/// A moneyline quote.
pub fn moneyline(event: &str, book: &str, side: Side, american: i32) -> Quote {
    quote(event, book, MarketType::Moneyline, side, None, american)
}

/// A spread quote.
pub fn spread(event: &str, book: &str, side: Side, line: Decimal, american: i32) -> Quote {
    quote(event, book, MarketType::Spread, side, Some(line), american)
}

/// A total quote.
pub fn total(event: &str, book: &str, side: Side, line: Decimal, american: i32) -> Quote {
    quote(event, book, MarketType::Total, side, Some(line), american)
}

/// A batch for one event.
pub fn batch(event: Event, quotes: Vec<Quote>) -> EventBatch {
    EventBatch::new(event, quotes)
}
