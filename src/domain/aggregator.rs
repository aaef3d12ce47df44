//! Groups raw quotes into comparable markets.
//!
//! A batch of one event's quotes is split by exact [`MarketKey`]; within each
//! group only the latest quote per book survives. Groups quoted by at least
//! two books become [`AggregatedMarket`]s with a best price and a field.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use tracing::{debug, warn};

use super::id::BookId;
use super::market::{Event, Line, MarketKey, MarketType, Side};
use super::opportunity::Opportunity;
use super::quote::{BookPrice, Quote};

/// Minimum distinct books for a market to be aggregated.
pub const MIN_BOOKS: usize = 2;

/// Every live quote for one market, one per book, ordered by book name.
#[derive(Debug, Clone)]
pub struct MarketQuotes {
    key: MarketKey,
    quotes: Vec<Quote>,
}

impl MarketQuotes {
    #[must_use]
    pub const fn key(&self) -> &MarketKey {
        &self.key
    }

    #[must_use]
    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    #[must_use]
    pub fn book_count(&self) -> usize {
        self.quotes.len()
    }

    /// Book and price of every quote.
    #[must_use]
    pub fn prices(&self) -> Vec<BookPrice> {
        self.quotes.iter().map(Quote::price).collect()
    }

    /// Most favourable price for the bettor.
    ///
    /// Highest decimal odds; ties go to the alphabetically first book.
    #[must_use]
    pub fn best(&self) -> Option<&Quote> {
        // Quotes are sorted by book, so keeping the first maximum breaks ties.
        self.quotes.iter().fold(None, |best: Option<&Quote>, quote| match best {
            Some(current) if current.odds() >= quote.odds() => Some(current),
            _ => Some(quote),
        })
    }
}

/// A market with a best price and the comparison field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedMarket {
    pub key: MarketKey,
    pub my_price: BookPrice,
    pub field_prices: Vec<BookPrice>,
}

/// Group one event's quotes by market, keeping the latest quote per book.
///
/// Quotes for other events, sides that do not belong to the market type, or
/// a line on the wrong kind of market are skipped with a warning. Groups come
/// back ordered by [`MarketKey`].
pub fn group_quotes(event: &Event, quotes: &[Quote]) -> Vec<MarketQuotes> {
    let mut groups: BTreeMap<MarketKey, BTreeMap<BookId, Quote>> = BTreeMap::new();

    for quote in quotes {
        let key = quote.key();
        if &key.event_id != event.id() {
            warn!(
                event = %event.id(),
                quote_event = %key.event_id,
                book = %quote.book(),
                "Skipping quote for another event"
            );
            continue;
        }
        if !is_well_formed(key.market, key.side, key.line) {
            warn!(market = %key, book = %quote.book(), "Skipping malformed quote");
            continue;
        }

        let books = groups.entry(key.clone()).or_default();
        match books.get(quote.book()) {
            Some(existing) if !quote.supersedes(existing) => {}
            _ => {
                books.insert(quote.book().clone(), quote.clone());
            }
        }
    }

    groups
        .into_iter()
        .map(|(key, books)| MarketQuotes {
            key,
            quotes: books.into_values().collect(),
        })
        .collect()
}

fn is_well_formed(market: MarketType, side: Side, line: Option<Line>) -> bool {
    side.valid_for(market) && market.has_line() == line.is_some()
}

/// Aggregate grouped markets quoted by at least [`MIN_BOOKS`] books.
pub fn aggregate_groups(groups: &[MarketQuotes]) -> Vec<AggregatedMarket> {
    groups
        .iter()
        .filter_map(|group| {
            if group.book_count() < MIN_BOOKS {
                debug!(market = %group.key(), books = group.book_count(), "Dropping thinly quoted market");
                return None;
            }
            let best = group.best()?;
            let field_prices = group
                .quotes()
                .iter()
                .filter(|quote| quote.book() != best.book())
                .map(Quote::price)
                .collect();

            Some(AggregatedMarket {
                key: group.key().clone(),
                my_price: best.price(),
                field_prices,
            })
        })
        .collect()
}

/// Group and aggregate one event's quotes.
pub fn aggregate(event: &Event, quotes: &[Quote]) -> Vec<AggregatedMarket> {
    aggregate_groups(&group_quotes(event, quotes))
}

/// Identity used to collapse repeated opportunities across fetches.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DedupeKey {
    pub home: String,
    pub away: String,
    pub market: MarketType,
    pub side: Side,
    pub line: Option<Line>,
}

impl DedupeKey {
    #[must_use]
    pub fn of(opportunity: &Opportunity) -> Self {
        let key = opportunity.key();
        Self {
            home: opportunity.event().home().to_string(),
            away: opportunity.event().away().to_string(),
            market: key.market,
            side: key.side,
            line: key.line,
        }
    }
}

/// Collapse duplicates, last write wins.
///
/// The surviving opportunity is the one that appears last in the input; it
/// takes the position of the first occurrence. Idempotent.
pub fn dedupe(opportunities: Vec<Opportunity>) -> Vec<Opportunity> {
    let mut slots: HashMap<DedupeKey, usize> = HashMap::new();
    let mut result: Vec<Opportunity> = Vec::with_capacity(opportunities.len());

    for opportunity in opportunities {
        let key = DedupeKey::of(&opportunity);
        if let Some(&index) = slots.get(&key) {
            result[index] = opportunity;
        } else {
            slots.insert(key, result.len());
            result.push(opportunity);
        }
    }

    result
}
