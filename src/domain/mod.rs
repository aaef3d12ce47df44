//! Bookmaker-agnostic domain logic.

mod error;
mod id;
mod market;
mod money;
mod odds;
mod opportunity;
mod quote;

pub mod aggregator;
pub mod cache;
pub mod fair;
pub mod pricing;
pub mod scanner;
pub mod strategy;

// Core domain types
pub use error::OddsError;
pub use id::{BookId, EventId};
pub use market::{Event, Line, MarketKey, MarketType, Side};
pub use money::{to_f64, to_money, Money};
pub use odds::{
    american_to_decimal, american_to_implied_probability, decimal_to_american,
    decimal_to_implied_probability, probability_to_american, probability_to_american_rounded,
    probability_to_decimal, Odds, RawOdds,
};
pub use opportunity::{Classification, Opportunity, OpportunityBuildError, OpportunityBuilder};
pub use quote::{BookPrice, Quote};

// Pipeline
pub use aggregator::{aggregate, dedupe, group_quotes, AggregatedMarket, MarketQuotes};
pub use cache::QuoteCache;
pub use fair::{FairPrice, FairPricer, FairSource};
pub use scanner::{EventBatch, EventScan, ScanParams, ScanReport, Scanner};
