//! Vigless - sportsbook odds normalization, vig removal and opportunity
//! detection.
//!
//! Quotes from several books are grouped by exact market (event, market
//! type, side and line), priced against a de-vigged multi-book consensus and
//! run through pluggable detection strategies.
//!
//! # Architecture
//!
//! - **`domain::pricing`** - The pure odds math
//!   - `devig` - Remove the margin from every side of a market
//!   - `ev` - Expected value and Kelly fraction against a fair probability
//!   - `consensus` - Weighted multi-book fair probability
//!
//! - **`domain::strategy`** - Pluggable detection strategies
//!   - `PositiveEvStrategy` - Best price beats the fair probability
//!   - `ArbitrageStrategy` - Cross-book prices imply less than 100%
//!   - `MiddleStrategy` - Different lines leave a both-win window
//!
//! - **`domain::scanner`** - Runs grouping, pricing and detection per event
//!
//! # Modules
//!
//! - [`config`] - Configuration loading from TOML files with strategy settings
//! - [`domain`] - Book-agnostic types: odds, quotes, markets, opportunities
//! - [`error`] - Error types for the crate
//! - [`cli`] - Command-line front end
//!
//! # Example
//!
//! ```no_run
//! use vigless::config::Config;
//! use vigless::domain::EventBatch;
//!
//! let config = Config::load("config.toml").unwrap();
//! let batches: Vec<EventBatch> = Vec::new();
//! let report = config.scanner().scan(&batches);
//! println!("{} opportunities", report.opportunities.len());
//! ```

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
