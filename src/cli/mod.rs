//! Command-line interface definitions.

pub mod calc;
pub mod config;
pub mod diagnostic;
pub mod input;
pub mod output;
pub mod scan;

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::domain::{BookId, MarketType, Odds};
use crate::error::{ConfigError, Error, Result};
use diagnostic::ConfigDiagnostic;

/// Vigless - sportsbook odds normalization and opportunity scanning.
#[derive(Parser, Debug)]
#[command(name = "vigless")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (defaults apply when omitted)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Emit JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan a quote feed for +EV, arbitrage and middles
    Scan(ScanArgs),

    /// Convert a price between American, decimal and implied probability
    Convert(ConvertArgs),

    /// Remove the vig from every side of a market
    Devig(DevigArgs),

    /// Expected value of a price given a fair probability
    Ev(EvArgs),

    /// Configuration commands
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Subcommands for `vigless config`
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Validate configuration file
    Validate(ConfigPathArg),
}

/// Shared argument for commands that only need a config path.
#[derive(Args, Debug)]
pub struct ConfigPathArg {
    /// Path to configuration file (falls back to --config, then config.toml)
    pub path: Option<PathBuf>,
}

/// Arguments for the `scan` subcommand.
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Quote feed JSON file, or `-` for stdin
    pub feed: PathBuf,

    /// Only show classified opportunities
    #[arg(long)]
    pub flagged_only: bool,

    /// Restrict to a sport (repeatable)
    #[arg(long = "sport")]
    pub sports: Vec<String>,

    /// Restrict to a market type (repeatable)
    #[arg(long = "market", value_parser = parse_market)]
    pub markets: Vec<MarketType>,

    /// Restrict to a book (repeatable)
    #[arg(long = "book")]
    pub books: Vec<String>,

    /// Override minimum EV percent for the +EV strategy
    #[arg(long, allow_negative_numbers = true)]
    pub min_ev: Option<f64>,
}

impl ScanArgs {
    pub fn book_ids(&self) -> Vec<BookId> {
        self.books.iter().map(|b| BookId::new(b.as_str())).collect()
    }
}

/// Arguments for the `convert` subcommand.
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Price: +150, -110, 2.5 or even
    #[arg(allow_negative_numbers = true)]
    pub odds: Odds,
}

/// Arguments for the `devig` subcommand.
#[derive(Args, Debug)]
pub struct DevigArgs {
    /// One price per side of the market
    #[arg(required = true, num_args = 2.., allow_negative_numbers = true)]
    pub odds: Vec<Odds>,
}

/// Arguments for the `ev` subcommand.
#[derive(Args, Debug)]
pub struct EvArgs {
    /// Offered price
    #[arg(allow_negative_numbers = true)]
    pub odds: Odds,

    /// Fair win probability, e.g. 0.55
    #[arg(long)]
    pub fair: f64,

    /// Stake for the absolute EV
    #[arg(long, default_value_t = crate::domain::pricing::DEFAULT_STAKE)]
    pub stake: f64,
}

fn parse_market(raw: &str) -> std::result::Result<MarketType, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "moneyline" | "ml" => Ok(MarketType::Moneyline),
        "spread" => Ok(MarketType::Spread),
        "total" => Ok(MarketType::Total),
        other => Err(format!("unknown market type \"{other}\"")),
    }
}

impl Cli {
    /// Config file to load before running the command.
    ///
    /// `config validate` always names a file; other commands fall back to
    /// built-in defaults when `--config` is absent.
    #[must_use]
    pub fn config_path(&self) -> Option<PathBuf> {
        match &self.command {
            Commands::Config(ConfigCommand::Validate(arg)) => Some(
                arg.path
                    .clone()
                    .or_else(|| self.config.clone())
                    .unwrap_or_else(|| PathBuf::from("config.toml")),
            ),
            _ => self.config.clone(),
        }
    }
}

/// Load configuration from a path, or defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path),
        None => Ok(Config::default()),
    }
}

/// Run a parsed command against loaded configuration.
pub fn execute(cli: Cli, config: Config) -> Result<()> {
    let json = cli.json;
    let config_path = cli.config_path();
    match cli.command {
        Commands::Scan(args) => scan::execute(&args, config, json),
        Commands::Convert(args) => calc::convert(args.odds, json),
        Commands::Devig(args) => calc::devig(&args.odds, json),
        Commands::Ev(args) => calc::ev(args.odds, args.fair, args.stake, json),
        Commands::Config(ConfigCommand::Validate(_)) => {
            config::validate(config_path.as_deref(), &config, json)
        }
    }
}

/// Print an error, with source context when it has a location.
pub fn report_error(err: &Error, config_path: Option<&Path>) {
    if let (Error::Config(ConfigError::Parse(parse)), Some(path)) = (err, config_path) {
        if let Ok(src) = std::fs::read_to_string(path) {
            if let Some(diagnostic) = ConfigDiagnostic::from_toml(parse, &src) {
                eprintln!("{:?}", miette::Report::new(diagnostic));
                return;
            }
        }
    }
    output::error(&err.to_string());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_negative_odds_positionally() {
        let cli = Cli::try_parse_from(["vigless", "devig", "-110", "+100"]).unwrap();
        let Commands::Devig(args) = cli.command else {
            panic!("expected devig");
        };
        assert_eq!(args.odds[0].american(), -110);
        assert_eq!(args.odds[1].american(), 100);
    }

    #[test]
    fn devig_needs_two_prices() {
        assert!(Cli::try_parse_from(["vigless", "devig", "-110"]).is_err());
    }

    #[test]
    fn validate_defaults_to_config_toml() {
        let cli = Cli::try_parse_from(["vigless", "config", "validate"]).unwrap();
        assert_eq!(cli.config_path(), Some(PathBuf::from("config.toml")));

        let cli = Cli::try_parse_from(["vigless", "convert", "+150"]).unwrap();
        assert_eq!(cli.config_path(), None);
    }

    #[test]
    fn market_filter_parses() {
        let cli =
            Cli::try_parse_from(["vigless", "scan", "feed.json", "--market", "ml", "--market", "total"])
                .unwrap();
        let Commands::Scan(args) = cli.command else {
            panic!("expected scan");
        };
        assert_eq!(args.markets, vec![MarketType::Moneyline, MarketType::Total]);
    }
}
