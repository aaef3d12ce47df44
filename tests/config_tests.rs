//! Configuration loading from files.

mod support;

use rust_decimal_macros::dec;
use vigless::config::Config;
use vigless::error::{ConfigError, Error};
use vigless::testkit::config::FULL_CONFIG;

use support::temp_file;

#[test]
fn loads_full_config() {
    let file = temp_file(".toml", FULL_CONFIG);
    let config = Config::load(file.path()).expect("valid config");

    assert_eq!(config.logging.level, "warn");
    assert_eq!(config.scan.assumed_vig_percent, Some(4.5));
    assert_eq!(config.scan.sports, vec!["nfl", "nba"]);
    assert_eq!(config.scan.weights.len(), 2);
    assert_eq!(config.strategies.positive_ev.max_ev_percent, Some(20.0));
    assert_eq!(config.strategies.arbitrage.total_stake, dec!(1000));
    assert_eq!(config.strategies.middle.stake_per_side, dec!(110));
    assert_eq!(config.strategies.build_registry().len(), 3);
}

#[test]
fn config_scanner_uses_configured_filters() {
    let file = temp_file(".toml", "[scan]\nsports = [\"mlb\"]\n");
    let config = Config::load(file.path()).expect("valid config");
    let params = config.scanner().params().clone();
    assert_eq!(params.sports, vec!["mlb"]);
    assert!(!params.flagged_only);
}

#[test]
fn rejects_unknown_section() {
    let file = temp_file(".toml", "[exchange]\nname = \"x\"\n");
    let err = Config::load(file.path()).unwrap_err();
    assert!(matches!(err, Error::Config(ConfigError::Parse(_))));
}

#[test]
fn rejects_unknown_strategy() {
    let file = temp_file(".toml", "[strategies]\nenabled = [\"teaser\"]\n");
    let err = Config::load(file.path()).unwrap_err();
    assert!(
        err.to_string().contains("strategies.enabled"),
        "unexpected error: {err}"
    );
}

#[test]
fn rejects_non_positive_stake() {
    let file = temp_file(".toml", "[strategies.arbitrage]\ntotal_stake = 0\n");
    let err = Config::load(file.path()).unwrap_err();
    assert!(matches!(
        err,
        Error::Config(ConfigError::InvalidValue {
            field: "strategies.arbitrage.total_stake",
            ..
        })
    ));
}

#[test]
fn missing_file_is_read_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = Config::load(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, Error::Config(ConfigError::ReadFile(_))));
}
