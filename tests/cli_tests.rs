//! CLI integration tests.

mod support;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;

use support::{temp_file, ARBITRAGE_FEED, MIDDLE_FEED};

fn vigless() -> Command {
    cargo_bin_cmd!("vigless")
}

#[test]
fn test_help() {
    vigless()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("scan"))
        .stdout(predicate::str::contains("devig"))
        .stdout(predicate::str::contains("convert"));
}

#[test]
fn test_version() {
    vigless()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("vigless"));
}

#[test]
fn convert_american_price() {
    vigless()
        .args(["convert", "+150"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2.5000"))
        .stdout(predicate::str::contains("40.00%"));
}

#[test]
fn convert_json() {
    vigless()
        .args(["convert", "-200", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"american\": -200"))
        .stdout(predicate::str::contains("\"decimal\": 1.5"));
}

#[test]
fn devig_standard_market() {
    vigless()
        .args(["devig", "-110", "-110"])
        .assert()
        .success()
        .stdout(predicate::str::contains("50.00%"))
        .stdout(predicate::str::contains("4.76%"));
}

#[test]
fn devig_rejects_single_price() {
    vigless().args(["devig", "-110"]).assert().failure();
}

#[test]
fn ev_of_favourite() {
    vigless()
        .args(["ev", "-110", "--fair", "0.55"])
        .assert()
        .success()
        .stdout(predicate::str::contains("+5.00%"));
}

#[test]
fn ev_rejects_bad_probability() {
    vigless()
        .args(["ev", "+120", "--fair", "1.5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("probability"));
}

#[test]
fn scan_reports_arbitrage_as_json() {
    let feed = temp_file(".json", ARBITRAGE_FEED);
    vigless()
        .arg("scan")
        .arg(feed.path())
        .arg("--json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"kind\": \"arbitrage\""))
        .stdout(predicate::str::contains("\"classification\": \"arbitrage\""))
        .stdout(predicate::str::contains("\"guaranteed_profit\": \"1.34\""));
}

#[test]
fn scan_reports_middle_table() {
    let feed = temp_file(".json", MIDDLE_FEED);
    vigless()
        .arg("scan")
        .arg(feed.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Middles"))
        .stdout(predicate::str::contains("42..=44"));
}

#[test]
fn scan_reads_stdin() {
    vigless()
        .args(["scan", "-", "--json"])
        .write_stdin(MIDDLE_FEED)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"kind\": \"middle\""));
}

#[test]
fn scan_sport_filter_drops_everything() {
    let feed = temp_file(".json", ARBITRAGE_FEED);
    vigless()
        .arg("scan")
        .arg(feed.path())
        .args(["--sport", "nhl", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"opportunities\": []"))
        .stdout(predicate::str::contains("\"events_scanned\": 0"));
}

#[test]
fn scan_survives_a_bad_quote() {
    let feed = temp_file(
        ".json",
        r#"{"events": [{"id": "nfl-kc-buf", "sport": "nfl", "home": "Chiefs", "away": "Bills",
            "quotes": [
                {"book": "alpha", "market": "moneyline", "side": "home", "odds": "+180"},
                {"book": "beta",  "market": "moneyline", "side": "away", "odds": "-170"},
                {"book": "gamma", "market": "moneyline", "side": "away", "odds": 0}
            ]}]}"#,
    );
    vigless()
        .arg("scan")
        .arg(feed.path())
        .arg("--json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"kind\": \"arbitrage\""))
        .stdout(predicate::str::contains("\"guaranteed_profit\": \"1.34\""));
}

#[test]
fn scan_rejects_malformed_feed() {
    let feed = temp_file(".json", "{\"events\": [");
    vigless()
        .arg("scan")
        .arg(feed.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("JSON"));
}

#[test]
fn config_validate_accepts_valid_file() {
    let config = temp_file(".toml", "[logging]\nlevel = \"warn\"\n");
    vigless()
        .args(["config", "validate"])
        .arg(config.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration valid"));
}

#[test]
fn config_validate_points_at_syntax_error() {
    let config = temp_file(".toml", "[logging]\nlevel = \n");
    vigless()
        .args(["config", "validate"])
        .arg(config.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid configuration"));
}

#[test]
fn config_validate_reports_invalid_value() {
    let config = temp_file(".toml", "[scan]\nassumed_vig_percent = -3.0\n");
    vigless()
        .args(["config", "validate"])
        .arg(config.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("scan.assumed_vig_percent"));
}
