#![allow(dead_code)]

use std::io::Write;

use tempfile::NamedTempFile;

/// Write contents to a temp file that lives as long as the handle.
pub fn temp_file(suffix: &str, contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .prefix("vigless-test-")
        .suffix(suffix)
        .tempfile()
        .expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");
    file.flush().expect("flush temp file");
    file
}

/// Feed with one moneyline arbitrage (+180 / -170 across books).
pub const ARBITRAGE_FEED: &str = r#"{
  "events": [
    {
      "id": "nfl-kc-buf",
      "sport": "nfl",
      "home": "Chiefs",
      "away": "Bills",
      "quotes": [
        {"book": "alpha", "market": "moneyline", "side": "home", "odds": "+180"},
        {"book": "gamma", "market": "moneyline", "side": "home", "odds": "+150"},
        {"book": "beta",  "market": "moneyline", "side": "away", "odds": "-170"},
        {"book": "gamma", "market": "moneyline", "side": "away", "odds": "-190"}
      ]
    }
  ]
}"#;

/// Feed with a totals middle (Over 41.5 +120 / Under 44.5 -120).
pub const MIDDLE_FEED: &str = r#"{
  "events": [
    {
      "id": "nfl-gb-chi",
      "sport": "nfl",
      "home": "Packers",
      "away": "Bears",
      "quotes": [
        {"book": "alpha", "market": "total", "side": "over",  "line": 41.5, "odds": 120},
        {"book": "beta",  "market": "total", "side": "under", "line": 44.5, "odds": -120}
      ]
    }
  ]
}"#;
