//! Handler for the `config` command group.

use std::path::Path;

use serde_json::json;

use crate::cli::output;
use crate::config::Config;
use crate::error::Result;

/// Execute `config validate`.
///
/// Loading already validated the file; this reports what it resolved to.
pub fn validate(path: Option<&Path>, config: &Config, json: bool) -> Result<()> {
    let path = path.map_or_else(|| "(defaults)".to_string(), |p| p.display().to_string());

    if json {
        return output::json(&json!({
            "valid": true,
            "path": path,
            "strategies": config.strategies.enabled,
            "weighted_books": config.scan.weights.len(),
            "assumed_vig_percent": config.scan.assumed_vig_percent,
        }));
    }

    output::section("Configuration");
    output::success("Configuration valid");
    output::field("Path", &path);
    output::field(
        "Logging",
        format!("{} ({})", config.logging.level, config.logging.format),
    );
    output::field(
        "Strategies",
        if config.strategies.enabled.is_empty() {
            "(none enabled)".to_string()
        } else {
            config.strategies.enabled.join(", ")
        },
    );
    output::field("Weighted books", config.scan.weights.len());
    output::field(
        "Assumed vig",
        config
            .scan
            .assumed_vig_percent
            .map_or_else(|| "off".to_string(), |v| format!("{v}%")),
    );
    if config.scan.flagged_only {
        output::note("Only classified opportunities are reported.");
    }
    Ok(())
}
