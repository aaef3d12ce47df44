//! Handlers for the odds calculator commands: `convert`, `devig` and `ev`.

use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::cli::output;
use crate::domain::pricing::{calculate_ev, devig_odds, kelly_fraction};
use crate::domain::{probability_to_american, Odds};
use crate::error::Result;

#[derive(Serialize)]
struct Conversion {
    american: i32,
    decimal: f64,
    implied_probability: f64,
}

/// Execute `convert`.
pub fn convert(odds: Odds, json: bool) -> Result<()> {
    let conversion = Conversion {
        american: odds.american(),
        decimal: odds.decimal(),
        implied_probability: odds.implied_probability(),
    };
    if json {
        return output::json(&conversion);
    }

    output::section("Price");
    output::field("American", odds);
    output::field("Decimal", format!("{:.4}", conversion.decimal));
    output::field(
        "Implied",
        format!("{:.2}%", conversion.implied_probability * 100.0),
    );
    Ok(())
}

#[derive(Serialize)]
struct DevigSide {
    odds: i32,
    implied_probability: f64,
    fair_probability: f64,
    fair_american: f64,
}

#[derive(Serialize)]
struct DevigOutput {
    sides: Vec<DevigSide>,
    vig_percent: f64,
}

#[derive(Tabled)]
struct DevigRow {
    #[tabled(rename = "Side")]
    side: usize,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Implied")]
    implied: String,
    #[tabled(rename = "Fair")]
    fair: String,
    #[tabled(rename = "Fair Odds")]
    fair_odds: String,
}

/// Execute `devig`.
pub fn devig(odds: &[Odds], json: bool) -> Result<()> {
    let devig = devig_odds(odds)?;
    let fair_american = devig.fair_american()?;

    let sides = odds
        .iter()
        .zip(&devig.fair_probabilities)
        .map(|(price, fair)| {
            Ok(DevigSide {
                odds: price.american(),
                implied_probability: price.implied_probability(),
                fair_probability: *fair,
                fair_american: probability_to_american(*fair)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    if json {
        return output::json(&DevigOutput {
            sides,
            vig_percent: devig.vig_percent,
        });
    }

    let rows: Vec<DevigRow> = sides
        .iter()
        .zip(fair_american)
        .enumerate()
        .map(|(i, (side, fair_odds))| DevigRow {
            side: i + 1,
            price: signed_american(side.odds),
            implied: format!("{:.2}%", side.implied_probability * 100.0),
            fair: format!("{:.2}%", side.fair_probability * 100.0),
            fair_odds: signed_american(fair_odds),
        })
        .collect();

    output::section("De-vigged market");
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    output::table(&table.to_string());
    output::field("Vig", format!("{:.2}%", devig.vig_percent));
    if devig.vig_percent < 0.0 {
        output::warning("Implied probabilities sum below 100%; prices may be stale.");
    }
    Ok(())
}

#[derive(Serialize)]
struct EvOutput {
    odds: i32,
    fair_probability: f64,
    stake: f64,
    ev_percent: f64,
    expected_profit: f64,
    kelly_fraction: f64,
}

/// Execute `ev`.
pub fn ev(odds: Odds, fair_probability: f64, stake: f64, json: bool) -> Result<()> {
    let ev_percent = calculate_ev(odds.american(), fair_probability, stake)?;
    let kelly = kelly_fraction(odds, fair_probability)?;
    let result = EvOutput {
        odds: odds.american(),
        fair_probability,
        stake,
        ev_percent,
        expected_profit: stake * ev_percent / 100.0,
        kelly_fraction: kelly,
    };
    if json {
        return output::json(&result);
    }

    output::section("Expected value");
    output::field("Price", odds);
    output::field("Fair", format!("{:.2}%", fair_probability * 100.0));
    output::field(
        "EV",
        output::signed(ev_percent, format!("{ev_percent:+.2}%")),
    );
    output::field(
        "Expected",
        output::signed(result.expected_profit, format!("{:+.2} on {stake}", result.expected_profit)),
    );
    output::field("Kelly", format!("{:.2}%", kelly * 100.0));
    Ok(())
}

fn signed_american(odds: i32) -> String {
    if odds > 0 {
        format!("+{odds}")
    } else {
        odds.to_string()
    }
}
