//! Handler for the `scan` command.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::cli::{input, output, ScanArgs};
use crate::config::Config;
use crate::domain::strategy::{ArbitrageSignal, MiddleSignal, PositiveEvSignal, Signal};
use crate::domain::{MarketKey, MarketType, Opportunity, ScanReport};
use crate::error::Result;

#[derive(Tabled)]
struct OpportunityRow {
    #[tabled(rename = "Event")]
    event: String,
    #[tabled(rename = "Market")]
    market: String,
    #[tabled(rename = "Best")]
    best: String,
    #[tabled(rename = "Books")]
    books: usize,
    #[tabled(rename = "Fair")]
    fair: String,
    #[tabled(rename = "EV")]
    ev: String,
    #[tabled(rename = "Vig")]
    vig: String,
    #[tabled(rename = "Class")]
    class: String,
}

impl From<&Opportunity> for OpportunityRow {
    fn from(opportunity: &Opportunity) -> Self {
        let price = opportunity.my_price();
        Self {
            event: opportunity.event().to_string(),
            market: market_label(opportunity.key()),
            best: format!("{} {}", price.odds, price.book),
            books: opportunity.field_prices().len() + 1,
            fair: percent(opportunity.fair_probability().map(|p| p * 100.0)),
            ev: percent(opportunity.ev_percent()),
            vig: percent(opportunity.vig_percent()),
            class: opportunity.classification().to_string(),
        }
    }
}

/// Execute `scan`.
pub fn execute(args: &ScanArgs, mut config: Config, json: bool) -> Result<()> {
    apply_overrides(args, &mut config);

    let content = input::read_source(&args.feed)?;
    let batches = input::parse_feed(&content)?;
    let report = config.scanner().scan(&batches);

    if json {
        return output::json(&report);
    }
    render(&report);
    Ok(())
}

fn apply_overrides(args: &ScanArgs, config: &mut Config) {
    let scan = &mut config.scan;
    scan.flagged_only |= args.flagged_only;
    if !args.sports.is_empty() {
        scan.sports.clone_from(&args.sports);
    }
    if !args.markets.is_empty() {
        scan.markets.clone_from(&args.markets);
    }
    if !args.books.is_empty() {
        scan.books = args.book_ids();
    }
    if let Some(min_ev) = args.min_ev {
        config.strategies.positive_ev.min_ev_percent = min_ev;
    }
}

fn render(report: &ScanReport) {
    output::section("Opportunities");
    if report.opportunities.is_empty() {
        output::note("No markets quoted by two or more books.");
    } else {
        let rows: Vec<OpportunityRow> = report.opportunities.iter().map(Into::into).collect();
        let mut table = Table::new(rows);
        table.with(Style::rounded());
        output::table(&table.to_string());
    }

    let mut positive_ev = Vec::new();
    let mut arbitrage = Vec::new();
    let mut middles = Vec::new();
    for signal in &report.signals {
        match signal {
            Signal::PositiveEv(s) => positive_ev.push(s),
            Signal::Arbitrage(s) => arbitrage.push(s),
            Signal::Middle(s) => middles.push(s),
        }
    }

    if !positive_ev.is_empty() {
        output::section("Positive EV");
        positive_ev.iter().for_each(|s| render_positive_ev(s));
    }
    if !arbitrage.is_empty() {
        output::section("Arbitrage");
        arbitrage.iter().for_each(|s| render_arbitrage(s));
    }
    if !middles.is_empty() {
        output::section("Middles");
        middles.iter().for_each(|s| render_middle(s));
    }

    output::section("Summary");
    output::field("Events", report.events_scanned);
    output::field("Markets", report.opportunities.len());
    output::field("Flagged", report.flagged());
    output::field("Signals", report.signals.len());
}

fn render_positive_ev(signal: &PositiveEvSignal) {
    output::success(&format!(
        "{} {} at {}: {} EV (fair {:.2}%)",
        signal.key.event_id,
        market_label(&signal.key),
        signal.book,
        output::signed(signal.ev_percent, format!("{:+.2}%", signal.ev_percent)),
        signal.fair.probability * 100.0,
    ));
}

fn render_arbitrage(signal: &ArbitrageSignal) {
    output::success(&format!(
        "{}: guaranteed {} on {} staked ({})",
        signal
            .legs
            .first()
            .map_or_else(String::new, |leg| leg.key.event_id.to_string()),
        output::highlight(format!("${}", signal.guaranteed_profit)),
        signal.total_stake,
        output::signed(signal.profit_percent, format!("{:+.2}%", signal.profit_percent)),
    ));
    for leg in &signal.legs {
        output::note(&format!(
            "  {} {} at {}: stake ${}, returns ${}",
            market_label(&leg.key),
            leg.odds,
            leg.book,
            leg.stake,
            leg.payout
        ));
    }
}

fn render_middle(signal: &MiddleSignal) {
    let (low, high) = signal.window;
    let unit = match signal.market {
        MarketType::Spread => "home margin",
        _ => "total",
    };
    output::success(&format!(
        "{}: {} {}..={} both win {}",
        signal.first.key.event_id,
        unit,
        low,
        high,
        output::highlight(format!("${}", signal.both_win_profit)),
    ));
    output::note(&format!(
        "  {} {} at {} / {} {} at {}; worst case ${} on ${} per side",
        market_label(&signal.first.key),
        signal.first.odds,
        signal.first.book,
        market_label(&signal.second.key),
        signal.second.odds,
        signal.second.book,
        signal.worst_case,
        signal.stake_per_side,
    ));
}

/// Market key without the event id.
fn market_label(key: &MarketKey) -> String {
    let full = key.to_string();
    full.strip_prefix(&format!("{} ", key.event_id))
        .map_or(full.clone(), str::to_string)
}

fn percent(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.2}%"))
}
