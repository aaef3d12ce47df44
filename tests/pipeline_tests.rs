//! End-to-end pipeline tests: quotes in, classified opportunities out.

use rust_decimal_macros::dec;
use vigless::domain::pricing::{
    calculate_ev, devig_two_way, weighted_fair_probability, BookWeights,
};
use vigless::domain::strategy::{Signal, StrategyRegistry};
use vigless::domain::{
    BookPrice, Classification, FairSource, MarketType, Odds, OddsError, QuoteCache, ScanParams,
    Scanner, Side,
};
use vigless::testkit::config::registry_with;
use vigless::testkit::domain::{base_time, batch, event, moneyline, quote_at, total};

fn scanner() -> Scanner {
    Scanner::new(StrategyRegistry::with_defaults(), ScanParams::default())
}

#[test]
fn devig_reference_market() {
    let result = devig_two_way(130, -150).unwrap();

    assert!((result.fair_prob_a - 0.4202).abs() < 1e-3);
    assert!((result.fair_prob_b - 0.5798).abs() < 1e-3);
    assert!((result.fair_prob_a + result.fair_prob_b - 1.0).abs() < 1e-12);
    assert_eq!(result.fair_odds_a, 138);
    assert_eq!(result.fair_odds_b, -138);
    assert!((result.vig_percent - 3.48).abs() < 0.01);
}

#[test]
fn ev_reference_values() {
    assert!((calculate_ev(110, 0.55, 100.0).unwrap() - 15.5).abs() < 1e-9);
    assert!((calculate_ev(-110, 0.45, 100.0).unwrap() + 14.09).abs() < 0.01);
}

#[test]
fn weighted_consensus_favours_trusted_book() {
    let prices = vec![
        BookPrice::new("sharp", Odds::from_probability(0.5).unwrap()),
        BookPrice::new("soft", Odds::from_probability(0.6).unwrap()),
    ];
    let weights = BookWeights::new().with("sharp", 3.0);
    let p = weighted_fair_probability(&prices, &weights).unwrap();
    assert!((p - 0.525).abs() < 1e-9);

    let zero = BookWeights::new().with("sharp", 0.0).with("soft", 0.0);
    assert_eq!(
        weighted_fair_probability(&prices, &zero),
        Err(OddsError::NoValidWeight { count: 2 })
    );
}

#[test]
fn cross_book_arbitrage_is_classified() {
    let quotes = vec![
        moneyline("e1", "alpha", Side::Home, 180),
        moneyline("e1", "gamma", Side::Home, 150),
        moneyline("e1", "beta", Side::Away, -170),
        moneyline("e1", "gamma", Side::Away, -190),
    ];
    let scan = scanner().scan_event(&event("e1", "nfl", "Chiefs", "Bills"), &quotes);

    let arbitrage: Vec<_> = scan
        .signals
        .iter()
        .filter_map(|s| match s {
            Signal::Arbitrage(a) => Some(a),
            _ => None,
        })
        .collect();
    assert_eq!(arbitrage.len(), 1);
    assert!(arbitrage[0].guaranteed_profit >= dec!(0));
    assert_eq!(arbitrage[0].guaranteed_profit, dec!(1.34));

    assert_eq!(scan.opportunities.len(), 2);
    assert!(scan
        .opportunities
        .iter()
        .all(|o| o.classification() == Classification::Arbitrage));
}

#[test]
fn totals_middle_window() {
    let quotes = vec![
        total("e2", "alpha", Side::Over, dec!(41.5), 120),
        total("e2", "gamma", Side::Over, dec!(41.5), 110),
        total("e2", "beta", Side::Under, dec!(44.5), -120),
        total("e2", "gamma", Side::Under, dec!(44.5), -125),
    ];
    let scan = scanner().scan_event(&event("e2", "nfl", "Packers", "Bears"), &quotes);

    let middle = scan
        .signals
        .iter()
        .find_map(|s| match s {
            Signal::Middle(m) => Some(m),
            _ => None,
        })
        .expect("middle signal");
    assert_eq!(middle.window, (42, 44));
    assert_eq!(middle.worst_case, dec!(-16.67));
    assert_eq!(middle.both_win_profit, dec!(203.33));

    assert_eq!(scan.opportunities.len(), 2);
    assert!(scan
        .opportunities
        .iter()
        .all(|o| o.classification() == Classification::Middling));
}

#[test]
fn boundaries_are_not_opportunities() {
    // Even money everywhere: EV exactly 0 and combined implied exactly 1.
    let quotes = vec![
        moneyline("e3", "alpha", Side::Home, 100),
        moneyline("e3", "beta", Side::Home, 100),
        moneyline("e3", "alpha", Side::Away, 100),
        moneyline("e3", "beta", Side::Away, 100),
        // Same line on both sides: zero-width window.
        total("e3", "alpha", Side::Over, dec!(44.5), -110),
        total("e3", "beta", Side::Under, dec!(44.5), -110),
    ];
    let scan = scanner().scan_event(&event("e3", "nba", "Lakers", "Celtics"), &quotes);

    assert!(scan.signals.is_empty(), "unexpected signals {:?}", scan.signals);
    assert_eq!(scan.opportunities.len(), 2);
    for opportunity in &scan.opportunities {
        assert_eq!(opportunity.classification(), Classification::None);
        assert_eq!(opportunity.ev_percent(), Some(0.0));
    }
}

#[test]
fn one_sided_market_has_no_fair_price() {
    let quotes = vec![
        total("e4", "alpha", Side::Over, dec!(47.5), 150),
        total("e4", "beta", Side::Over, dec!(47.5), -110),
    ];
    let scan = scanner().scan_event(&event("e4", "nfl", "Jets", "Dolphins"), &quotes);

    assert_eq!(scan.opportunities.len(), 1);
    let opportunity = &scan.opportunities[0];
    assert!(opportunity.fair().is_none());
    assert!(opportunity.ev_percent().is_none());
    assert_eq!(opportunity.classification(), Classification::None);
}

#[test]
fn assumed_vig_prices_one_sided_market() {
    let quotes = vec![
        total("e4", "alpha", Side::Over, dec!(47.5), 150),
        total("e4", "beta", Side::Over, dec!(47.5), -110),
    ];
    let params = ScanParams {
        assumed_vig_percent: Some(4.5),
        ..ScanParams::default()
    };
    let scan = Scanner::new(registry_with("positive_ev"), params)
        .scan_event(&event("e4", "nfl", "Jets", "Dolphins"), &quotes);

    let fair = scan.opportunities[0].fair().expect("estimated fair price");
    assert_eq!(fair.source, FairSource::Estimated);
    assert_eq!(fair.vig_percent, 4.5);
    assert!(scan.opportunities[0].ev_percent().is_some());
}

#[test]
fn repeated_scans_are_idempotent() {
    let quotes = vec![
        moneyline("e1", "alpha", Side::Home, 180),
        moneyline("e1", "gamma", Side::Home, 150),
        moneyline("e1", "beta", Side::Away, -170),
        moneyline("e1", "gamma", Side::Away, -190),
    ];
    let b = batch(event("e1", "nfl", "Chiefs", "Bills"), quotes);
    let scanner = scanner();

    let once = scanner.scan(std::slice::from_ref(&b));
    let twice = scanner.scan(&[b.clone(), b]);
    assert_eq!(once, twice);
    assert_eq!(once.events_scanned, 1);
}

#[test]
fn later_batch_replaces_earlier_opportunity() {
    let ev = event("e5", "nba", "Knicks", "Heat");
    let first = batch(
        ev.clone(),
        vec![
            moneyline("e5", "alpha", Side::Home, -110),
            moneyline("e5", "beta", Side::Home, -115),
        ],
    );
    let second = batch(
        ev,
        vec![
            moneyline("e5", "alpha", Side::Home, -130),
            moneyline("e5", "beta", Side::Home, -105),
        ],
    );

    let report = scanner().scan(&[first, second]);
    assert_eq!(report.opportunities.len(), 1);
    assert_eq!(report.opportunities[0].my_price().book.as_str(), "beta");
}

#[test]
fn cache_keeps_newest_quote_per_book() {
    let cache = QuoteCache::new();
    let later = base_time() + chrono::Duration::seconds(30);

    let fresh = quote_at("e6", "alpha", MarketType::Moneyline, Side::Home, None, -120, later);
    assert!(cache.upsert(fresh));
    assert!(!cache.upsert(moneyline("e6", "alpha", Side::Home, 200)));
    assert!(cache.upsert(moneyline("e6", "beta", Side::Home, -115)));

    let snapshot = cache.snapshot(&"e6".into());
    assert_eq!(snapshot.len(), 2);
    assert!(snapshot.iter().all(|q| q.odds().american() != 200));
}
