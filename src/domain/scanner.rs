//! Runs the whole pipeline over batches of event quotes.
//!
//! For every event: filter, group, price, detect, then build one
//! [`Opportunity`] per aggregated market tagged with the highest
//! classification any signal gave it.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, info, warn};

use super::aggregator::{aggregate_groups, dedupe, group_quotes};
use super::fair::FairPricer;
use super::id::{BookId, EventId};
use super::market::{Event, MarketKey, MarketType};
use super::opportunity::{Classification, Opportunity};
use super::pricing::BookWeights;
use super::quote::Quote;
use super::strategy::{DetectionContext, Signal, StrategyRegistry};

/// Inputs that shape a scan. Empty allow-lists allow everything.
#[derive(Debug, Clone, Default)]
pub struct ScanParams {
    pub weights: BookWeights,
    /// Margin assumed for one-sided markets; `None` leaves them unpriced.
    pub assumed_vig_percent: Option<f64>,
    pub sports: Vec<String>,
    pub markets: Vec<MarketType>,
    pub books: Vec<BookId>,
    /// Drop opportunities classified `none`.
    pub flagged_only: bool,
}

impl ScanParams {
    fn allows_sport(&self, sport: &str) -> bool {
        self.sports.is_empty() || self.sports.iter().any(|s| s.eq_ignore_ascii_case(sport))
    }

    fn allows_quote(&self, quote: &Quote) -> bool {
        (self.markets.is_empty() || self.markets.contains(&quote.key().market))
            && (self.books.is_empty() || self.books.contains(quote.book()))
    }
}

/// One event and the quotes fetched for it.
#[derive(Debug, Clone)]
pub struct EventBatch {
    pub event: Event,
    pub quotes: Vec<Quote>,
}

impl EventBatch {
    pub fn new(event: Event, quotes: Vec<Quote>) -> Self {
        Self { event, quotes }
    }
}

/// Result of scanning one event.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EventScan {
    pub opportunities: Vec<Opportunity>,
    pub signals: Vec<Signal>,
}

/// Result of scanning many batches.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScanReport {
    /// Deduplicated and ranked by EV, best first.
    pub opportunities: Vec<Opportunity>,
    /// Signals from the latest batch of each event.
    pub signals: Vec<Signal>,
    /// Distinct events that passed the sport filter.
    pub events_scanned: usize,
}

impl ScanReport {
    /// Number of opportunities with a non-`none` classification.
    #[must_use]
    pub fn flagged(&self) -> usize {
        self.opportunities
            .iter()
            .filter(|o| o.classification().is_flagged())
            .count()
    }
}

/// Pipeline driver.
pub struct Scanner {
    registry: StrategyRegistry,
    params: ScanParams,
}

impl Scanner {
    pub fn new(registry: StrategyRegistry, params: ScanParams) -> Self {
        Self { registry, params }
    }

    pub const fn params(&self) -> &ScanParams {
        &self.params
    }

    /// Scan one event's quotes.
    ///
    /// Markets that cannot be priced or built are logged and skipped.
    pub fn scan_event(&self, event: &Event, quotes: &[Quote]) -> EventScan {
        if !self.params.allows_sport(event.sport()) {
            debug!(event = %event.id(), sport = event.sport(), "Skipping filtered sport");
            return EventScan::default();
        }

        let quotes: Vec<Quote> = quotes
            .iter()
            .filter(|quote| self.params.allows_quote(quote))
            .cloned()
            .collect();
        let groups = group_quotes(event, &quotes);
        let pricer = FairPricer::new(&groups, &self.params.weights, self.params.assumed_vig_percent);
        let ctx = DetectionContext::new(event, &groups, &pricer);

        let signals = self.registry.detect_all(&ctx);
        let tags = classify(&signals);

        let mut opportunities = Vec::new();
        for market in aggregate_groups(&groups) {
            let fair = match pricer.fair_price(&market.key) {
                Ok(fair) => fair,
                Err(e) => {
                    warn!(market = %market.key, error = %e, "Skipping unpriceable market");
                    continue;
                }
            };
            let classification = tags.get(&market.key).copied().unwrap_or_default();
            if self.params.flagged_only && !classification.is_flagged() {
                continue;
            }

            let key = market.key.clone();
            match Opportunity::builder()
                .event(event.clone())
                .market(market)
                .fair(fair)
                .classification(classification)
                .build()
            {
                Ok(opportunity) => opportunities.push(opportunity),
                Err(e) => warn!(market = %key, error = %e, "Skipping invalid opportunity"),
            }
        }

        debug!(
            event = %event.id(),
            markets = groups.len(),
            opportunities = opportunities.len(),
            signals = signals.len(),
            "Event scanned"
        );

        EventScan {
            opportunities,
            signals,
        }
    }

    /// Scan batches in order.
    ///
    /// A later batch for the same event replaces the earlier one's signals and
    /// wins deduplication of its opportunities.
    pub fn scan(&self, batches: &[EventBatch]) -> ScanReport {
        let mut opportunities = Vec::new();
        let mut signals: Vec<(EventId, Vec<Signal>)> = Vec::new();
        let mut slots: HashMap<EventId, usize> = HashMap::new();

        for batch in batches {
            if !self.params.allows_sport(batch.event.sport()) {
                debug!(event = %batch.event.id(), sport = batch.event.sport(), "Skipping filtered sport");
                continue;
            }
            let scan = self.scan_event(&batch.event, &batch.quotes);
            opportunities.extend(scan.opportunities);

            let id = batch.event.id().clone();
            match slots.get(&id) {
                Some(&index) => signals[index].1 = scan.signals,
                None => {
                    slots.insert(id.clone(), signals.len());
                    signals.push((id, scan.signals));
                }
            }
        }

        let mut opportunities = dedupe(opportunities);
        opportunities.sort_by(rank);

        let report = ScanReport {
            opportunities,
            signals: signals.into_iter().flat_map(|(_, s)| s).collect(),
            events_scanned: slots.len(),
        };

        info!(
            events = report.events_scanned,
            opportunities = report.opportunities.len(),
            flagged = report.flagged(),
            signals = report.signals.len(),
            "Scan complete"
        );

        report
    }
}

/// Highest classification per market across all signals.
fn classify(signals: &[Signal]) -> HashMap<&MarketKey, Classification> {
    let mut tags: HashMap<&MarketKey, Classification> = HashMap::new();
    for signal in signals {
        let classification = signal.classification();
        for key in signal.keys() {
            let tag = tags.entry(key).or_default();
            *tag = (*tag).max(classification);
        }
    }
    tags
}

/// EV descending with unpriced markets last, then by market key.
fn rank(a: &Opportunity, b: &Opportunity) -> Ordering {
    let by_ev = match (a.ev_percent(), b.ev_percent()) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    by_ev.then_with(|| a.key().cmp(b.key()))
}
