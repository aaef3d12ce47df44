//! Context types for strategy detection.
//!
//! These types provide the necessary information for strategies to
//! analyze an event's markets and detect opportunities.

use std::collections::{BTreeSet, HashMap};

use crate::domain::aggregator::MarketQuotes;
use crate::domain::fair::FairPricer;
use crate::domain::market::{Event, MarketKey, MarketType};

/// Full context for detection over one event.
///
/// This is passed to strategies' `detect()` method.
pub struct DetectionContext<'a> {
    /// The event being analyzed.
    pub event: &'a Event,
    /// Every quoted market of the event, thin ones included.
    groups: &'a [MarketQuotes],
    /// Fair prices for those markets.
    pub pricer: &'a FairPricer<'a>,
    index: HashMap<&'a MarketKey, &'a MarketQuotes>,
}

impl<'a> DetectionContext<'a> {
    pub fn new(event: &'a Event, groups: &'a [MarketQuotes], pricer: &'a FairPricer<'a>) -> Self {
        Self {
            event,
            groups,
            pricer,
            index: groups.iter().map(|group| (group.key(), group)).collect(),
        }
    }

    /// All market groups, ordered by key.
    pub fn groups(&self) -> &'a [MarketQuotes] {
        self.groups
    }

    /// Groups of one market type.
    pub fn groups_of(&self, market: MarketType) -> impl Iterator<Item = &'a MarketQuotes> {
        self.groups
            .iter()
            .filter(move |group| group.key().market == market)
    }

    /// Look up a market by exact key.
    pub fn group(&self, key: &MarketKey) -> Option<&'a MarketQuotes> {
        self.index.get(key).copied()
    }

    /// Quoted complements of a market.
    pub fn complements(&self, key: &MarketKey) -> Vec<&'a MarketQuotes> {
        key.complements()
            .iter()
            .filter_map(|complement| self.group(complement))
            .collect()
    }

    /// Market types present in the event.
    pub fn market_types(&self) -> BTreeSet<MarketType> {
        self.groups.iter().map(|group| group.key().market).collect()
    }
}
