//! Fair probability of a market from the whole event's quotes.

use std::collections::HashMap;

use serde::Serialize;

use super::aggregator::MarketQuotes;
use super::error::OddsError;
use super::market::MarketKey;
use super::pricing::{devig_probabilities, estimate_fair_probability, weighted_fair_probability, BookWeights};

/// How a fair probability was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FairSource {
    /// De-vigged against the consensus of every complementary side.
    Devigged,
    /// Single-sided estimate from an assumed margin.
    Estimated,
}

/// Derived fair probability of one market side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FairPrice {
    pub probability: f64,
    /// Vig of the market the probability was derived from.
    pub vig_percent: f64,
    pub source: FairSource,
}

/// Prices markets against their complementary sides.
pub struct FairPricer<'a> {
    groups: HashMap<&'a MarketKey, &'a MarketQuotes>,
    weights: &'a BookWeights,
    assumed_vig_percent: Option<f64>,
}

impl<'a> FairPricer<'a> {
    pub fn new(
        groups: &'a [MarketQuotes],
        weights: &'a BookWeights,
        assumed_vig_percent: Option<f64>,
    ) -> Self {
        Self {
            groups: groups.iter().map(|group| (group.key(), group)).collect(),
            weights,
            assumed_vig_percent,
        }
    }

    /// Fair price for a market side, if one can be derived.
    ///
    /// Weighted consensus of the side and of every quoted complement, then
    /// de-vigged together. Without any complement the result is `None`
    /// unless an assumed vig was configured.
    ///
    /// # Errors
    ///
    /// Propagates consensus failures such as [`OddsError::NoValidWeight`].
    pub fn fair_price(&self, key: &MarketKey) -> Result<Option<FairPrice>, OddsError> {
        let Some(own) = self.groups.get(key) else {
            return Ok(None);
        };
        let own_consensus = weighted_fair_probability(&own.prices(), self.weights)?;

        let mut consensus = vec![own_consensus];
        for complement in key.complements() {
            if let Some(group) = self.groups.get(&complement) {
                consensus.push(weighted_fair_probability(&group.prices(), self.weights)?);
            }
        }

        if consensus.len() < 2 {
            return match self.assumed_vig_percent {
                Some(vig) => Ok(Some(FairPrice {
                    probability: estimate_fair_probability(own_consensus, vig)?,
                    vig_percent: vig,
                    source: FairSource::Estimated,
                })),
                None => Ok(None),
            };
        }

        let devig = devig_probabilities(&consensus)?;
        Ok(Some(FairPrice {
            probability: devig.fair_probabilities[0],
            vig_percent: devig.vig_percent,
            source: FairSource::Devigged,
        }))
    }
}
