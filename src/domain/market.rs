//! Market-related domain types.
//!
//! - [`Event`] - A fixture between two teams
//! - [`MarketType`] / [`Side`] - What is being priced
//! - [`MarketKey`] - The exact slice two quotes must share to be comparable

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::EventId;

/// A market line (spread points or total points).
///
/// Decimal so that `-3` and `-3.5` compare and hash exactly.
pub type Line = Decimal;

/// Kind of wager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketType {
    Moneyline,
    Spread,
    Total,
}

impl MarketType {
    /// Whether quotes for this market carry a line.
    #[must_use]
    pub const fn has_line(self) -> bool {
        matches!(self, Self::Spread | Self::Total)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Moneyline => "moneyline",
            Self::Spread => "spread",
            Self::Total => "total",
        }
    }
}

impl fmt::Display for MarketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome a quote pays out on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Home,
    Away,
    Draw,
    Over,
    Under,
}

impl Side {
    /// The opposing side of a two-way market, if there is one.
    #[must_use]
    pub const fn opposite(self) -> Option<Self> {
        match self {
            Self::Home => Some(Self::Away),
            Self::Away => Some(Self::Home),
            Self::Over => Some(Self::Under),
            Self::Under => Some(Self::Over),
            Self::Draw => None,
        }
    }

    /// Whether this side can be quoted on the given market type.
    #[must_use]
    pub const fn valid_for(self, market: MarketType) -> bool {
        match market {
            MarketType::Moneyline => matches!(self, Self::Home | Self::Away | Self::Draw),
            MarketType::Spread => matches!(self, Self::Home | Self::Away),
            MarketType::Total => matches!(self, Self::Over | Self::Under),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Away => "away",
            Self::Draw => "draw",
            Self::Over => "over",
            Self::Under => "under",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A sporting event.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Event {
    id: EventId,
    sport: String,
    home: String,
    away: String,
}

impl Event {
    pub fn new(
        id: EventId,
        sport: impl Into<String>,
        home: impl Into<String>,
        away: impl Into<String>,
    ) -> Self {
        Self {
            id,
            sport: sport.into(),
            home: home.into(),
            away: away.into(),
        }
    }

    #[must_use]
    pub const fn id(&self) -> &EventId {
        &self.id
    }

    #[must_use]
    pub fn sport(&self) -> &str {
        &self.sport
    }

    #[must_use]
    pub fn home(&self) -> &str {
        &self.home
    }

    #[must_use]
    pub fn away(&self) -> &str {
        &self.away
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}", self.away, self.home)
    }
}

/// Identifies one comparable market slice.
///
/// Two quotes are comparable only if every field matches, line included.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MarketKey {
    pub event_id: EventId,
    pub market: MarketType,
    pub side: Side,
    pub line: Option<Line>,
}

impl MarketKey {
    pub fn new(event_id: EventId, market: MarketType, side: Side, line: Option<Line>) -> Self {
        Self {
            event_id,
            market,
            side,
            line,
        }
    }

    /// Keys of the other outcomes in the same market.
    ///
    /// - Moneyline: every other of home / away / draw. Callers keep only
    ///   those actually quoted, so a two-way moneyline ignores draw.
    /// - Spread: the opposite team at the negated line (home -3 vs away +3).
    /// - Total: the opposite side at the same line.
    #[must_use]
    pub fn complements(&self) -> Vec<Self> {
        let with_side = |side: Side, line: Option<Line>| Self {
            event_id: self.event_id.clone(),
            market: self.market,
            side,
            line,
        };

        match self.market {
            MarketType::Moneyline => [Side::Home, Side::Away, Side::Draw]
                .into_iter()
                .filter(|side| *side != self.side)
                .map(|side| with_side(side, self.line))
                .collect(),
            MarketType::Spread => self
                .side
                .opposite()
                .map(|side| with_side(side, self.line.map(|line| -line)))
                .into_iter()
                .collect(),
            MarketType::Total => self
                .side
                .opposite()
                .map(|side| with_side(side, self.line))
                .into_iter()
                .collect(),
        }
    }
}

impl fmt::Display for MarketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.event_id, self.market, self.side)?;
        if let Some(line) = self.line {
            if self.market == MarketType::Spread && line > Decimal::ZERO {
                write!(f, " +{line}")?;
            } else {
                write!(f, " {line}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn key(market: MarketType, side: Side, line: Option<Line>) -> MarketKey {
        MarketKey::new(EventId::from("evt"), market, side, line)
    }

    #[test]
    fn lines_distinguish_keys() {
        let a = key(MarketType::Spread, Side::Home, Some(dec!(-3)));
        let b = key(MarketType::Spread, Side::Home, Some(dec!(-3.5)));
        assert_ne!(a, b);
        assert_eq!(a, key(MarketType::Spread, Side::Home, Some(dec!(-3.0))));
    }

    #[test]
    fn spread_complement_negates_line() {
        let home = key(MarketType::Spread, Side::Home, Some(dec!(-3.5)));
        assert_eq!(
            home.complements(),
            vec![key(MarketType::Spread, Side::Away, Some(dec!(3.5)))]
        );
    }

    #[test]
    fn total_complement_keeps_line() {
        let over = key(MarketType::Total, Side::Over, Some(dec!(44.5)));
        assert_eq!(
            over.complements(),
            vec![key(MarketType::Total, Side::Under, Some(dec!(44.5)))]
        );
    }

    #[test]
    fn moneyline_complements_include_draw() {
        let home = key(MarketType::Moneyline, Side::Home, None);
        let sides: Vec<Side> = home.complements().iter().map(|k| k.side).collect();
        assert_eq!(sides, vec![Side::Away, Side::Draw]);
    }

    #[test]
    fn side_validity() {
        assert!(Side::Draw.valid_for(MarketType::Moneyline));
        assert!(!Side::Draw.valid_for(MarketType::Spread));
        assert!(!Side::Over.valid_for(MarketType::Moneyline));
        assert!(Side::Under.valid_for(MarketType::Total));
    }

    #[test]
    fn key_display() {
        let away = key(MarketType::Spread, Side::Away, Some(dec!(3.5)));
        assert_eq!(away.to_string(), "evt spread away +3.5");
        let over = key(MarketType::Total, Side::Over, Some(dec!(41.5)));
        assert_eq!(over.to_string(), "evt total over 41.5");
    }

    #[test]
    fn event_display() {
        let event = Event::new(EventId::from("e1"), "nfl", "Chiefs", "Bills");
        assert_eq!(event.to_string(), "Bills @ Chiefs");
    }
}
