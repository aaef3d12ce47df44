//! Pure pricing math.
//!
//! The single implementation of every odds formula in the crate: vig
//! removal, expected value and multi-book consensus. Strategies, the scanner
//! and the CLI all call into here.

pub mod consensus;
pub mod devig;
pub mod ev;

pub use consensus::{weighted_fair_probability, BookWeights, DEFAULT_WEIGHT};
pub use devig::{
    devig_odds, devig_probabilities, devig_two_way, estimate_fair_probability,
    remove_vig_from_probs, Devig, TwoWayDevig,
};
pub use ev::{calculate_ev, expected_value_percent, kelly_fraction, DEFAULT_STAKE};
