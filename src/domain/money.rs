//! Monetary types for stakes and payouts.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

/// Money represented as a Decimal for precision.
pub type Money = Decimal;

/// Convert a computed `f64` amount to money rounded to cents.
///
/// Non-finite input maps to zero; pricing functions validate their inputs so
/// this only happens on a caller bug.
#[must_use]
pub fn to_money(amount: f64) -> Money {
    Decimal::from_f64(amount).unwrap_or_default().round_dp(2)
}

/// Convert money back to `f64` for probability arithmetic.
#[must_use]
pub fn to_f64(amount: Money) -> f64 {
    rust_decimal::prelude::ToPrimitive::to_f64(&amount).unwrap_or_default()
}
