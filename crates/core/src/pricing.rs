//! Premium and collateral arithmetic.
//!
//! All amounts are rounded to cents, midpoint away from zero.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::types::ResultRow;

/// Shares per standard US equity option contract.
pub const CONTRACT_MULTIPLIER: Decimal = Decimal::ONE_HUNDRED;

/// Rounds to two decimal places.
#[must_use]
pub fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Unrounded midpoint of bid and ask.
#[must_use]
fn raw_mid(bid: Decimal, ask: Decimal) -> Decimal {
    (bid + ask) / Decimal::TWO
}

/// Mid price, rounded to cents.
#[must_use]
pub fn mid_price(bid: Decimal, ask: Decimal) -> Decimal {
    round_cents(raw_mid(bid, ask))
}

/// Premium received for one contract.
///
/// Computed from the unrounded mid so that a half-cent mid yields the exact
/// premium rather than a doubly-rounded one.
#[must_use]
pub fn premium(bid: Decimal, ask: Decimal) -> Decimal {
    round_cents(raw_mid(bid, ask) * CONTRACT_MULTIPLIER)
}

/// Cash needed to secure one contract.
#[must_use]
pub fn collateral(strike: Decimal) -> Decimal {
    round_cents(strike * CONTRACT_MULTIPLIER)
}

/// Sum of row premiums, rounded.
#[must_use]
pub fn total_premium(rows: &[ResultRow]) -> Decimal {
    round_cents(rows.iter().map(|r| r.premium).sum())
}

/// Sum of strikes times the multiplier, rounded.
///
/// Sums strikes first, then multiplies; not a sum of the per-row collateral.
#[must_use]
pub fn total_collateral(rows: &[ResultRow]) -> Decimal {
    let strikes: Decimal = rows.iter().map(|r| r.strike).sum();
    round_cents(strikes * CONTRACT_MULTIPLIER)
}
