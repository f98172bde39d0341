//! Money helpers over decimal arithmetic.
//!
//! All prices and totals in Bramblefig are `rust_decimal::Decimal` values in
//! the currency's standard unit (dollars, not cents). The backend serializes
//! them as plain JSON numbers.

use rust_decimal::{Decimal, RoundingStrategy};

/// Round a money amount to 2 decimal places.
///
/// Midpoints round away from zero, matching how the backend's order totals
/// are computed.
#[must_use]
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Format a money amount for display (e.g., "$19.99").
#[must_use]
pub fn format_usd(amount: Decimal) -> String {
    format!("${:.2}", round_money(amount))
}
