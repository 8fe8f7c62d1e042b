//! Centavo-precision money helpers.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Every monetary figure in the workspace is a `rust_decimal::Decimal`;
//! this module owns the single rounding rule applied at persistence
//! boundaries.

use rust_decimal::Decimal;

/// Rounds a monetary amount to centavos (2 decimal places) using
/// banker's rounding.
///
/// All stored figures — pay components, deductions, loan payments — go
/// through this so intermediate math can carry full precision while
/// persisted values stay exact to the centavo.
#[must_use]
pub fn round_centavos(amount: Decimal) -> Decimal {
    amount.round_dp(2)
}
