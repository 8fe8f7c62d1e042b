//! Closed-form amortization.
//!
//! Pure numeric functions, kept free of ledger state so they can be
//! property-tested on their own.

use rust_decimal::Decimal;
use sweldo_shared::types::round_centavos;

/// Equal monthly payment for a loan of `principal` at `annual_rate`
/// (a fraction, 0.12 = 12%) over `term_months`.
///
/// Uses M = P * r * (1+r)^n / ((1+r)^n - 1) with r = annual_rate / 12,
/// degrading to straight P / n when the rate is zero. The result is
/// rounded to centavos.
#[must_use]
pub fn monthly_payment(principal: Decimal, annual_rate: Decimal, term_months: u32) -> Decimal {
    let n = Decimal::from(term_months);
    if annual_rate.is_zero() {
        return round_centavos(principal / n);
    }
    let r = annual_rate / Decimal::from(12);
    let factor = compound(Decimal::ONE + r, term_months);
    round_centavos(principal * r * factor / (factor - Decimal::ONE))
}

/// Total repayment over the full term.
#[must_use]
pub fn total_cost(monthly_payment: Decimal, term_months: u32) -> Decimal {
    round_centavos(monthly_payment * Decimal::from(term_months))
}

/// `base` raised to `exp` by repeated multiplication. Terms are small
/// (months), so this stays exact within `Decimal` precision.
fn compound(base: Decimal, exp: u32) -> Decimal {
    let mut acc = Decimal::ONE;
    for _ in 0..exp {
        acc *= base;
    }
    acc
}
