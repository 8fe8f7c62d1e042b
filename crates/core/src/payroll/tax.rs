//! Withholding tax.
//!
//! Progressive annualized brackets: the monthly taxable income is
//! annualized, taxed on the bracket table, and the annual tax is
//! brought back to a monthly figure. Pure, so it can be
//! property-tested on its own.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sweldo_shared::types::round_centavos;

use crate::salary::TaxStatus;

/// One bracket: annual income floor, tax at the floor, marginal rate
/// on the excess.
const BRACKETS: &[(Decimal, Decimal, Decimal)] = &[
    (dec!(8_000_000), dec!(2_202_500), dec!(0.35)),
    (dec!(2_000_000), dec!(402_500), dec!(0.32)),
    (dec!(800_000), dec!(102_500), dec!(0.30)),
    (dec!(400_000), dec!(22_500), dec!(0.25)),
    (dec!(250_000), dec!(0), dec!(0.20)),
];

/// Annual tax on an annual taxable income.
#[must_use]
pub fn annual_tax(annual_taxable: Decimal) -> Decimal {
    for &(floor, base, rate) in BRACKETS {
        if annual_taxable > floor {
            return base + (annual_taxable - floor) * rate;
        }
    }
    Decimal::ZERO
}

/// Withholding tax for one month of `taxable` income.
///
/// Exempt status short-circuits to zero, as does non-positive taxable
/// income.
#[must_use]
pub fn monthly_withholding(taxable: Decimal, status: TaxStatus) -> Decimal {
    if status.is_exempt() || taxable <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    round_centavos(annual_tax(taxable * dec!(12)) / dec!(12))
}
