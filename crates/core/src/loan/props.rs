//! Property tests for the amortization formula.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::amortization::{monthly_payment, total_cost};

fn principals() -> impl Strategy<Value = Decimal> {
    (1_000u64..=1_000_000).prop_map(Decimal::from)
}

fn rates() -> impl Strategy<Value = Decimal> {
    // 0% to 30% annual, in whole percents
    (0u32..=30).prop_map(|pct| Decimal::new(i64::from(pct), 2))
}

proptest! {
    #[test]
    fn payment_covers_the_principal_share(
        principal in principals(),
        rate in rates(),
        term in 1u32..=60,
    ) {
        let payment = monthly_payment(principal, rate, term);
        let n = Decimal::from(term);
        // Interest can only raise the payment above principal / term;
        // allow one centavo of rounding per installment.
        let centavo = Decimal::new(1, 2);
        prop_assert!(payment + centavo >= principal / n - centavo);
        prop_assert!(payment > Decimal::ZERO);
    }

    #[test]
    fn schedule_repays_at_least_the_principal(
        principal in principals(),
        rate in rates(),
        term in 1u32..=60,
    ) {
        let payment = monthly_payment(principal, rate, term);
        let slack = Decimal::new(1, 2) * Decimal::from(term);
        prop_assert!(total_cost(payment, term) + slack >= principal);
    }

    #[test]
    fn payment_is_deterministic(
        principal in principals(),
        rate in rates(),
        term in 1u32..=60,
    ) {
        prop_assert_eq!(
            monthly_payment(principal, rate, term),
            monthly_payment(principal, rate, term)
        );
    }
}
