//! Government-number format validation and SSS bracket classification.
//!
//! Pure functions, isolated from the store so they can be tested
//! independently.

use rust_decimal::Decimal;

use super::error::SalaryError;
use super::types::GovernmentIds;

/// Checks a value against a digit-group pattern like `"##-#######-#"`,
/// where `#` is any ASCII digit and every other character must match
/// literally.
fn matches_pattern(value: &str, pattern: &str) -> bool {
    if value.chars().count() != pattern.chars().count() {
        return false;
    }
    value.chars().zip(pattern.chars()).all(|(v, p)| {
        if p == '#' {
            v.is_ascii_digit()
        } else {
            v == p
        }
    })
}

fn check(
    value: &Option<String>,
    scheme: &'static str,
    patterns: &[&str],
) -> Result<(), SalaryError> {
    match value {
        Some(v) if !patterns.iter().any(|p| matches_pattern(v, p)) => {
            Err(SalaryError::InvalidGovernmentNumber {
                scheme,
                value: v.clone(),
            })
        }
        _ => Ok(()),
    }
}

/// Validates every government number present on the input.
///
/// Absent numbers are fine (they gate the matching contribution off);
/// present numbers must match their scheme's format exactly.
pub fn validate_government_ids(ids: &GovernmentIds) -> Result<(), SalaryError> {
    check(&ids.sss, "SSS", &["##-#######-#"])?;
    check(&ids.philhealth, "PhilHealth", &["##-#########-#"])?;
    check(&ids.pagibig, "Pag-IBIG", &["####-####-####"])?;
    check(&ids.tin, "TIN", &["###-###-###", "###-###-###-###"])?;
    Ok(())
}

/// Classifies a basic salary into its SSS monthly salary credit.
///
/// Brackets step by 500 pesos: salaries below 3,250 fall in the lowest
/// bracket (credit 3,000), salaries of 24,750 and above in the highest
/// (credit 25,000). Within the range the credit is the bracket midpoint:
/// `floor((basic + 250) / 500) * 500`.
#[must_use]
pub fn sss_salary_credit(basic_salary: Decimal) -> Decimal {
    let floor = Decimal::from(3_000);
    let ceiling = Decimal::from(25_000);
    let step = Decimal::from(500);

    let credit = ((basic_salary + Decimal::from(250)) / step).floor() * step;
    credit.clamp(floor, ceiling)
}
