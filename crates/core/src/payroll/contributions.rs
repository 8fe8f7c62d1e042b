//! Government contributions.
//!
//! All three are computed from the monthly basic salary, never from
//! gross, and each is gated on the matching government number being on
//! file with enrollment switched on.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sweldo_shared::config::ContributionConfig;
use sweldo_shared::types::round_centavos;

use crate::salary::SalaryProfile;

/// The three statutory shares for one side (employee or employer).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Contributions {
    /// SSS share.
    pub sss: Decimal,
    /// PhilHealth share.
    pub philhealth: Decimal,
    /// Pag-IBIG share.
    pub pagibig: Decimal,
}

impl Contributions {
    /// Sum of the three shares.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.sss + self.philhealth + self.pagibig
    }
}

/// Employee-side contributions from the active profile.
///
/// Pag-IBIG uses the profile's configured rate when present, else the
/// configured default.
#[must_use]
pub fn employee_contributions(
    profile: &SalaryProfile,
    config: &ContributionConfig,
) -> Contributions {
    let basic = profile.basic_salary;
    Contributions {
        sss: if covered(profile.benefits.sss, profile.government.sss.as_ref()) {
            round_centavos(basic * config.sss_employee_rate)
        } else {
            Decimal::ZERO
        },
        philhealth: if covered(
            profile.benefits.philhealth,
            profile.government.philhealth.as_ref(),
        ) {
            round_centavos(basic * config.philhealth_employee_rate)
        } else {
            Decimal::ZERO
        },
        pagibig: if covered(profile.benefits.pagibig, profile.government.pagibig.as_ref()) {
            let rate = profile.pagibig_rate.unwrap_or(config.pagibig_default_rate);
            round_centavos(basic * rate)
        } else {
            Decimal::ZERO
        },
    }
}

/// Employer-side counterpart shares at the employer rates.
///
/// Computed from the basic salary and employee shares a calculation row
/// recorded, not from the live profile, so finalization stays faithful
/// to what was calculated even after the profile is superseded. A scheme
/// that contributed nothing on the employee side contributes nothing on
/// the employer side either.
#[must_use]
pub fn employer_contributions(
    basic_salary: Decimal,
    employee_side: &Contributions,
    config: &ContributionConfig,
) -> Contributions {
    let share = |employee_share: Decimal, employer_rate: Decimal| {
        if employee_share > Decimal::ZERO {
            round_centavos(basic_salary * employer_rate)
        } else {
            Decimal::ZERO
        }
    };
    Contributions {
        sss: share(employee_side.sss, config.sss_employer_rate),
        philhealth: share(employee_side.philhealth, config.philhealth_employer_rate),
        pagibig: share(employee_side.pagibig, config.pagibig_employer_rate),
    }
}

fn covered(enrolled: bool, number: Option<&String>) -> bool {
    enrolled && number.is_some()
}
