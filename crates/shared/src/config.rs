//! Engine configuration management.
//!
//! Statutory rates and work-schedule constants are configurable so that
//! rate changes (e.g. a new SSS contribution schedule) do not require a
//! code change. `EngineConfig::default()` carries the current values, so
//! the engine is usable without any config file.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Engine-wide configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Government contribution rates.
    #[serde(default)]
    pub contributions: ContributionConfig,
    /// Work schedule used for derived-rate and attendance math.
    #[serde(default)]
    pub schedule: WorkScheduleConfig,
    /// Loan eligibility thresholds.
    #[serde(default)]
    pub loans: LoanConfig,
}

/// Government contribution rates, applied to basic salary.
#[derive(Debug, Clone, Deserialize)]
pub struct ContributionConfig {
    /// SSS employee share rate.
    #[serde(default = "default_sss_employee_rate")]
    pub sss_employee_rate: Decimal,
    /// SSS employer share rate (finalize aggregation only).
    #[serde(default = "default_sss_employer_rate")]
    pub sss_employer_rate: Decimal,
    /// PhilHealth employee share rate.
    #[serde(default = "default_philhealth_employee_rate")]
    pub philhealth_employee_rate: Decimal,
    /// PhilHealth employer share rate (finalize aggregation only).
    #[serde(default = "default_philhealth_employer_rate")]
    pub philhealth_employer_rate: Decimal,
    /// Default Pag-IBIG employee rate, used when a profile does not
    /// configure its own.
    #[serde(default = "default_pagibig_rate")]
    pub pagibig_default_rate: Decimal,
    /// Pag-IBIG employer share rate (finalize aggregation only).
    #[serde(default = "default_pagibig_employer_rate")]
    pub pagibig_employer_rate: Decimal,
}

/// Work schedule constants.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkScheduleConfig {
    /// Working days per month, used to derive the daily rate from a
    /// monthly salary.
    #[serde(default = "default_working_days")]
    pub working_days_per_month: Decimal,
    /// Working hours per day, used to derive the hourly rate.
    #[serde(default = "default_hours_per_day")]
    pub hours_per_day: Decimal,
    /// Overtime pay multiplier on the hourly rate.
    #[serde(default = "default_overtime_multiplier")]
    pub overtime_multiplier: Decimal,
}

/// Loan eligibility thresholds.
#[derive(Debug, Clone, Deserialize)]
pub struct LoanConfig {
    /// Minimum basic salary required for a housing loan.
    #[serde(default = "default_housing_min_salary")]
    pub housing_min_basic_salary: Decimal,
}

fn default_sss_employee_rate() -> Decimal {
    // 8%
    Decimal::new(8, 2)
}

fn default_sss_employer_rate() -> Decimal {
    // 9.5%
    Decimal::new(95, 3)
}

fn default_philhealth_employee_rate() -> Decimal {
    // 2.75%
    Decimal::new(275, 4)
}

fn default_philhealth_employer_rate() -> Decimal {
    // 2.75%
    Decimal::new(275, 4)
}

fn default_pagibig_rate() -> Decimal {
    // 1%
    Decimal::new(1, 2)
}

fn default_pagibig_employer_rate() -> Decimal {
    // 2%
    Decimal::new(2, 2)
}

fn default_working_days() -> Decimal {
    Decimal::from(22)
}

fn default_hours_per_day() -> Decimal {
    Decimal::from(8)
}

fn default_overtime_multiplier() -> Decimal {
    Decimal::new(125, 2)
}

fn default_housing_min_salary() -> Decimal {
    Decimal::from(30_000)
}

impl Default for ContributionConfig {
    fn default() -> Self {
        Self {
            sss_employee_rate: default_sss_employee_rate(),
            sss_employer_rate: default_sss_employer_rate(),
            philhealth_employee_rate: default_philhealth_employee_rate(),
            philhealth_employer_rate: default_philhealth_employer_rate(),
            pagibig_default_rate: default_pagibig_rate(),
            pagibig_employer_rate: default_pagibig_employer_rate(),
        }
    }
}

impl Default for WorkScheduleConfig {
    fn default() -> Self {
        Self {
            working_days_per_month: default_working_days(),
            hours_per_day: default_hours_per_day(),
            overtime_multiplier: default_overtime_multiplier(),
        }
    }
}

impl Default for LoanConfig {
    fn default() -> Self {
        Self {
            housing_min_basic_salary: default_housing_min_salary(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            contributions: ContributionConfig::default(),
            schedule: WorkScheduleConfig::default(),
            loans: LoanConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Loads configuration from config files and environment.
    ///
    /// Sources, in override order: `config/default.toml`,
    /// `config/{RUN_MODE}.toml`, then `SWELDO__`-prefixed environment
    /// variables. All sources are optional; missing values fall back to
    /// the statutory defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a present source cannot be parsed.
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("SWELDO").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_rates() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.contributions.sss_employee_rate, dec!(0.08));
        assert_eq!(cfg.contributions.philhealth_employee_rate, dec!(0.0275));
        assert_eq!(cfg.contributions.pagibig_default_rate, dec!(0.01));
    }

    #[test]
    fn test_default_employer_rates() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.contributions.sss_employer_rate, dec!(0.095));
        assert_eq!(cfg.contributions.philhealth_employer_rate, dec!(0.0275));
        assert_eq!(cfg.contributions.pagibig_employer_rate, dec!(0.02));
    }

    #[test]
    fn test_default_schedule() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.schedule.working_days_per_month, dec!(22));
        assert_eq!(cfg.schedule.hours_per_day, dec!(8));
        assert_eq!(cfg.schedule.overtime_multiplier, dec!(1.25));
    }
}
