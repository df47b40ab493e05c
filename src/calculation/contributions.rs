//! Statutory contribution calculation.
//!
//! Maps a monthly salary to SSS, Pag-IBIG and PhilHealth shares:
//!
//! - SSS: bracketed lookup of a monthly salary credit, then fixed rates
//! - Pag-IBIG: a rate split that depends on a salary threshold
//! - PhilHealth: a flat rate on a salary clamped between a floor and ceiling
//!
//! The functions are pure and do not validate their input; callers check the
//! salary with [`validate_monthly_salary`] first.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::PayrollSettings;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    BiMonthlyContributions, ContributionBracket, ContributionResult, ContributionSummary,
};

use super::money::round_money;

/// One band of the SSS schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SssBracket {
    /// Lowest monthly salary in the band (inclusive).
    pub min: Decimal,
    /// Highest monthly salary in the band (inclusive).
    pub max: Decimal,
    /// Monthly salary credit the rates apply to.
    pub credit: Decimal,
}

/// Number of bands in the SSS schedule.
pub const SSS_BRACKET_COUNT: usize = 61;

const SSS_LOWEST_CREDIT: u32 = 5_000;
const SSS_CREDIT_STEP: u32 = 500;

const fn build_sss_brackets() -> [SssBracket; SSS_BRACKET_COUNT] {
    let empty = SssBracket {
        min: Decimal::ZERO,
        max: Decimal::ZERO,
        credit: Decimal::ZERO,
    };
    let mut table = [empty; SSS_BRACKET_COUNT];

    let mut index = 0;
    while index < SSS_BRACKET_COUNT {
        let credit = SSS_LOWEST_CREDIT + SSS_CREDIT_STEP * index as u32;
        // Amounts in centavos; each band spans credit ± 250.
        let min_cents = if index == 0 { 0 } else { (credit - 250) * 100 };
        let max_cents = (credit + 250) * 100 - 1;
        table[index] = SssBracket {
            min: Decimal::from_parts(min_cents, 0, 0, false, 2),
            max: Decimal::from_parts(max_cents, 0, 0, false, 2),
            credit: Decimal::from_parts(credit, 0, 0, false, 0),
        };
        index += 1;
    }

    table
}

/// The SSS schedule: credits 5,000 to 35,000 in steps of 500, ascending.
///
/// The first band starts at zero. Salaries above the top band's maximum use
/// the top band.
pub static SSS_BRACKETS: [SssBracket; SSS_BRACKET_COUNT] = build_sss_brackets();

/// SSS employee rate on the monthly salary credit.
pub const SSS_EMPLOYEE_RATE: Decimal = Decimal::from_parts(11, 0, 0, false, 2);

/// SSS employer rate on the monthly salary credit.
pub const SSS_EMPLOYER_RATE: Decimal = Decimal::from_parts(85, 0, 0, false, 3);

/// SSS total rate on the monthly salary credit.
pub const SSS_TOTAL_RATE: Decimal = Decimal::from_parts(195, 0, 0, false, 3);

/// Salary at or above which Pag-IBIG is split 2% / 2%.
pub const PAGIBIG_THRESHOLD: Decimal = Decimal::from_parts(1_500, 0, 0, false, 0);

const PAGIBIG_LOW_EMPLOYEE_RATE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);
const PAGIBIG_HIGH_EMPLOYEE_RATE: Decimal = Decimal::from_parts(2, 0, 0, false, 2);
const PAGIBIG_EMPLOYER_RATE: Decimal = Decimal::from_parts(2, 0, 0, false, 2);

/// PhilHealth premium rate, split equally.
pub const PHILHEALTH_RATE: Decimal = Decimal::from_parts(4, 0, 0, false, 2);

/// Salary below which the PhilHealth premium is fixed at the floor.
pub const PHILHEALTH_SALARY_FLOOR: Decimal = Decimal::from_parts(10_000, 0, 0, false, 0);

/// Salary above which the PhilHealth premium is fixed at the ceiling.
pub const PHILHEALTH_SALARY_CEILING: Decimal = Decimal::from_parts(80_000, 0, 0, false, 0);

/// Smallest amount a monthly figure can change by.
const CENTAVO: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// A contribution before rounding.
struct RawContribution {
    employee_share: Decimal,
    employer_share: Decimal,
    total: Decimal,
    reference_bracket: ContributionBracket,
}

impl RawContribution {
    /// The figures for one semi-monthly period.
    fn halved(&self) -> Self {
        Self {
            employee_share: self.employee_share / Decimal::TWO,
            employer_share: self.employer_share / Decimal::TWO,
            total: self.total / Decimal::TWO,
            reference_bracket: self.reference_bracket.clone(),
        }
    }

    fn rounded(&self) -> ContributionResult {
        ContributionResult {
            employee_share: round_money(self.employee_share),
            employer_share: round_money(self.employer_share),
            total: round_money(self.total),
            reference_bracket: self.reference_bracket.clone(),
        }
    }
}

/// Finds the SSS band for a monthly salary.
///
/// The table is gap-free and ascending, so the band is the last one whose
/// minimum does not exceed the salary. Negative salaries fall into the first band.
pub fn find_sss_bracket(monthly_salary: Decimal) -> &'static SssBracket {
    SSS_BRACKETS
        .iter()
        .rfind(|b| b.min <= monthly_salary)
        .unwrap_or(&SSS_BRACKETS[0])
}

/// Calculates the SSS contribution for a monthly salary.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::calculate_sss;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let result = calculate_sss(Decimal::from(15000));
/// assert_eq!(result.reference_bracket.base, Decimal::from(15000));
/// assert_eq!(result.employee_share, Decimal::from_str("1650.00").unwrap());
/// assert_eq!(result.employer_share, Decimal::from_str("1275.00").unwrap());
/// assert_eq!(result.total, Decimal::from_str("2925.00").unwrap());
/// ```
pub fn calculate_sss(monthly_salary: Decimal) -> ContributionResult {
    sss_contribution(monthly_salary).rounded()
}

fn sss_contribution(monthly_salary: Decimal) -> RawContribution {
    let bracket = find_sss_bracket(monthly_salary);
    let credit = bracket.credit;

    RawContribution {
        employee_share: credit * SSS_EMPLOYEE_RATE,
        employer_share: credit * SSS_EMPLOYER_RATE,
        total: credit * SSS_TOTAL_RATE,
        reference_bracket: ContributionBracket {
            min: bracket.min,
            max: Some(bracket.max),
            base: credit,
        },
    }
}

/// Calculates the Pag-IBIG contribution for a monthly salary.
///
/// At or above [`PAGIBIG_THRESHOLD`] the total is 4% split 2% / 2%; below it
/// the total is 3% split 1% employee / 2% employer.
pub fn calculate_pagibig(monthly_salary: Decimal) -> ContributionResult {
    pagibig_contribution(monthly_salary).rounded()
}

fn pagibig_contribution(monthly_salary: Decimal) -> RawContribution {
    let (employee_rate, bracket) = if monthly_salary >= PAGIBIG_THRESHOLD {
        (
            PAGIBIG_HIGH_EMPLOYEE_RATE,
            ContributionBracket {
                min: PAGIBIG_THRESHOLD,
                max: None,
                base: monthly_salary,
            },
        )
    } else {
        (
            PAGIBIG_LOW_EMPLOYEE_RATE,
            ContributionBracket {
                min: Decimal::ZERO,
                max: Some(PAGIBIG_THRESHOLD - CENTAVO),
                base: monthly_salary,
            },
        )
    };

    let employee_share = monthly_salary * employee_rate;
    let employer_share = monthly_salary * PAGIBIG_EMPLOYER_RATE;

    RawContribution {
        employee_share,
        employer_share,
        total: employee_share + employer_share,
        reference_bracket: bracket,
    }
}

/// Calculates the PhilHealth premium for a monthly salary.
///
/// The premium is 4% of the salary clamped to the floor and ceiling, which
/// keeps the total between 400 and 3,200. Employee and employer pay half each.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::calculate_philhealth;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(calculate_philhealth(Decimal::from(5000)).total, Decimal::from_str("400.00").unwrap());
/// assert_eq!(calculate_philhealth(Decimal::from(15000)).total, Decimal::from_str("600.00").unwrap());
/// assert_eq!(calculate_philhealth(Decimal::from(120000)).total, Decimal::from_str("3200.00").unwrap());
/// ```
pub fn calculate_philhealth(monthly_salary: Decimal) -> ContributionResult {
    philhealth_contribution(monthly_salary).rounded()
}

fn philhealth_contribution(monthly_salary: Decimal) -> RawContribution {
    let bracket = if monthly_salary < PHILHEALTH_SALARY_FLOOR {
        ContributionBracket {
            min: Decimal::ZERO,
            max: Some(PHILHEALTH_SALARY_FLOOR - CENTAVO),
            base: PHILHEALTH_SALARY_FLOOR,
        }
    } else if monthly_salary > PHILHEALTH_SALARY_CEILING {
        ContributionBracket {
            min: PHILHEALTH_SALARY_CEILING + CENTAVO,
            max: None,
            base: PHILHEALTH_SALARY_CEILING,
        }
    } else {
        ContributionBracket {
            min: PHILHEALTH_SALARY_FLOOR,
            max: Some(PHILHEALTH_SALARY_CEILING),
            base: monthly_salary,
        }
    };

    let total = bracket.base * PHILHEALTH_RATE;
    let half = total / Decimal::TWO;

    RawContribution {
        employee_share: half,
        employer_share: half,
        total,
        reference_bracket: bracket,
    }
}

/// Calculates every statutory contribution for a monthly salary.
///
/// `bi_monthly` carries each agency's unrounded figures halved, plus the
/// employee total withheld per payslip. Every figure is rounded once, on output.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::calculate_contributions;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let summary = calculate_contributions(Decimal::from(15000));
/// assert_eq!(summary.pagibig.total, Decimal::from_str("600.00").unwrap());
/// assert_eq!(summary.philhealth.employee_share, Decimal::from_str("300.00").unwrap());
/// assert_eq!(summary.bi_monthly.philhealth.employee_share, Decimal::from_str("150.00").unwrap());
/// ```
pub fn calculate_contributions(monthly_salary: Decimal) -> ContributionSummary {
    let sss = sss_contribution(monthly_salary);
    let pagibig = pagibig_contribution(monthly_salary);
    let philhealth = philhealth_contribution(monthly_salary);

    let bi_sss = sss.halved();
    let bi_pagibig = pagibig.halved();
    let bi_philhealth = philhealth.halved();
    let employee_total =
        bi_sss.employee_share + bi_pagibig.employee_share + bi_philhealth.employee_share;

    debug!(
        monthly_salary = %monthly_salary,
        sss = %sss.total,
        pagibig = %pagibig.total,
        philhealth = %philhealth.total,
        employee_total = %employee_total,
        "Calculated contributions"
    );

    ContributionSummary {
        monthly_salary,
        sss: sss.rounded(),
        pagibig: pagibig.rounded(),
        philhealth: philhealth.rounded(),
        bi_monthly: BiMonthlyContributions {
            sss: bi_sss.rounded(),
            pagibig: bi_pagibig.rounded(),
            philhealth: bi_philhealth.rounded(),
            employee_total: round_money(employee_total),
        },
    }
}

/// Derives a monthly salary from a daily rate.
pub fn monthly_salary_from_daily_rate(daily_rate: Decimal, settings: &PayrollSettings) -> Decimal {
    daily_rate * settings.working_days_per_month
}

/// Rejects a negative monthly salary.
///
/// # Errors
///
/// Returns [`EngineError::InvalidSalary`] when `monthly_salary` is below zero.
pub fn validate_monthly_salary(monthly_salary: Decimal) -> EngineResult<Decimal> {
    if monthly_salary < Decimal::ZERO {
        return Err(EngineError::InvalidSalary {
            value: monthly_salary,
        });
    }
    Ok(monthly_salary)
}
