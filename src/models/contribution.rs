//! Statutory contribution result models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The band a contribution was computed from.
///
/// `base` is the figure the contribution rate was applied to: the monthly
/// salary credit for SSS, the salary itself for Pag-IBIG, and the clamped
/// premium base for PhilHealth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionBracket {
    /// Lowest salary in the band (inclusive).
    pub min: Decimal,
    /// Highest salary in the band (inclusive), `None` when open-ended.
    pub max: Option<Decimal>,
    /// The figure the contribution rate was applied to.
    pub base: Decimal,
}

/// One agency's contribution for a monthly salary.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::calculate_pagibig;
/// use rust_decimal::Decimal;
///
/// let result = calculate_pagibig(Decimal::from(15000));
/// assert_eq!(result.total, Decimal::new(60000, 2));
/// assert_eq!(result.employee_share, Decimal::new(30000, 2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionResult {
    /// Share withheld from the employee.
    pub employee_share: Decimal,
    /// Share paid by the employer.
    pub employer_share: Decimal,
    /// Employee plus employer share.
    pub total: Decimal,
    /// The band the figures were derived from.
    pub reference_bracket: ContributionBracket,
}

/// Contributions for one half-month payroll period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BiMonthlyContributions {
    /// SSS for the period.
    pub sss: ContributionResult,
    /// Pag-IBIG for the period.
    pub pagibig: ContributionResult,
    /// PhilHealth for the period.
    pub philhealth: ContributionResult,
    /// Sum of the employee shares above.
    pub employee_total: Decimal,
}

/// All statutory contributions for a monthly salary, plus the per-period split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionSummary {
    /// The monthly salary the figures were computed from.
    pub monthly_salary: Decimal,
    /// Social Security System contribution.
    pub sss: ContributionResult,
    /// Home Development Mutual Fund contribution.
    pub pagibig: ContributionResult,
    /// National health insurance premium.
    pub philhealth: ContributionResult,
    /// Each monthly figure halved for a semi-monthly payslip.
    pub bi_monthly: BiMonthlyContributions,
}
