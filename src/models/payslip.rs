//! Payslip models.
//!
//! This module contains the [`Payslip`] type and its associated structures
//! that capture the composed output of one employee's semi-monthly payroll:
//! base hours, per-day pay, statutory contributions and totals.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculation::BaseHoursResult;

use super::{ContributionSummary, DayType, PayBreakdown, PayPeriod};

/// The priced pay of one attendance day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayPay {
    /// The civil date of the day.
    pub date: NaiveDate,
    /// The day type the day was priced under.
    pub day_type: DayType,
    /// The monetary breakdown for the day.
    pub breakdown: PayBreakdown,
}

/// Aggregated totals for a payslip.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayslipTotals;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let totals = PayslipTotals {
///     base_pay: Decimal::from_str("7800.00").unwrap(),
///     premium_pay: Decimal::from_str("250.00").unwrap(),
///     gross_pay: Decimal::from_str("8050.00").unwrap(),
///     deductions: Decimal::from_str("1000.00").unwrap(),
///     net_pay: Decimal::from_str("7050.00").unwrap(),
/// };
/// assert_eq!(totals.gross_pay - totals.deductions, totals.net_pay);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayslipTotals {
    /// Final base hours × hourly rate.
    pub base_pay: Decimal,
    /// Overtime, night differential, and rest-day/holiday work.
    pub premium_pay: Decimal,
    /// Base plus premium pay.
    pub gross_pay: Decimal,
    /// Employee contribution shares withheld this period.
    pub deductions: Decimal,
    /// Gross pay less deductions.
    pub net_pay: Decimal,
}

/// The composed payroll result for one employee and one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payslip {
    /// Unique identifier for this payslip.
    pub payslip_id: Uuid,
    /// When the payslip was composed.
    pub generated_at: DateTime<Utc>,
    /// The version of the engine that composed it.
    pub engine_version: String,
    /// The employee the payslip is for.
    pub employee_ref: String,
    /// The half-month period covered.
    pub period: PayPeriod,
    /// Daily rate the figures derive from.
    pub daily_rate: Decimal,
    /// Daily rate divided by the standard day length.
    pub hourly_rate: Decimal,
    /// Base hours, absences and proration for the period.
    pub base_hours: BaseHoursResult,
    /// Priced attendance days inside the period, in date order.
    pub days: Vec<DayPay>,
    /// Statutory contributions for the derived monthly salary.
    pub contributions: ContributionSummary,
    /// Aggregated totals.
    pub totals: PayslipTotals,
}
