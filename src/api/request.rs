//! Request types for the payroll engine API.
//!
//! This module defines the JSON request bodies for every endpoint. Decimal
//! fields accept either JSON strings or numbers.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::{EmploymentWindow, PayslipInput};
use crate::models::{ClockInterval, Holiday, RestDayPolicy};

/// Request body for `POST /period`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodRequest {
    /// Any date, as `YYYY-MM-DD`.
    pub reference_date: String,
}

/// Request body for `POST /day-pay`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayPayRequest {
    /// Day-type label, e.g. `regular-holiday`.
    pub day_type: String,
    /// Hours within the schedule.
    pub regular_hours: Decimal,
    /// Hours beyond the schedule.
    #[serde(default)]
    pub overtime_hours: Decimal,
    /// Hours inside the night window.
    #[serde(default)]
    pub night_diff_hours: Decimal,
    /// The employee's hourly rate.
    pub rate_per_hour: Decimal,
}

impl DayPayRequest {
    /// Returns the name of the first negative numeric field, if any.
    pub fn negative_field(&self) -> Option<&'static str> {
        [
            ("regular_hours", self.regular_hours),
            ("overtime_hours", self.overtime_hours),
            ("night_diff_hours", self.night_diff_hours),
            ("rate_per_hour", self.rate_per_hour),
        ]
        .into_iter()
        .find(|(_, value)| *value < Decimal::ZERO)
        .map(|(field, _)| field)
    }
}

/// Request body for `POST /base-hours`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaseHoursRequest {
    /// The employee whose intervals are counted.
    pub employee_ref: String,
    /// Any date inside the period, as `YYYY-MM-DD`.
    pub reference_date: String,
    /// The employee's clock intervals.
    #[serde(default)]
    pub clock_intervals: Vec<ClockInterval>,
    /// How rest days are determined.
    #[serde(default)]
    pub rest_days: RestDayPolicy,
    /// Hire and termination dates, if any.
    #[serde(default)]
    pub employment: EmploymentWindow,
    /// Declared holidays; the configured calendar is used when omitted.
    #[serde(default)]
    pub holidays: Option<Vec<Holiday>>,
}

/// Request body for `POST /contributions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContributionsRequest {
    /// The monthly salary to compute contributions from.
    pub monthly_salary: Decimal,
}

/// Request body for `POST /payslip`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayslipRequest {
    /// The employee the payslip is for.
    pub employee_ref: String,
    /// Any date inside the period to pay, as `YYYY-MM-DD`.
    pub reference_date: String,
    /// Pay for one standard day.
    pub daily_rate: Decimal,
    /// Scheduled hours per worked day.
    #[serde(default)]
    pub scheduled_hours: Option<Decimal>,
    /// How rest days are determined.
    #[serde(default)]
    pub rest_days: RestDayPolicy,
    /// Hire and termination dates, if any.
    #[serde(default)]
    pub employment: EmploymentWindow,
    /// The employee's clock intervals.
    #[serde(default)]
    pub clock_intervals: Vec<ClockInterval>,
    /// Declared holidays; the configured calendar is used when omitted.
    #[serde(default)]
    pub holidays: Option<Vec<Holiday>>,
}

impl PayslipRequest {
    /// Converts the request into composer input, filling in `default_holidays`
    /// when the request declares none of its own.
    pub fn into_input(self, default_holidays: Vec<Holiday>) -> PayslipInput {
        PayslipInput {
            employee_ref: self.employee_ref,
            reference_date: self.reference_date,
            daily_rate: self.daily_rate,
            scheduled_hours: self.scheduled_hours,
            rest_days: self.rest_days,
            employment: self.employment,
            clock_intervals: self.clock_intervals,
            holidays: self.holidays.unwrap_or(default_holidays),
        }
    }
}
