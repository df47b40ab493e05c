//! Core data models for the payroll engine.
//!
//! This module contains the value types that flow into and out of the
//! calculation functions. None of them is persisted by the engine.

mod attendance;
mod contribution;
mod day_type;
mod pay_breakdown;
mod pay_period;
mod payslip;

pub use attendance::{AttendanceDay, ClockInterval, RestDayPolicy, ensure_single_open_interval};
pub use contribution::{
    BiMonthlyContributions, ContributionBracket, ContributionResult, ContributionSummary,
};
pub use day_type::DayType;
pub use pay_breakdown::{PayBreakdown, PayComponent, PayLineItem};
pub use pay_period::{Holiday, HolidayKind, PayPeriod};
pub use payslip::{DayPay, Payslip, PayslipTotals};
