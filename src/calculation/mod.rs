//! Calculation logic for the payroll engine.
//!
//! This module contains all the calculation functions for semi-monthly
//! payroll: period resolution, day classification and day-type pay,
//! attendance summarisation, base hours with absences and proration,
//! statutory contributions, and payslip composition.
//!
//! Every function here is synchronous and free of I/O. Figures are carried
//! at full precision and rounded with [`round_money`] only on output.

mod attendance;
mod base_hours;
mod contributions;
mod day_pay;
mod day_rates;
mod money;
mod payslip;
mod period;

pub use attendance::{
    civil_date, summarize_attendance_day, summarize_period_attendance, worked_dates,
};
pub use base_hours::{BaseHoursResult, EmploymentWindow, calculate_base_hours, proration_factor};
pub use contributions::{
    PAGIBIG_THRESHOLD, PHILHEALTH_RATE, PHILHEALTH_SALARY_CEILING, PHILHEALTH_SALARY_FLOOR,
    SSS_BRACKET_COUNT, SSS_BRACKETS, SSS_EMPLOYEE_RATE, SSS_EMPLOYER_RATE, SSS_TOTAL_RATE,
    SssBracket, calculate_contributions, calculate_pagibig, calculate_philhealth, calculate_sss,
    find_sss_bracket, monthly_salary_from_daily_rate, validate_monthly_salary,
};
pub use day_pay::{DayHours, calculate_attendance_day_pay, calculate_day_pay, calculate_day_pay_for_label};
pub use day_rates::{
    DAY_TYPE_RATES, DayTypeRates, NIGHT_DIFF_PREMIUM, PREMIUM_DAY_OVERTIME_PREMIUM,
    REGULAR_DAY_OVERTIME_PREMIUM, classify_day, holiday_kind_on, rates_for, rates_for_label,
};
pub use money::{MONEY_DECIMAL_PLACES, round_money};
pub use payslip::{PayslipInput, compose_payslip};
pub use period::{
    FIRST_HALF_END_DAY, SECOND_HALF_START_DAY, days_in_month, next_period_start,
    parse_reference_date, period_end, period_start, previous_period_start, resolve_period,
};
