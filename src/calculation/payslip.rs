//! Payslip composition.
//!
//! Composes the period, base hours, per-day pay and contributions for one
//! employee into a [`Payslip`].

use std::collections::BTreeSet;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::PayrollSettings;
use crate::error::EngineResult;
use crate::models::{
    ClockInterval, DayPay, DayType, Holiday, Payslip, PayslipTotals, RestDayPolicy,
};

use super::attendance::{summarize_period_attendance, worked_dates};
use super::base_hours::{EmploymentWindow, tally_base_hours};
use super::contributions::{
    calculate_contributions, monthly_salary_from_daily_rate, validate_monthly_salary,
};
use super::day_pay::{attendance_day_amounts, calculate_attendance_day_pay};
use super::money::round_money;
use super::period::resolve_period;

/// Everything needed to compose one employee's payslip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayslipInput {
    /// The employee the payslip is for.
    pub employee_ref: String,
    /// Any date inside the period to pay, as `YYYY-MM-DD`.
    pub reference_date: String,
    /// Pay for one standard day.
    pub daily_rate: Decimal,
    /// Scheduled hours per worked day; defaults to the standard day length.
    #[serde(default)]
    pub scheduled_hours: Option<Decimal>,
    /// How the employee's rest days are determined.
    #[serde(default)]
    pub rest_days: RestDayPolicy,
    /// Hire and termination dates, if any.
    #[serde(default)]
    pub employment: EmploymentWindow,
    /// Clock intervals; intervals of other employees are ignored.
    #[serde(default)]
    pub clock_intervals: Vec<ClockInterval>,
    /// Declared holidays; only those inside the period are used.
    #[serde(default)]
    pub holidays: Vec<Holiday>,
}

/// Composes a payslip for one employee and one period.
///
/// # Process
///
/// 1. Resolve the period from the reference date
/// 2. Bucket the employee's closed intervals into civil dates
/// 3. Compute base hours and absences for the period
/// 4. Classify and price every worked day in the period
/// 5. Compute contributions from `daily_rate × working_days_per_month`
/// 6. Total it up from unrounded figures, rounding each total once:
///    - `base_pay = final_base_hours × hourly_rate`
///    - `premium_pay` = overtime and night differential of every day, plus
///      the regular pay of rest-day and holiday work
///    - `gross_pay = base_pay + premium_pay`
///    - `deductions` = the semi-monthly employee shares
///    - `net_pay = gross_pay − deductions`
///
/// # Errors
///
/// Returns [`EngineError::InvalidConfig`](crate::error::EngineError::InvalidConfig)
/// for out-of-range settings,
/// [`EngineError::InvalidPeriodInput`](crate::error::EngineError::InvalidPeriodInput)
/// for a malformed reference date, and
/// [`EngineError::InvalidSalary`](crate::error::EngineError::InvalidSalary) for a
/// negative daily rate.
pub fn compose_payslip(input: &PayslipInput, settings: &PayrollSettings) -> EngineResult<Payslip> {
    settings.validate()?;
    let period = resolve_period(&input.reference_date)?;
    let offset = settings.civil_day_offset()?;

    let monthly_salary = validate_monthly_salary(monthly_salary_from_daily_rate(
        input.daily_rate,
        settings,
    ))?;
    let hourly_rate = input.daily_rate / settings.standard_day_hours;
    let scheduled_hours = input.scheduled_hours.unwrap_or(settings.standard_day_hours);

    let intervals: Vec<ClockInterval> = input
        .clock_intervals
        .iter()
        .filter(|i| i.employee_ref == input.employee_ref)
        .cloned()
        .collect();

    let holidays: Vec<Holiday> = input
        .holidays
        .iter()
        .filter(|h| period.contains_date(h.date))
        .cloned()
        .collect();
    let holiday_dates: BTreeSet<NaiveDate> = holidays.iter().map(|h| h.date).collect();

    let base_hours = tally_base_hours(
        &period,
        &worked_dates(&intervals, offset),
        &input.rest_days,
        &holiday_dates,
        &input.employment,
        settings,
    );

    let attendance = summarize_period_attendance(
        &period,
        &intervals,
        &input.rest_days,
        &holidays,
        scheduled_hours,
        settings,
    )?;

    let days: Vec<DayPay> = attendance
        .iter()
        .map(|day| DayPay {
            date: day.date,
            day_type: day.day_type,
            breakdown: calculate_attendance_day_pay(day, hourly_rate),
        })
        .collect();

    let contributions = calculate_contributions(monthly_salary);

    let base_pay = base_hours.final_base_hours * hourly_rate;
    let premium_pay: Decimal = attendance
        .iter()
        .map(|day| {
            let amounts = attendance_day_amounts(day, hourly_rate);
            let premium = amounts.overtime + amounts.night_diff;
            if day.day_type == DayType::Regular {
                premium
            } else {
                premium + amounts.regular
            }
        })
        .sum();
    let gross_pay = base_pay + premium_pay;
    let deductions = contributions.bi_monthly.employee_total;

    debug!(
        employee_ref = %input.employee_ref,
        base_pay = %base_pay,
        premium_pay = %premium_pay,
        deductions = %deductions,
        "Computed payslip totals"
    );

    let payslip = Payslip {
        payslip_id: Uuid::new_v4(),
        generated_at: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        employee_ref: input.employee_ref.clone(),
        period,
        daily_rate: round_money(input.daily_rate),
        hourly_rate: round_money(hourly_rate),
        base_hours: base_hours.result,
        days,
        contributions,
        totals: PayslipTotals {
            base_pay: round_money(base_pay),
            premium_pay: round_money(premium_pay),
            gross_pay: round_money(gross_pay),
            deductions: round_money(deductions),
            net_pay: round_money(gross_pay - deductions),
        },
    };

    info!(
        payslip_id = %payslip.payslip_id,
        employee_ref = %payslip.employee_ref,
        period_start = %payslip.period.start_date,
        net_pay = %payslip.totals.net_pay,
        "Composed payslip"
    );

    Ok(payslip)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::models::{HolidayKind, PayPeriod};
    use chrono::{FixedOffset, NaiveDateTime, TimeZone};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn shift(employee: &str, start: &str, end: &str) -> ClockInterval {
        let offset = FixedOffset::east_opt(8 * 3600).unwrap();
        let parse = |s: &str| {
            offset
                .from_local_datetime(&NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap())
                .unwrap()
                .with_timezone(&Utc)
        };
        ClockInterval {
            employee_ref: employee.to_string(),
            start_timestamp: parse(start),
            end_timestamp: Some(parse(end)),
        }
    }

    /// Every weekday of the first half of January 2026, 08:00 to 16:00.
    fn full_first_half() -> Vec<ClockInterval> {
        PayPeriod::containing(make_date("2026-01-05"))
            .dates()
            .filter(|d| !RestDayPolicy::Office.is_rest_day(*d))
            .map(|d| shift("emp_001", &format!("{d} 08:00"), &format!("{d} 16:00")))
            .collect()
    }

    fn input(intervals: Vec<ClockInterval>) -> PayslipInput {
        PayslipInput {
            employee_ref: "emp_001".to_string(),
            reference_date: "2026-01-05".to_string(),
            daily_rate: dec("800"),
            scheduled_hours: None,
            rest_days: RestDayPolicy::Office,
            employment: EmploymentWindow::default(),
            clock_intervals: intervals,
            holidays: vec![],
        }
    }

    #[test]
    fn test_full_attendance_payslip() {
        let payslip = compose_payslip(&input(full_first_half()), &PayrollSettings::default()).unwrap();

        assert_eq!(payslip.period.start_date, make_date("2026-01-01"));
        assert_eq!(payslip.hourly_rate, dec("100.00"));
        assert_eq!(payslip.base_hours.final_base_hours, dec("104"));
        assert_eq!(payslip.days.len(), 11);
        assert!(payslip.days.iter().all(|d| d.day_type == DayType::Regular));

        // monthly 800 × 22 = 17,600: SSS credit 17,500, Pag-IBIG 352, PhilHealth 704
        // semi-monthly employee: 962.50 + 176.00 + 176.00
        assert_eq!(payslip.contributions.monthly_salary, dec("17600"));
        assert_eq!(payslip.totals.base_pay, dec("10400.00"));
        assert_eq!(payslip.totals.premium_pay, dec("0.00"));
        assert_eq!(payslip.totals.gross_pay, dec("10400.00"));
        assert_eq!(payslip.totals.deductions, dec("1314.50"));
        assert_eq!(payslip.totals.net_pay, dec("9085.50"));
        assert_eq!(payslip.engine_version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_overtime_and_holiday_work_are_premium() {
        let mut intervals = full_first_half();
        // Two hours of overtime on Monday the 5th
        intervals.retain(|i| i.start_timestamp.date_naive() != make_date("2026-01-05"));
        intervals.push(shift("emp_001", "2026-01-05 08:00", "2026-01-05 18:00"));
        // Saturday work on the 10th
        intervals.push(shift("emp_001", "2026-01-10 08:00", "2026-01-10 12:00"));

        let mut payslip_input = input(intervals);
        payslip_input.holidays = vec![Holiday {
            date: make_date("2026-01-01"),
            name: "New Year's Day".to_string(),
            kind: HolidayKind::Regular,
        }];

        let payslip = compose_payslip(&payslip_input, &PayrollSettings::default()).unwrap();

        let new_year = payslip
            .days
            .iter()
            .find(|d| d.date == make_date("2026-01-01"))
            .unwrap();
        assert_eq!(new_year.day_type, DayType::RegularHoliday);
        assert_eq!(new_year.breakdown.regular_pay, dec("1600.00"));

        // Overtime 2 × 125 = 250; Saturday 4 × 130 = 520; holiday 8 × 200 = 1600
        assert_eq!(payslip.totals.premium_pay, dec("2370.00"));
        assert_eq!(payslip.totals.gross_pay, dec("12770.00"));
    }

    #[test]
    fn test_absence_reduces_base_pay() {
        let mut intervals = full_first_half();
        intervals.retain(|i| i.start_timestamp.date_naive() != make_date("2026-01-07"));

        let payslip = compose_payslip(&input(intervals), &PayrollSettings::default()).unwrap();

        assert_eq!(payslip.base_hours.absence_dates, vec![make_date("2026-01-07")]);
        assert_eq!(payslip.base_hours.final_base_hours, dec("96"));
        assert_eq!(payslip.totals.base_pay, dec("9600.00"));
    }

    #[test]
    fn test_mid_period_hire_prices_unrounded_base_hours() {
        let mut payslip_input = input(full_first_half());
        payslip_input.employment = EmploymentWindow {
            hire_date: Some(make_date("2026-01-06")),
            termination_date: None,
        };

        let payslip = compose_payslip(&payslip_input, &PayrollSettings::default()).unwrap();

        // 104 × 10/15 = 69.333… hours at 100 per hour
        assert_eq!(payslip.base_hours.final_base_hours, dec("69.33"));
        assert_eq!(payslip.totals.base_pay, dec("6933.33"));
        assert_eq!(payslip.totals.gross_pay, dec("6933.33"));
        assert_eq!(payslip.totals.net_pay, dec("5618.83"));
    }

    #[test]
    fn test_premium_pay_rounds_once_across_days() {
        // Three regular days with 15 minutes of overtime at 100/8 per hour:
        // each day is 0.25 × 12.5 × 1.25 = 3.90625, 11.71875 in total
        let intervals = ["2026-01-05", "2026-01-06", "2026-01-07"]
            .iter()
            .map(|d| shift("emp_001", &format!("{d} 08:00"), &format!("{d} 16:15")))
            .collect();
        let mut payslip_input = input(intervals);
        payslip_input.daily_rate = dec("100");

        let payslip = compose_payslip(&payslip_input, &PayrollSettings::default()).unwrap();

        assert!(payslip.days.iter().all(|d| d.breakdown.overtime_pay == dec("3.91")));
        assert_eq!(payslip.totals.premium_pay, dec("11.72"));
    }

    #[test]
    fn test_zero_day_hours_is_rejected() {
        let settings = PayrollSettings {
            standard_day_hours: Decimal::ZERO,
            ..PayrollSettings::default()
        };

        match compose_payslip(&input(full_first_half()), &settings) {
            Err(EngineError::InvalidConfig { field, .. }) => {
                assert_eq!(field, "standard_day_hours");
            }
            _ => panic!("Expected InvalidConfig error"),
        }
    }

    #[test]
    fn test_out_of_range_night_window_is_rejected() {
        let settings = PayrollSettings {
            night_window_start_hour: 24,
            ..PayrollSettings::default()
        };

        assert!(matches!(
            compose_payslip(&input(full_first_half()), &settings),
            Err(EngineError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_other_employees_intervals_are_ignored() {
        let mut intervals = full_first_half();
        intervals.push(shift("emp_999", "2026-01-10 08:00", "2026-01-10 18:00"));

        let payslip = compose_payslip(&input(intervals), &PayrollSettings::default()).unwrap();
        assert_eq!(payslip.days.len(), 11);
        assert_eq!(payslip.totals.premium_pay, dec("0.00"));
    }

    #[test]
    fn test_invalid_reference_date() {
        let mut payslip_input = input(vec![]);
        payslip_input.reference_date = "January 5".to_string();

        match compose_payslip(&payslip_input, &PayrollSettings::default()) {
            Err(EngineError::InvalidPeriodInput { input, .. }) => {
                assert_eq!(input, "January 5");
            }
            _ => panic!("Expected InvalidPeriodInput error"),
        }
    }

    #[test]
    fn test_negative_daily_rate_is_rejected() {
        let mut payslip_input = input(vec![]);
        payslip_input.daily_rate = dec("-1");

        assert!(matches!(
            compose_payslip(&payslip_input, &PayrollSettings::default()),
            Err(EngineError::InvalidSalary { .. })
        ));
    }
}
