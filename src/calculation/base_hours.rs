//! Absence and base-hours calculation.
//!
//! Walks a payroll period day by day, skipping rest days, holidays and days
//! outside the employment window, and counts every remaining day without a
//! closed clock interval as an absence.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::PayrollSettings;
use crate::models::{PayPeriod, RestDayPolicy};

use super::money::round_money;

/// Optional hire and termination dates bounding an employee's employment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmploymentWindow {
    /// First day of employment.
    #[serde(default)]
    pub hire_date: Option<NaiveDate>,
    /// Last day of employment.
    #[serde(default)]
    pub termination_date: Option<NaiveDate>,
}

impl EmploymentWindow {
    /// Returns true if the employee is employed on `date`.
    pub fn is_employed_on(&self, date: NaiveDate) -> bool {
        self.hire_date.is_none_or(|hire| date >= hire)
            && self.termination_date.is_none_or(|term| date <= term)
    }

    /// Number of days in `period` the employee is employed, inclusive.
    pub fn employed_days_in(&self, period: &PayPeriod) -> i64 {
        let first = self
            .hire_date
            .map_or(period.start_date, |hire| hire.max(period.start_date));
        let last = self
            .termination_date
            .map_or(period.end_date, |term| term.min(period.end_date));

        if last < first {
            0
        } else {
            (last - first).num_days() + 1
        }
    }
}

/// Base hours for one employee and one period.
///
/// Hour figures are rounded to 2 decimal places.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseHoursResult {
    /// Full-period hours scaled by the proration factor.
    pub base_hours: Decimal,
    /// Number of scheduled days without attendance.
    pub absences: u32,
    /// Absences × the standard day length.
    pub absence_hours: Decimal,
    /// Base hours less absence hours, never below zero.
    pub final_base_hours: Decimal,
    /// The absent dates, in ascending order.
    pub absence_dates: Vec<NaiveDate>,
    /// Days of the period inside the employment window.
    pub employed_days: i64,
    /// Calendar days in the period.
    pub period_days: i64,
}

/// The share of `period` the employee is employed for.
///
/// `1` unless the hire or termination date falls inside the period, in which
/// case it is employed days over period days. Dates outside the period never
/// prorate, so an employee terminated before the period keeps a factor of `1`
/// while the absence walk skips every day.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::{EmploymentWindow, proration_factor};
/// use payroll_engine::models::PayPeriod;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let period = PayPeriod::containing(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
/// let window = EmploymentWindow {
///     hire_date: NaiveDate::from_ymd_opt(2026, 1, 6),
///     termination_date: None,
/// };
///
/// // Employed 10 of 15 days
/// assert_eq!(proration_factor(&period, &window), Decimal::from(10) / Decimal::from(15));
/// ```
pub fn proration_factor(period: &PayPeriod, employment: &EmploymentWindow) -> Decimal {
    let boundary_inside = [employment.hire_date, employment.termination_date]
        .into_iter()
        .flatten()
        .any(|date| period.contains_date(date));

    if !boundary_inside {
        return Decimal::ONE;
    }

    Decimal::from(employment.employed_days_in(period)) / Decimal::from(period.total_days())
}

/// Calculates base hours, absences and final base hours for a period.
///
/// For every day in the period:
/// 1. Days outside the employment window are skipped
/// 2. Rest days under `rest_days` are skipped without penalty
/// 3. Dates in `holidays` are skipped without penalty
/// 4. Any other day missing from `worked_dates` is an absence
///
/// `base_hours` is the full-period hours (13 × 8 by default) times the
/// [`proration_factor`]; `final_base_hours = max(0, base_hours − absence_hours)`.
///
/// `worked_dates` must already be bucketed by civil date, see
/// [`worked_dates`](super::worked_dates).
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::{EmploymentWindow, calculate_base_hours};
/// use payroll_engine::config::PayrollSettings;
/// use payroll_engine::models::{PayPeriod, RestDayPolicy};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use std::collections::BTreeSet;
///
/// let period = PayPeriod::containing(NaiveDate::from_ymd_opt(2026, 3, 2).unwrap());
/// let absent = NaiveDate::from_ymd_opt(2026, 3, 4).unwrap();
/// let worked: BTreeSet<NaiveDate> = period.dates().filter(|d| *d != absent).collect();
///
/// let result = calculate_base_hours(
///     &period,
///     &worked,
///     &RestDayPolicy::Office,
///     &BTreeSet::new(),
///     &EmploymentWindow::default(),
///     &PayrollSettings::default(),
/// );
///
/// assert_eq!(result.absence_dates, vec![absent]);
/// assert_eq!(result.final_base_hours, Decimal::from(96));
/// ```
pub fn calculate_base_hours(
    period: &PayPeriod,
    worked_dates: &BTreeSet<NaiveDate>,
    rest_days: &RestDayPolicy,
    holidays: &BTreeSet<NaiveDate>,
    employment: &EmploymentWindow,
    settings: &PayrollSettings,
) -> BaseHoursResult {
    tally_base_hours(period, worked_dates, rest_days, holidays, employment, settings).result
}

/// A [`BaseHoursResult`] together with the unrounded final base hours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BaseHoursTally {
    pub(crate) result: BaseHoursResult,
    pub(crate) final_base_hours: Decimal,
}

/// Same walk as [`calculate_base_hours`], keeping the unrounded final hours
/// for callers that price them.
pub(crate) fn tally_base_hours(
    period: &PayPeriod,
    worked_dates: &BTreeSet<NaiveDate>,
    rest_days: &RestDayPolicy,
    holidays: &BTreeSet<NaiveDate>,
    employment: &EmploymentWindow,
    settings: &PayrollSettings,
) -> BaseHoursTally {
    let period_days = period.total_days();
    let employed_days = employment.employed_days_in(period);
    let base_hours = settings.full_period_hours() * proration_factor(period, employment);

    let absence_dates: Vec<NaiveDate> = period
        .dates()
        .filter(|date| employment.is_employed_on(*date))
        .filter(|date| !rest_days.is_rest_day(*date))
        .filter(|date| !holidays.contains(date))
        .filter(|date| !worked_dates.contains(date))
        .collect();

    let absences = absence_dates.len() as u32;
    let absence_hours = Decimal::from(absences) * settings.standard_day_hours;
    let final_base_hours = (base_hours - absence_hours).max(Decimal::ZERO);

    debug!(
        period_start = %period.start_date,
        base_hours = %base_hours,
        absences = absences,
        final_base_hours = %final_base_hours,
        "Calculated base hours"
    );

    BaseHoursTally {
        result: BaseHoursResult {
            base_hours: round_money(base_hours),
            absences,
            absence_hours: round_money(absence_hours),
            final_base_hours: round_money(final_base_hours),
            absence_dates,
            employed_days,
            period_days,
        },
        final_base_hours,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn all_dates(period: &PayPeriod) -> BTreeSet<NaiveDate> {
        period.dates().collect()
    }

    #[test]
    fn test_perfect_attendance_earns_full_period() {
        let period = PayPeriod::containing(make_date("2026-01-05"));

        let result = calculate_base_hours(
            &period,
            &all_dates(&period),
            &RestDayPolicy::Office,
            &BTreeSet::new(),
            &EmploymentWindow::default(),
            &PayrollSettings::default(),
        );

        assert_eq!(result.base_hours, dec("104.00"));
        assert_eq!(result.absences, 0);
        assert_eq!(result.absence_hours, dec("0.00"));
        assert_eq!(result.final_base_hours, dec("104.00"));
        assert!(result.absence_dates.is_empty());
        assert_eq!(result.period_days, 15);
        assert_eq!(result.employed_days, 15);
    }

    #[test]
    fn test_single_absence_deducts_one_day() {
        // Client schedule resting on the first two days leaves 13 scheduled days
        let period = PayPeriod::containing(make_date("2026-01-05"));
        let rest_days = RestDayPolicy::Client {
            rest_days: [make_date("2026-01-01"), make_date("2026-01-02")]
                .into_iter()
                .collect(),
        };
        let absent = make_date("2026-01-08");
        let worked: BTreeSet<NaiveDate> = period.dates().filter(|d| *d != absent).collect();

        let result = calculate_base_hours(
            &period,
            &worked,
            &rest_days,
            &BTreeSet::new(),
            &EmploymentWindow::default(),
            &PayrollSettings::default(),
        );

        assert_eq!(result.absences, 1);
        assert_eq!(result.absence_hours, dec("8"));
        assert_eq!(result.final_base_hours, dec("96"));
        assert_eq!(result.absence_dates, vec![absent]);
    }

    #[test]
    fn test_office_weekends_are_not_absences() {
        // 2026-01-03/04 and 10/11 are weekends
        let period = PayPeriod::containing(make_date("2026-01-05"));

        let result = calculate_base_hours(
            &period,
            &BTreeSet::new(),
            &RestDayPolicy::Office,
            &BTreeSet::new(),
            &EmploymentWindow::default(),
            &PayrollSettings::default(),
        );

        assert_eq!(result.absences, 11);
        assert!(!result.absence_dates.contains(&make_date("2026-01-03")));
        assert!(!result.absence_dates.contains(&make_date("2026-01-11")));
        // 104 − 88
        assert_eq!(result.final_base_hours, dec("16"));
    }

    #[test]
    fn test_holidays_are_not_absences() {
        let period = PayPeriod::containing(make_date("2026-01-05"));
        let holidays: BTreeSet<NaiveDate> = [make_date("2026-01-01")].into_iter().collect();
        let worked: BTreeSet<NaiveDate> = period
            .dates()
            .filter(|d| *d != make_date("2026-01-01"))
            .collect();

        let result = calculate_base_hours(
            &period,
            &worked,
            &RestDayPolicy::Office,
            &holidays,
            &EmploymentWindow::default(),
            &PayrollSettings::default(),
        );

        assert_eq!(result.absences, 0);
        assert_eq!(result.final_base_hours, dec("104"));
    }

    #[test]
    fn test_final_base_hours_floor_at_zero() {
        let period = PayPeriod::containing(make_date("2026-01-05"));

        let result = calculate_base_hours(
            &period,
            &BTreeSet::new(),
            &RestDayPolicy::Client {
                rest_days: BTreeSet::new(),
            },
            &BTreeSet::new(),
            &EmploymentWindow::default(),
            &PayrollSettings::default(),
        );

        // 15 absences × 8 = 120 > 104
        assert_eq!(result.absences, 15);
        assert_eq!(result.absence_hours, dec("120"));
        assert_eq!(result.final_base_hours, Decimal::ZERO);
    }

    #[test]
    fn test_mid_period_hire_prorates_and_skips_earlier_days() {
        let period = PayPeriod::containing(make_date("2026-01-05"));
        let employment = EmploymentWindow {
            hire_date: Some(make_date("2026-01-06")),
            termination_date: None,
        };

        let result = calculate_base_hours(
            &period,
            &all_dates(&period),
            &RestDayPolicy::Office,
            &BTreeSet::new(),
            &employment,
            &PayrollSettings::default(),
        );

        // 104 × 10/15
        assert_eq!(result.base_hours, dec("69.33"));
        assert_eq!(result.final_base_hours, dec("69.33"));
        assert_eq!(result.employed_days, 10);
    }

    #[test]
    fn test_mid_period_termination_ignores_later_days() {
        let period = PayPeriod::containing(make_date("2026-01-20"));
        let employment = EmploymentWindow {
            hire_date: Some(make_date("2025-06-01")),
            termination_date: Some(make_date("2026-01-23")),
        };

        let result = calculate_base_hours(
            &period,
            &BTreeSet::new(),
            &RestDayPolicy::Office,
            &BTreeSet::new(),
            &employment,
            &PayrollSettings::default(),
        );

        // 16th to 23rd of a 16-day period; weekdays 16, 19, 20, 21, 22, 23
        assert_eq!(result.employed_days, 8);
        assert_eq!(result.base_hours, dec("52"));
        assert_eq!(result.absences, 6);
        assert_eq!(result.final_base_hours, dec("4"));
    }

    #[test]
    fn test_termination_before_period_is_unprorated() {
        let period = PayPeriod::containing(make_date("2026-01-05"));
        let employment = EmploymentWindow {
            hire_date: None,
            termination_date: Some(make_date("2025-12-20")),
        };

        let result = calculate_base_hours(
            &period,
            &BTreeSet::new(),
            &RestDayPolicy::Office,
            &BTreeSet::new(),
            &employment,
            &PayrollSettings::default(),
        );

        // Neither date falls inside the period; every day is outside employment
        assert_eq!(proration_factor(&period, &employment), Decimal::ONE);
        assert_eq!(result.base_hours, dec("104"));
        assert_eq!(result.employed_days, 0);
        assert_eq!(result.absences, 0);
        assert_eq!(result.final_base_hours, dec("104"));
    }

    #[test]
    fn test_hire_after_period_is_unprorated() {
        let period = PayPeriod::containing(make_date("2026-01-05"));
        let employment = EmploymentWindow {
            hire_date: Some(make_date("2026-02-01")),
            termination_date: None,
        };

        assert_eq!(proration_factor(&period, &employment), Decimal::ONE);
    }

    #[test]
    fn test_hire_and_termination_inside_period() {
        let period = PayPeriod::containing(make_date("2026-01-05"));
        let employment = EmploymentWindow {
            hire_date: Some(make_date("2026-01-05")),
            termination_date: Some(make_date("2026-01-09")),
        };

        // 5 of 15 days
        assert_eq!(
            proration_factor(&period, &employment),
            Decimal::from(5) / Decimal::from(15)
        );
    }

    #[test]
    fn test_hire_before_period_is_unprorated() {
        let period = PayPeriod::containing(make_date("2026-01-05"));
        let employment = EmploymentWindow {
            hire_date: Some(make_date("2025-03-01")),
            termination_date: Some(make_date("2027-03-01")),
        };
        assert_eq!(proration_factor(&period, &employment), Decimal::ONE);
    }

    #[test]
    fn test_base_hours_scale_with_settings() {
        let period = PayPeriod::containing(make_date("2026-01-05"));
        let settings = PayrollSettings {
            standard_day_hours: dec("7.5"),
            ..PayrollSettings::default()
        };

        let result = calculate_base_hours(
            &period,
            &all_dates(&period),
            &RestDayPolicy::Office,
            &BTreeSet::new(),
            &EmploymentWindow::default(),
            &settings,
        );

        assert_eq!(result.base_hours, dec("97.5"));
    }
}
