//! Period resolution.
//!
//! Maps any date to its enclosing half-month payroll period. Periods run
//! from the 1st to the 15th and from the 16th to the last day of the month.

use chrono::{Datelike, NaiveDate};
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::PayPeriod;

/// Last day of the first half of a month.
pub const FIRST_HALF_END_DAY: u32 = 15;

/// First day of the second half of a month.
pub const SECOND_HALF_START_DAY: u32 = 16;

/// Number of days in the month `date` falls in (28 to 31, leap-year aware).
///
/// The day before the 1st of the following month; December of chrono's last
/// representable year has no following month and is 31 days long.
pub fn days_in_month(date: NaiveDate) -> u32 {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };

    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|next_month| next_month.pred_opt())
        .map_or(31, |last_day| last_day.day())
}

/// Moves `date` to `day` of the same month.
///
/// Callers only pass days that exist in every month (1, 15, 16) or the
/// month's own last day, so `date` itself is never returned.
fn same_month_day(date: NaiveDate, day: u32) -> NaiveDate {
    date.with_day(day).unwrap_or(date)
}

/// Returns the first day of the period that encloses `date`.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::period_start;
/// use chrono::NaiveDate;
///
/// let start = period_start(NaiveDate::from_ymd_opt(2026, 1, 5).unwrap());
/// assert_eq!(start, NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
///
/// let start = period_start(NaiveDate::from_ymd_opt(2026, 1, 16).unwrap());
/// assert_eq!(start, NaiveDate::from_ymd_opt(2026, 1, 16).unwrap());
/// ```
pub fn period_start(date: NaiveDate) -> NaiveDate {
    if date.day() <= FIRST_HALF_END_DAY {
        same_month_day(date, 1)
    } else {
        same_month_day(date, SECOND_HALF_START_DAY)
    }
}

/// Returns the last day of the period that begins on `start`.
///
/// A start on the 1st ends on the 15th; any other start ends on the last
/// calendar day of its month.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::period_end;
/// use chrono::NaiveDate;
///
/// // 2024 is a leap year
/// let end = period_end(NaiveDate::from_ymd_opt(2024, 2, 16).unwrap());
/// assert_eq!(end, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
/// ```
pub fn period_end(start: NaiveDate) -> NaiveDate {
    if start.day() == 1 {
        same_month_day(start, FIRST_HALF_END_DAY)
    } else {
        same_month_day(start, days_in_month(start))
    }
}

fn ensure_period_start(start: NaiveDate) -> EngineResult<()> {
    if start.day() == 1 || start.day() == SECOND_HALF_START_DAY {
        Ok(())
    } else {
        Err(EngineError::InvalidPeriodInput {
            input: start.to_string(),
            message: "a payroll period starts on the 1st or the 16th".to_string(),
        })
    }
}

fn out_of_range(start: NaiveDate) -> EngineError {
    EngineError::InvalidPeriodInput {
        input: start.to_string(),
        message: "adjacent period is outside the supported calendar range".to_string(),
    }
}

/// Returns the start of the period after the one beginning on `start`.
///
/// The 1st steps to the 16th of the same month; the 16th steps to the 1st of
/// the next month, rolling December into January.
pub fn next_period_start(start: NaiveDate) -> EngineResult<NaiveDate> {
    ensure_period_start(start)?;

    if start.day() == 1 {
        return Ok(same_month_day(start, SECOND_HALF_START_DAY));
    }

    let (year, month) = if start.month() == 12 {
        (start.year() + 1, 1)
    } else {
        (start.year(), start.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| out_of_range(start))
}

/// Returns the start of the period before the one beginning on `start`.
///
/// The 16th steps back to the 1st of the same month; the 1st steps back to the
/// 16th of the previous month, rolling January into December.
pub fn previous_period_start(start: NaiveDate) -> EngineResult<NaiveDate> {
    ensure_period_start(start)?;

    if start.day() == SECOND_HALF_START_DAY {
        return Ok(same_month_day(start, 1));
    }

    let (year, month) = if start.month() == 1 {
        (start.year() - 1, 12)
    } else {
        (start.year(), start.month() - 1)
    };
    NaiveDate::from_ymd_opt(year, month, SECOND_HALF_START_DAY).ok_or_else(|| out_of_range(start))
}

/// Parses a `YYYY-MM-DD` reference date.
///
/// Empty or malformed input is reported as [`EngineError::InvalidPeriodInput`].
pub fn parse_reference_date(input: &str) -> EngineResult<NaiveDate> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidPeriodInput {
            input: input.to_string(),
            message: "reference date is missing".to_string(),
        });
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|e| EngineError::InvalidPeriodInput {
        input: input.to_string(),
        message: e.to_string(),
    })
}

/// Resolves a raw reference date to its enclosing payroll period.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::resolve_period;
/// use chrono::NaiveDate;
///
/// let period = resolve_period("2026-02-20").unwrap();
/// assert_eq!(period.start_date, NaiveDate::from_ymd_opt(2026, 2, 16).unwrap());
/// assert_eq!(period.end_date, NaiveDate::from_ymd_opt(2026, 2, 28).unwrap());
///
/// assert!(resolve_period("20/02/2026").is_err());
/// ```
pub fn resolve_period(reference_date: &str) -> EngineResult<PayPeriod> {
    let date = parse_reference_date(reference_date)?;
    let period = PayPeriod::containing(date);
    debug!(
        reference_date = %date,
        period_start = %period.start_date,
        period_end = %period.end_date,
        "Resolved payroll period"
    );
    Ok(period)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_first_half_start() {
        assert_eq!(period_start(make_date("2026-01-05")), make_date("2026-01-01"));
        assert_eq!(period_start(make_date("2026-01-15")), make_date("2026-01-01"));
    }

    #[test]
    fn test_second_half_start() {
        assert_eq!(period_start(make_date("2026-01-16")), make_date("2026-01-16"));
        assert_eq!(period_start(make_date("2026-01-31")), make_date("2026-01-16"));
    }

    #[test]
    fn test_first_half_ends_on_fifteenth() {
        assert_eq!(period_end(make_date("2026-01-01")), make_date("2026-01-15"));
    }

    #[test]
    fn test_second_half_ends_on_month_length() {
        assert_eq!(period_end(make_date("2026-01-16")), make_date("2026-01-31"));
        assert_eq!(period_end(make_date("2026-04-16")), make_date("2026-04-30"));
        assert_eq!(period_end(make_date("2026-02-16")), make_date("2026-02-28"));
        assert_eq!(period_end(make_date("2028-02-16")), make_date("2028-02-29"));
    }

    #[test]
    fn test_century_leap_rules() {
        assert_eq!(period_end(make_date("1900-02-16")), make_date("1900-02-28"));
        assert_eq!(period_end(make_date("2000-02-16")), make_date("2000-02-29"));
    }

    #[test]
    fn test_next_period_within_month() {
        assert_eq!(
            next_period_start(make_date("2026-03-01")).unwrap(),
            make_date("2026-03-16")
        );
    }

    #[test]
    fn test_next_period_rolls_month_and_year() {
        assert_eq!(
            next_period_start(make_date("2026-03-16")).unwrap(),
            make_date("2026-04-01")
        );
        assert_eq!(
            next_period_start(make_date("2026-12-16")).unwrap(),
            make_date("2027-01-01")
        );
    }

    #[test]
    fn test_previous_period_rolls_month_and_year() {
        assert_eq!(
            previous_period_start(make_date("2026-03-16")).unwrap(),
            make_date("2026-03-01")
        );
        assert_eq!(
            previous_period_start(make_date("2026-03-01")).unwrap(),
            make_date("2026-02-16")
        );
        assert_eq!(
            previous_period_start(make_date("2026-01-01")).unwrap(),
            make_date("2025-12-16")
        );
    }

    #[test]
    fn test_stepping_rejects_non_period_start() {
        assert!(matches!(
            next_period_start(make_date("2026-03-02")),
            Err(EngineError::InvalidPeriodInput { .. })
        ));
        assert!(matches!(
            previous_period_start(make_date("2026-03-17")),
            Err(EngineError::InvalidPeriodInput { .. })
        ));
    }

    #[test]
    fn test_parse_reference_date_rejects_garbage() {
        match parse_reference_date("not-a-date") {
            Err(EngineError::InvalidPeriodInput { input, .. }) => {
                assert_eq!(input, "not-a-date");
            }
            _ => panic!("Expected InvalidPeriodInput error"),
        }
    }

    #[test]
    fn test_parse_reference_date_rejects_empty() {
        match parse_reference_date("  ") {
            Err(EngineError::InvalidPeriodInput { message, .. }) => {
                assert_eq!(message, "reference date is missing");
            }
            _ => panic!("Expected InvalidPeriodInput error"),
        }
    }

    #[test]
    fn test_parse_reference_date_rejects_impossible_day() {
        assert!(parse_reference_date("2026-02-30").is_err());
    }

    #[test]
    fn test_resolve_period_scenario_a() {
        let period = resolve_period("2026-01-05").unwrap();
        assert_eq!(period.start_date, make_date("2026-01-01"));
        assert_eq!(period.end_date, make_date("2026-01-15"));
    }

    #[test]
    fn test_resolve_period_scenario_b() {
        let period = resolve_period("2026-02-20").unwrap();
        assert_eq!(period.start_date, make_date("2026-02-16"));
        assert_eq!(period.end_date, make_date("2026-02-28"));
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(make_date("2026-02-01")), 28);
        assert_eq!(days_in_month(make_date("2024-02-01")), 29);
        assert_eq!(days_in_month(make_date("2026-09-10")), 30);
        assert_eq!(days_in_month(make_date("2026-12-10")), 31);
    }
}
