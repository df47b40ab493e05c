//! Attendance summarisation.
//!
//! Buckets clock intervals into civil days using a fixed local offset, and
//! turns one day's intervals into an [`AttendanceDay`] with regular, overtime
//! and night-window hours.
//!
//! Bucketing always uses the configured civil-day offset, never the offset a
//! timestamp happened to be recorded in, so a clock-in at 23:30 local time
//! stays on its own day even though it is the previous day in UTC.

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::config::PayrollSettings;
use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceDay, ClockInterval, DayType, Holiday, PayPeriod, RestDayPolicy};

use super::day_rates::{classify_day, holiday_kind_on};

/// Returns the civil date `timestamp` falls on at `offset`.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::civil_date;
/// use chrono::{FixedOffset, NaiveDate, TimeZone, Utc};
///
/// let offset = FixedOffset::east_opt(8 * 3600).unwrap();
/// // 15:30 UTC on the 5th is 23:30 on the 5th in UTC+8
/// let late = Utc.with_ymd_and_hms(2026, 1, 5, 15, 30, 0).unwrap();
/// assert_eq!(civil_date(late, offset), NaiveDate::from_ymd_opt(2026, 1, 5).unwrap());
///
/// // 16:30 UTC on the 5th is already the 6th locally
/// let after_midnight = Utc.with_ymd_and_hms(2026, 1, 5, 16, 30, 0).unwrap();
/// assert_eq!(civil_date(after_midnight, offset), NaiveDate::from_ymd_opt(2026, 1, 6).unwrap());
/// ```
pub fn civil_date(timestamp: DateTime<Utc>, offset: FixedOffset) -> NaiveDate {
    timestamp.with_timezone(&offset).date_naive()
}

/// Dates on which at least one closed interval was clocked in.
///
/// Open intervals are ignored. An interval belongs to the civil date of its
/// clock-in.
pub fn worked_dates(intervals: &[ClockInterval], offset: FixedOffset) -> BTreeSet<NaiveDate> {
    intervals
        .iter()
        .filter(|i| i.is_closed())
        .map(|i| civil_date(i.start_timestamp, offset))
        .collect()
}

/// Whole minutes between two local times, as hours.
fn calculate_hours(start: NaiveDateTime, end: NaiveDateTime) -> Decimal {
    let minutes = (end - start).num_minutes();
    if minutes <= 0 {
        return Decimal::ZERO;
    }
    Decimal::from(minutes) / Decimal::from(60)
}

/// `hour:00` on `day`, or an error naming the night-window setting.
fn window_time(day: NaiveDate, hour: u32) -> EngineResult<NaiveDateTime> {
    day.and_hms_opt(hour, 0, 0)
        .ok_or_else(|| EngineError::InvalidConfig {
            field: "night_window".to_string(),
            message: format!("{} is not an hour of the day", hour),
        })
}

/// Hours of `[start, end)` that fall inside the nightly window.
///
/// The window opens at `window_start_hour` and closes at `window_end_hour`,
/// on the following day when the end hour is not after the start hour.
fn night_window_hours(
    start: NaiveDateTime,
    end: NaiveDateTime,
    window_start_hour: u32,
    window_end_hour: u32,
) -> EngineResult<Decimal> {
    if window_start_hour == window_end_hour || end <= start {
        return Ok(Decimal::ZERO);
    }

    let wraps_midnight = window_end_hour < window_start_hour;
    let mut total = Decimal::ZERO;

    // A window opened on the previous evening can still cover the start.
    let mut day = start.date() - Duration::days(1);
    while day <= end.date() {
        let window_open = window_time(day, window_start_hour)?;
        let close_day = if wraps_midnight {
            day + Duration::days(1)
        } else {
            day
        };
        let window_close = window_time(close_day, window_end_hour)?;

        let overlap_start = start.max(window_open);
        let overlap_end = end.min(window_close);
        if overlap_start < overlap_end {
            total += calculate_hours(overlap_start, overlap_end);
        }

        day += Duration::days(1);
    }

    Ok(total)
}

/// Builds the [`AttendanceDay`] for `date` from an employee's clock intervals.
///
/// Worked hours are the closed intervals clocked in on `date`, in whole
/// minutes. Regular hours are capped at `scheduled_hours`; the remainder is
/// overtime. Night-differential hours are the part of those intervals inside
/// the configured night window.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::summarize_attendance_day;
/// use payroll_engine::config::PayrollSettings;
/// use payroll_engine::models::{ClockInterval, DayType};
/// use chrono::{NaiveDate, TimeZone, Utc};
/// use rust_decimal::Decimal;
///
/// // 08:00 to 19:00 local (UTC+8)
/// let intervals = vec![ClockInterval {
///     employee_ref: "emp_001".to_string(),
///     start_timestamp: Utc.with_ymd_and_hms(2026, 1, 5, 0, 0, 0).unwrap(),
///     end_timestamp: Some(Utc.with_ymd_and_hms(2026, 1, 5, 11, 0, 0).unwrap()),
/// }];
///
/// let day = summarize_attendance_day(
///     NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
///     DayType::Regular,
///     Decimal::from(8),
///     &intervals,
///     &PayrollSettings::default(),
/// )
/// .unwrap();
///
/// assert_eq!(day.regular_hours, Decimal::from(8));
/// assert_eq!(day.overtime_hours, Decimal::from(3));
/// assert_eq!(day.night_diff_hours, Decimal::ZERO);
/// ```
///
/// # Errors
///
/// Returns [`EngineError::InvalidConfig`] when `settings` fail validation.
pub fn summarize_attendance_day(
    date: NaiveDate,
    day_type: DayType,
    scheduled_hours: Decimal,
    intervals: &[ClockInterval],
    settings: &PayrollSettings,
) -> EngineResult<AttendanceDay> {
    settings.validate()?;
    let offset = settings.civil_day_offset()?;

    let mut worked = Decimal::ZERO;
    let mut night = Decimal::ZERO;

    for interval in intervals {
        let Some(end) = interval.end_timestamp else {
            continue;
        };
        if civil_date(interval.start_timestamp, offset) != date {
            continue;
        }

        let local_start = interval.start_timestamp.with_timezone(&offset).naive_local();
        let local_end = end.with_timezone(&offset).naive_local();

        worked += calculate_hours(local_start, local_end);
        night += night_window_hours(
            local_start,
            local_end,
            settings.night_window_start_hour,
            settings.night_window_end_hour,
        )?;
    }

    let scheduled = scheduled_hours.max(Decimal::ZERO);
    let regular_hours = worked.min(scheduled);
    let overtime_hours = worked - regular_hours;

    Ok(AttendanceDay {
        date,
        day_type,
        scheduled_hours: scheduled,
        regular_hours,
        overtime_hours,
        night_diff_hours: night,
    })
}

/// Classifies and summarises every worked day of `period`.
///
/// Each date with a closed interval becomes one [`AttendanceDay`], typed from
/// the rest-day policy and the declared holidays. Worked dates outside the
/// period are dropped with a warning.
pub fn summarize_period_attendance(
    period: &PayPeriod,
    intervals: &[ClockInterval],
    rest_days: &RestDayPolicy,
    holidays: &[Holiday],
    scheduled_hours: Decimal,
    settings: &PayrollSettings,
) -> EngineResult<Vec<AttendanceDay>> {
    let offset = settings.civil_day_offset()?;
    let mut days = Vec::new();

    for date in worked_dates(intervals, offset) {
        if !period.contains_date(date) {
            warn!(
                date = %date,
                period_start = %period.start_date,
                period_end = %period.end_date,
                "Dropping attendance outside the payroll period"
            );
            continue;
        }

        let day_type = classify_day(rest_days.is_rest_day(date), holiday_kind_on(holidays, date));
        days.push(summarize_attendance_day(
            date,
            day_type,
            scheduled_hours,
            intervals,
            settings,
        )?);
    }

    debug!(
        period_start = %period.start_date,
        worked_days = days.len(),
        "Summarised period attendance"
    );

    Ok(days)
}
