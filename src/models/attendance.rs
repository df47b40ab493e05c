//! Attendance models: clock intervals, classified days and rest-day sources.
//!
//! [`ClockInterval`] is owned by the external clock-in/out subsystem; the
//! engine only reads it. [`AttendanceDay`] is a per-computation value.

use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::DayType;

/// A clock-in/clock-out interval recorded for an employee.
///
/// An interval is `open` while `end_timestamp` is `None` and `closed` once it
/// is set. Only closed intervals count as attendance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockInterval {
    /// The employee this interval belongs to.
    pub employee_ref: String,
    /// When the employee clocked in.
    pub start_timestamp: DateTime<Utc>,
    /// When the employee clocked out, if they have.
    #[serde(default)]
    pub end_timestamp: Option<DateTime<Utc>>,
}

impl ClockInterval {
    /// Returns true once the interval has been clocked out.
    pub fn is_closed(&self) -> bool {
        self.end_timestamp.is_some()
    }

    /// Returns true while the employee is still clocked in.
    pub fn is_open(&self) -> bool {
        self.end_timestamp.is_none()
    }
}

/// Rejects a set of intervals in which any employee has more than one open interval.
///
/// The absence calculator assumes this invariant without checking it; hosts
/// call this at the boundary before handing intervals to the engine. Closed
/// intervals that end before they start are rejected too.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{ClockInterval, ensure_single_open_interval};
/// use chrono::{TimeZone, Utc};
///
/// let intervals = vec![
///     ClockInterval {
///         employee_ref: "emp_001".to_string(),
///         start_timestamp: Utc.with_ymd_and_hms(2026, 1, 5, 1, 0, 0).unwrap(),
///         end_timestamp: None,
///     },
///     ClockInterval {
///         employee_ref: "emp_001".to_string(),
///         start_timestamp: Utc.with_ymd_and_hms(2026, 1, 6, 1, 0, 0).unwrap(),
///         end_timestamp: None,
///     },
/// ];
/// assert!(ensure_single_open_interval(&intervals).is_err());
/// ```
pub fn ensure_single_open_interval(intervals: &[ClockInterval]) -> EngineResult<()> {
    let mut open_per_employee: HashMap<&str, usize> = HashMap::new();

    for interval in intervals {
        match interval.end_timestamp {
            None => {
                let open = open_per_employee
                    .entry(interval.employee_ref.as_str())
                    .or_default();
                *open += 1;
                if *open > 1 {
                    return Err(EngineError::ConcurrentOpenInterval {
                        employee_ref: interval.employee_ref.clone(),
                    });
                }
            }
            Some(end) if end < interval.start_timestamp => {
                return Err(EngineError::InvalidClockInterval {
                    employee_ref: interval.employee_ref.clone(),
                    message: format!(
                        "clock-out {} precedes clock-in {}",
                        end.to_rfc3339(),
                        interval.start_timestamp.to_rfc3339()
                    ),
                });
            }
            Some(_) => {}
        }
    }

    Ok(())
}

/// How an employee's rest days are determined.
///
/// Office staff rest every Saturday and Sunday. Client-deployed staff follow
/// the client's schedule, supplied as an explicit set of rest dates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "classification", rename_all = "snake_case")]
pub enum RestDayPolicy {
    /// Saturday and Sunday are always rest days.
    #[default]
    Office,
    /// Only the listed dates are rest days.
    Client {
        /// Rest dates derived from the client schedule.
        #[serde(default)]
        rest_days: BTreeSet<NaiveDate>,
    },
}

impl RestDayPolicy {
    /// Returns true if `date` is a rest day under this policy.
    pub fn is_rest_day(&self, date: NaiveDate) -> bool {
        match self {
            RestDayPolicy::Office => matches!(date.weekday(), Weekday::Sat | Weekday::Sun),
            RestDayPolicy::Client { rest_days } => rest_days.contains(&date),
        }
    }
}

/// One classified day of attendance.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{AttendanceDay, DayType};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let day = AttendanceDay {
///     date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
///     day_type: DayType::Regular,
///     scheduled_hours: Decimal::from(8),
///     regular_hours: Decimal::from(8),
///     overtime_hours: Decimal::from(2),
///     night_diff_hours: Decimal::ZERO,
/// };
/// assert_eq!(day.worked_hours(), Decimal::from(10));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceDay {
    /// The civil date the work was done on.
    pub date: NaiveDate,
    /// The pay category of the day.
    pub day_type: DayType,
    /// Hours the employee was scheduled to work.
    pub scheduled_hours: Decimal,
    /// Hours worked within the schedule.
    pub regular_hours: Decimal,
    /// Hours worked beyond the schedule.
    #[serde(default)]
    pub overtime_hours: Decimal,
    /// Hours worked inside the night window.
    #[serde(default)]
    pub night_diff_hours: Decimal,
}

impl AttendanceDay {
    /// Regular plus overtime hours.
    pub fn worked_hours(&self) -> Decimal {
        self.regular_hours + self.overtime_hours
    }
}
