//! Pay period and holiday models.
//!
//! This module contains the [`PayPeriod`] and [`Holiday`] types that define
//! the half-month window a payroll computation runs over.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::calculation::{next_period_start, period_end, period_start, previous_period_start};
use crate::error::{EngineError, EngineResult};

/// The statutory category of a declared holiday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HolidayKind {
    /// A regular holiday (double pay when worked).
    Regular,
    /// A special non-working day.
    SpecialNonWorking,
}

/// A declared holiday.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{Holiday, HolidayKind};
/// use chrono::NaiveDate;
///
/// let holiday = Holiday {
///     date: NaiveDate::from_ymd_opt(2026, 12, 25).unwrap(),
///     name: "Christmas Day".to_string(),
///     kind: HolidayKind::Regular,
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    /// The date of the holiday.
    pub date: NaiveDate,
    /// The name of the holiday (e.g., "Independence Day").
    pub name: String,
    /// Whether this is a regular or a special non-working holiday.
    pub kind: HolidayKind,
}

/// A half-month payroll period.
///
/// `start_date` is always the 1st or the 16th of a month. A period starting on
/// the 1st ends on the 15th; a period starting on the 16th ends on the last
/// calendar day of that month. Periods are computed on demand and never
/// mutated once produced.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayPeriod;
/// use chrono::NaiveDate;
///
/// let period = PayPeriod::containing(NaiveDate::from_ymd_opt(2026, 2, 20).unwrap());
/// assert_eq!(period.start_date, NaiveDate::from_ymd_opt(2026, 2, 16).unwrap());
/// assert_eq!(period.end_date, NaiveDate::from_ymd_opt(2026, 2, 28).unwrap());
/// assert_eq!(period.total_days(), 13);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PayPeriod {
    /// The first day of the period (inclusive).
    pub start_date: NaiveDate,
    /// The last day of the period (inclusive).
    pub end_date: NaiveDate,
}

impl PayPeriod {
    /// Returns the period that encloses `date`.
    pub fn containing(date: NaiveDate) -> Self {
        let start_date = period_start(date);
        Self {
            start_date,
            end_date: period_end(start_date),
        }
    }

    /// Builds the period that begins on `start`.
    ///
    /// Returns [`EngineError::InvalidPeriodInput`] when `start` is not the 1st
    /// or the 16th of its month.
    pub fn from_start(start: NaiveDate) -> EngineResult<Self> {
        if start.day() != 1 && start.day() != 16 {
            return Err(EngineError::InvalidPeriodInput {
                input: start.to_string(),
                message: "a payroll period starts on the 1st or the 16th".to_string(),
            });
        }

        Ok(Self {
            start_date: start,
            end_date: period_end(start),
        })
    }

    /// The period immediately after this one.
    pub fn next(&self) -> EngineResult<Self> {
        Self::from_start(next_period_start(self.start_date)?)
    }

    /// The period immediately before this one.
    pub fn previous(&self) -> EngineResult<Self> {
        Self::from_start(previous_period_start(self.start_date)?)
    }

    /// Checks if a given date falls within this period (inclusive on both ends).
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Number of calendar days in the period (13 to 16).
    pub fn total_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }

    /// Every calendar day of the period, in order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> {
        let end_date = self.end_date;
        self.start_date.iter_days().take_while(move |d| *d <= end_date)
    }
}
