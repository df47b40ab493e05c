//! Configuration types for payroll computation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files. Statutory rate tables are
//! not configuration; they live as static data beside the code that reads them.

use chrono::{FixedOffset, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{Holiday, PayPeriod};

/// Metadata about the jurisdiction the configuration targets.
#[derive(Debug, Clone, Deserialize)]
pub struct JurisdictionMetadata {
    /// Short jurisdiction code (e.g., "PH").
    pub code: String,
    /// Human-readable jurisdiction name.
    pub name: String,
    /// The version or effective date of the configuration.
    pub version: String,
}

/// Tunable payroll settings.
///
/// Every field has a default, so `PayrollSettings::default()` is usable
/// without any configuration files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayrollSettings {
    /// Fixed offset (hours east of UTC) of the employees' civil day.
    pub civil_day_offset_hours: i32,
    /// Length of a standard working day in hours.
    pub standard_day_hours: Decimal,
    /// Number of standard working days in a full half-month period.
    pub standard_period_days: Decimal,
    /// Working days per month used to derive a monthly salary from a daily rate.
    pub working_days_per_month: Decimal,
    /// Local hour at which the night window opens.
    pub night_window_start_hour: u32,
    /// Local hour at which the night window closes (on the following day).
    pub night_window_end_hour: u32,
}

impl Default for PayrollSettings {
    fn default() -> Self {
        Self {
            civil_day_offset_hours: 8,
            standard_day_hours: Decimal::from(8),
            standard_period_days: Decimal::from(13),
            working_days_per_month: Decimal::from(22),
            night_window_start_hour: 22,
            night_window_end_hour: 6,
        }
    }
}

impl PayrollSettings {
    /// The fixed offset used to bucket timestamps into civil days.
    pub fn civil_day_offset(&self) -> EngineResult<FixedOffset> {
        FixedOffset::east_opt(self.civil_day_offset_hours * 3600).ok_or_else(|| {
            EngineError::InvalidConfig {
                field: "civil_day_offset_hours".to_string(),
                message: format!(
                    "{} is not a valid UTC offset in hours",
                    self.civil_day_offset_hours
                ),
            }
        })
    }

    /// Base hours of a full, unprorated period (13 × 8 = 104 by default).
    pub fn full_period_hours(&self) -> Decimal {
        self.standard_period_days * self.standard_day_hours
    }

    /// Checks that every setting is in range.
    pub fn validate(&self) -> EngineResult<()> {
        if !(-12..=14).contains(&self.civil_day_offset_hours) {
            return Err(EngineError::InvalidConfig {
                field: "civil_day_offset_hours".to_string(),
                message: "must be between -12 and 14".to_string(),
            });
        }
        if self.standard_day_hours <= Decimal::ZERO {
            return Err(EngineError::InvalidConfig {
                field: "standard_day_hours".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        if self.standard_period_days <= Decimal::ZERO {
            return Err(EngineError::InvalidConfig {
                field: "standard_period_days".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        if self.working_days_per_month <= Decimal::ZERO {
            return Err(EngineError::InvalidConfig {
                field: "working_days_per_month".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        if self.night_window_start_hour > 23 || self.night_window_end_hour > 23 {
            return Err(EngineError::InvalidConfig {
                field: "night_window".to_string(),
                message: "hours must be between 0 and 23".to_string(),
            });
        }
        Ok(())
    }
}

/// Main configuration file structure (`payroll.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct PayrollFile {
    /// Jurisdiction metadata.
    pub jurisdiction: JurisdictionMetadata,
    /// Payroll settings.
    #[serde(default)]
    pub settings: PayrollSettings,
}

/// A holiday calendar file (`holidays/<year>.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct HolidayCalendar {
    /// The calendar year the file declares.
    pub year: i32,
    /// Declared holidays for that year.
    pub holidays: Vec<Holiday>,
}

/// The complete payroll configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct PayrollConfig {
    /// Jurisdiction metadata.
    metadata: JurisdictionMetadata,
    /// Payroll settings.
    settings: PayrollSettings,
    /// Declared holidays (sorted by date).
    holidays: Vec<Holiday>,
}

impl PayrollConfig {
    /// Creates a new PayrollConfig from its component parts.
    pub fn new(
        metadata: JurisdictionMetadata,
        settings: PayrollSettings,
        holidays: Vec<Holiday>,
    ) -> Self {
        let mut sorted_holidays = holidays;
        sorted_holidays.sort_by(|a, b| a.date.cmp(&b.date));
        Self {
            metadata,
            settings,
            holidays: sorted_holidays,
        }
    }

    /// Returns the jurisdiction metadata.
    pub fn jurisdiction(&self) -> &JurisdictionMetadata {
        &self.metadata
    }

    /// Returns the payroll settings.
    pub fn settings(&self) -> &PayrollSettings {
        &self.settings
    }

    /// Returns every declared holiday, sorted by date.
    pub fn holidays(&self) -> &[Holiday] {
        &self.holidays
    }

    /// Declared holidays between `start` and `end` inclusive.
    pub fn holidays_between(&self, start: NaiveDate, end: NaiveDate) -> Vec<Holiday> {
        self.holidays
            .iter()
            .filter(|h| h.date >= start && h.date <= end)
            .cloned()
            .collect()
    }

    /// Declared holidays falling inside `period`.
    pub fn holidays_in(&self, period: &PayPeriod) -> Vec<Holiday> {
        self.holidays_between(period.start_date, period.end_date)
    }
}
