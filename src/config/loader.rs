//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading payroll
//! configurations from YAML files.

use chrono::{Datelike, NaiveDate};
use std::fs;
use std::path::Path;

use crate::calculation::holiday_kind_on;
use crate::error::{EngineError, EngineResult};
use crate::models::{Holiday, HolidayKind, PayPeriod};

use super::types::{HolidayCalendar, JurisdictionMetadata, PayrollConfig, PayrollFile, PayrollSettings};

/// Loads and provides access to payroll configuration.
///
/// # Directory Structure
///
/// ```text
/// config/ph/
/// ├── payroll.yaml        # Jurisdiction metadata and settings
/// └── holidays/
///     └── 2026.yaml       # Holidays declared for a calendar year
/// ```
///
/// The `holidays/` directory is optional; without it no holidays are declared.
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
/// use chrono::NaiveDate;
///
/// let loader = ConfigLoader::load("./config/ph").unwrap();
/// let date = NaiveDate::from_ymd_opt(2026, 12, 25).unwrap();
/// println!("Christmas declared: {:?}", loader.holiday_on(date));
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: PayrollConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if `payroll.yaml` is missing, if any file contains
    /// invalid YAML, if a holiday falls outside its file's year, or if a
    /// setting is out of range.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let payroll_path = path.join("payroll.yaml");
        let payroll = Self::load_yaml::<PayrollFile>(&payroll_path)?;
        payroll.settings.validate()?;

        let holidays = Self::load_holidays(&path.join("holidays"))?;

        let config = PayrollConfig::new(payroll.jurisdiction, payroll.settings, holidays);
        Ok(Self { config })
    }

    /// Builds a loader from in-memory parts, bypassing the filesystem.
    pub fn from_parts(
        jurisdiction: JurisdictionMetadata,
        settings: PayrollSettings,
        holidays: Vec<Holiday>,
    ) -> EngineResult<Self> {
        settings.validate()?;
        Ok(Self {
            config: PayrollConfig::new(jurisdiction, settings, holidays),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads every holiday calendar file from the holidays directory.
    fn load_holidays(holidays_dir: &Path) -> EngineResult<Vec<Holiday>> {
        if !holidays_dir.exists() {
            return Ok(Vec::new());
        }

        let holidays_dir_str = holidays_dir.display().to_string();
        let entries = fs::read_dir(holidays_dir).map_err(|_| EngineError::ConfigNotFound {
            path: holidays_dir_str.clone(),
        })?;

        let mut holidays = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: holidays_dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                let calendar = Self::load_yaml::<HolidayCalendar>(&path)?;
                if let Some(stray) = calendar
                    .holidays
                    .iter()
                    .find(|h| h.date.year() != calendar.year)
                {
                    return Err(EngineError::ConfigParseError {
                        path: path.display().to_string(),
                        message: format!(
                            "holiday '{}' on {} is outside year {}",
                            stray.name, stray.date, calendar.year
                        ),
                    });
                }
                holidays.extend(calendar.holidays);
            }
        }

        Ok(holidays)
    }

    /// Returns the underlying payroll configuration.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Returns the jurisdiction metadata.
    pub fn jurisdiction(&self) -> &JurisdictionMetadata {
        self.config.jurisdiction()
    }

    /// Returns the payroll settings.
    pub fn settings(&self) -> &PayrollSettings {
        self.config.settings()
    }

    /// Returns the kind of holiday declared on `date`, if any.
    ///
    /// When a date carries both a regular and a special declaration, the
    /// regular holiday wins.
    pub fn holiday_on(&self, date: NaiveDate) -> Option<HolidayKind> {
        holiday_kind_on(self.config.holidays(), date)
    }

    /// Holidays declared between `start` and `end` inclusive.
    pub fn holidays_between(&self, start: NaiveDate, end: NaiveDate) -> Vec<Holiday> {
        self.config.holidays_between(start, end)
    }

    /// Holidays declared inside `period`.
    pub fn holidays_in(&self, period: &PayPeriod) -> Vec<Holiday> {
        self.config.holidays_in(period)
    }
}
