//! Configuration loading and management for the payroll engine.
//!
//! This module loads payroll settings and holiday calendars from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/ph").unwrap();
//! println!("Loaded jurisdiction: {}", config.jurisdiction().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{HolidayCalendar, JurisdictionMetadata, PayrollConfig, PayrollSettings};
