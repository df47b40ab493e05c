//! Payroll Computation Engine for Philippine semi-monthly payroll
//!
//! This crate turns clock and attendance data and a reference date into a
//! half-month payroll period, per-day pay under the statutory day-type
//! multipliers, period base hours adjusted for absences and proration, and
//! SSS, Pag-IBIG and PhilHealth contributions. The [`calculation`] core is
//! pure and synchronous; [`api`] wraps it in an HTTP router for hosts that
//! want a service.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
