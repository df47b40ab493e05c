//! HTTP API module for the payroll engine.
//!
//! This module provides the REST API endpoints that wrap the period, day-pay,
//! base-hours, contribution and payslip calculations.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    BaseHoursRequest, ContributionsRequest, DayPayRequest, PayslipRequest, PeriodRequest,
};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
