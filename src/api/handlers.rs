//! HTTP request handlers for the payroll engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::collections::BTreeSet;
use std::str::FromStr;
use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    BaseHoursResult, DayHours, calculate_base_hours, calculate_contributions, calculate_day_pay,
    compose_payslip, resolve_period, validate_monthly_salary, worked_dates,
};
use crate::config::ConfigLoader;
use crate::error::EngineResult;
use crate::models::{ClockInterval, DayType, Payslip, ensure_single_open_interval};

use super::request::{
    BaseHoursRequest, ContributionsRequest, DayPayRequest, PayslipRequest, PeriodRequest,
};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/period", post(period_handler))
        .route("/day-pay", post(day_pay_handler))
        .route("/base-hours", post(base_hours_handler))
        .route("/contributions", post(contributions_handler))
        .route("/payslip", post(payslip_handler))
        .with_state(state)
}

/// Maps a JSON extraction failure to a 400 response.
fn rejection_response(rejection: JsonRejection, correlation_id: Uuid) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's description of the problem
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse::bad_request(error).into_response()
}

/// Turns an engine result into a JSON response.
fn respond<T: Serialize>(correlation_id: Uuid, endpoint: &str, result: EngineResult<T>) -> Response {
    match result {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            Json(body),
        )
            .into_response(),
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                endpoint = endpoint,
                error = %err,
                "Request failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for POST /period.
async fn period_handler(payload: Result<Json<PeriodRequest>, JsonRejection>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing period request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    respond(correlation_id, "period", resolve_period(&request.reference_date))
}

/// Handler for POST /day-pay.
///
/// Unlike the label-based calculation, an unknown day type is rejected here.
async fn day_pay_handler(payload: Result<Json<DayPayRequest>, JsonRejection>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing day-pay request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    if let Some(field) = request.negative_field() {
        warn!(correlation_id = %correlation_id, field = field, "Negative day-pay input");
        return ApiErrorResponse::bad_request(ApiError::negative_value(field)).into_response();
    }

    let result = DayType::from_str(&request.day_type).map(|day_type| {
        calculate_day_pay(
            day_type,
            DayHours {
                regular: request.regular_hours,
                overtime: request.overtime_hours,
                night_diff: request.night_diff_hours,
            },
            request.rate_per_hour,
        )
    });

    respond(correlation_id, "day-pay", result)
}

/// Handler for POST /base-hours.
async fn base_hours_handler(
    State(state): State<AppState>,
    payload: Result<Json<BaseHoursRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing base-hours request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    respond(
        correlation_id,
        "base-hours",
        perform_base_hours(request, state.config()),
    )
}

/// Computes base hours for one employee from a request.
fn perform_base_hours(
    request: BaseHoursRequest,
    config: &ConfigLoader,
) -> EngineResult<BaseHoursResult> {
    ensure_single_open_interval(&request.clock_intervals)?;

    let period = resolve_period(&request.reference_date)?;
    let settings = config.settings();
    let offset = settings.civil_day_offset()?;

    let intervals: Vec<ClockInterval> = request
        .clock_intervals
        .into_iter()
        .filter(|i| i.employee_ref == request.employee_ref)
        .collect();
    let holidays = request
        .holidays
        .unwrap_or_else(|| config.holidays_in(&period));
    let holiday_dates: BTreeSet<NaiveDate> = holidays
        .iter()
        .map(|h| h.date)
        .filter(|d| period.contains_date(*d))
        .collect();

    Ok(calculate_base_hours(
        &period,
        &worked_dates(&intervals, offset),
        &request.rest_days,
        &holiday_dates,
        &request.employment,
        settings,
    ))
}

/// Handler for POST /contributions.
async fn contributions_handler(
    payload: Result<Json<ContributionsRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing contributions request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let result = validate_monthly_salary(request.monthly_salary).map(calculate_contributions);
    respond(correlation_id, "contributions", result)
}

/// Handler for POST /payslip.
async fn payslip_handler(
    State(state): State<AppState>,
    payload: Result<Json<PayslipRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payslip request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let start_time = Instant::now();
    let result = perform_payslip(request, state.config());
    if let Ok(payslip) = &result {
        info!(
            correlation_id = %correlation_id,
            employee_ref = %payslip.employee_ref,
            days_count = payslip.days.len(),
            gross_pay = %payslip.totals.gross_pay,
            duration_us = start_time.elapsed().as_micros(),
            "Payslip composed successfully"
        );
    }

    respond(correlation_id, "payslip", result)
}

/// Composes a payslip from a request, using the configured holidays when the
/// request declares none.
fn perform_payslip(request: PayslipRequest, config: &ConfigLoader) -> EngineResult<Payslip> {
    ensure_single_open_interval(&request.clock_intervals)?;

    let period = resolve_period(&request.reference_date)?;
    let input = request.into_input(config.holidays_in(&period));
    compose_payslip(&input, config.settings())
}
