//! HTTP request handlers for the payroll API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    routing::{get, post, put},
};
use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    aggregate_work_log, calculate_daily_hours, calculate_payroll, validate_pay_policy,
};
use crate::config::{PayPolicy, StatutoryConfig};
use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, PayrollInput, PayrollRecord, WorkLog, parse_period};

use super::request::{
    CalculationRequest, DailyHoursRequest, PayrollRunRequest, WorkLogEntriesRequest,
    WorkLogRequest,
};
use super::response::{ApiError, ApiErrorResponse, DailyHoursResponse};
use super::state::AppState;

type ApiResult<T> = Result<T, ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/work-hours/daily", post(daily_hours_handler))
        .route("/employees/:id", put(put_employee_handler))
        .route("/employees/:id/payroll/:period", post(run_payroll_handler))
        .route("/work-logs/:employee_id/:period", put(put_work_log_handler))
        .route("/settings/pay-policy", put(put_pay_policy_handler))
        .route("/payrolls/:record_id", get(get_payroll_handler))
        .with_state(state)
}

/// Handler for POST /calculate.
///
/// Calculates a payroll from an employee, a work log, and an optional policy
/// override without touching the store.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> ApiResult<Json<PayrollRecord>> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = extract(correlation_id, payload)?;
    let policy = request
        .policy
        .unwrap_or_else(|| state.config().policy().clone());
    let employee = request.employee;

    let start_time = Instant::now();
    let result = request
        .work_log
        .into_work_log(employee.id.clone())
        .and_then(|log| {
            perform_calculation(
                &employee,
                &log,
                &policy,
                state.config().statutory(),
                request.other_deductions,
            )
        });

    match result {
        Ok(record) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %employee.id,
                gross_pay = %record.result.gross_pay,
                net_pay = %record.result.net_pay,
                duration_us = start_time.elapsed().as_micros(),
                "Calculation completed successfully"
            );
            Ok(Json(record))
        }
        Err(err) => Err(failed(correlation_id, err)),
    }
}

/// Handler for POST /work-hours/daily.
async fn daily_hours_handler(
    payload: Result<Json<DailyHoursRequest>, JsonRejection>,
) -> ApiResult<Json<DailyHoursResponse>> {
    let correlation_id = Uuid::new_v4();
    let request = extract(correlation_id, payload)?;

    let hours_worked =
        calculate_daily_hours(request.entry_time.as_deref(), request.exit_time.as_deref())
            .map_err(|err| failed(correlation_id, err))?;

    Ok(Json(DailyHoursResponse { hours_worked }))
}

/// Handler for PUT /employees/:id.
async fn put_employee_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<Employee>, JsonRejection>,
) -> ApiResult<Json<Employee>> {
    let correlation_id = Uuid::new_v4();
    let employee = extract(correlation_id, payload)?;

    if employee.id != id {
        warn!(correlation_id = %correlation_id, path_id = %id, body_id = %employee.id, "Employee id mismatch");
        return Err(ApiErrorResponse::bad_request(ApiError::with_details(
            "ID_MISMATCH",
            format!("Body id '{}' does not match path id '{}'", employee.id, id),
            "The employee id in the body must equal the id in the URL",
        )));
    }

    state
        .store()
        .put_employee(&employee)
        .map_err(|err| failed(correlation_id, err))?;
    info!(correlation_id = %correlation_id, employee_id = %employee.id, "Employee stored");
    Ok(Json(employee))
}

/// Handler for PUT /work-logs/:employee_id/:period.
///
/// The log is validated before it is stored so that a payroll run never
/// meets a malformed log.
async fn put_work_log_handler(
    State(state): State<AppState>,
    Path((employee_id, period)): Path<(String, String)>,
    payload: Result<Json<WorkLogEntriesRequest>, JsonRejection>,
) -> ApiResult<Json<WorkLog>> {
    let correlation_id = Uuid::new_v4();
    let request = extract(correlation_id, payload)?;

    let log = WorkLogRequest {
        period,
        entries: request.entries,
    }
    .into_work_log(employee_id)
    .and_then(|log| {
        log.period_start()?;
        aggregate_work_log(&log, 1)?;
        state.store().put_work_log(&log)?;
        Ok(log)
    })
    .map_err(|err| failed(correlation_id, err))?;

    info!(
        correlation_id = %correlation_id,
        employee_id = %log.employee_id,
        period = %log.period,
        entries = log.entries.len(),
        "Work log stored"
    );
    Ok(Json(log))
}

/// Handler for PUT /settings/pay-policy.
///
/// The policy is validated before it is stored, so stored payroll runs never
/// fail on the policy alone.
async fn put_pay_policy_handler(
    State(state): State<AppState>,
    payload: Result<Json<PayPolicy>, JsonRejection>,
) -> ApiResult<Json<PayPolicy>> {
    let correlation_id = Uuid::new_v4();
    let policy = extract(correlation_id, payload)?;

    validate_pay_policy(&policy).map_err(|err| failed(correlation_id, err))?;
    state
        .store()
        .put_pay_policy(&policy)
        .map_err(|err| failed(correlation_id, err))?;
    info!(correlation_id = %correlation_id, "Pay policy stored");
    Ok(Json(policy))
}

/// Handler for POST /employees/:id/payroll/:period.
///
/// Loads the employee, work log, and pay policy from the store, calculates
/// the payroll, and persists the resulting record.
async fn run_payroll_handler(
    State(state): State<AppState>,
    Path((employee_id, period)): Path<(String, String)>,
    payload: Result<Json<PayrollRunRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<PayrollRecord>)> {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        employee_id = %employee_id,
        period = %period,
        "Processing payroll run"
    );
    let request = extract(correlation_id, payload)?;

    let start_time = Instant::now();
    let record = run_stored_payroll(&state, &employee_id, &period, request.other_deductions)
        .map_err(|err| failed(correlation_id, err))?;

    info!(
        correlation_id = %correlation_id,
        employee_id = %employee_id,
        record_id = %record.record_id,
        gross_pay = %record.result.gross_pay,
        net_pay = %record.result.net_pay,
        duration_us = start_time.elapsed().as_micros(),
        "Payroll run stored"
    );
    Ok((StatusCode::CREATED, Json(record)))
}

/// Handler for GET /payrolls/:record_id.
async fn get_payroll_handler(
    State(state): State<AppState>,
    Path(record_id): Path<String>,
) -> ApiResult<Json<PayrollRecord>> {
    let correlation_id = Uuid::new_v4();

    let record = Uuid::parse_str(&record_id)
        .map_err(|_| EngineError::RecordNotFound {
            id: record_id.clone(),
        })
        .and_then(|id| state.store().payroll(id))
        .map_err(|err| failed(correlation_id, err))?;

    Ok(Json(record))
}

/// Aggregates a work log and calculates the payroll record for it.
fn perform_calculation(
    employee: &Employee,
    log: &WorkLog,
    policy: &PayPolicy,
    statutory: &StatutoryConfig,
    other_deductions: Decimal,
) -> EngineResult<PayrollRecord> {
    log.period_start()?;
    let aggregation = aggregate_work_log(log, 1)?;
    let input = PayrollInput::new(aggregation.totals, employee, policy, other_deductions);
    let result = calculate_payroll(&input, statutory)?;
    Ok(PayrollRecord::new(employee, log.period.clone(), result))
}

fn run_stored_payroll(
    state: &AppState,
    employee_id: &str,
    period: &str,
    other_deductions: Decimal,
) -> EngineResult<PayrollRecord> {
    parse_period(period)?;
    let store = state.store();

    let employee = store.employee(employee_id)?;
    let log = store.work_log(employee_id, period)?;
    let policy = match store.pay_policy()? {
        Some(policy) => policy,
        None => state.config().policy().clone(),
    };

    let record = perform_calculation(
        &employee,
        &log,
        &policy,
        state.config().statutory(),
        other_deductions,
    )?;
    store.save_payroll(&record)?;
    Ok(record)
}

fn extract<T>(correlation_id: Uuid, payload: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    match payload {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::new("VALIDATION_ERROR", body_text)
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
            Err(ApiErrorResponse::bad_request(error))
        }
    }
}

fn failed(correlation_id: Uuid, err: EngineError) -> ApiErrorResponse {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Request failed"
    );
    err.into()
}
