//! HTTP API module for the payroll engine.
//!
//! This module provides REST endpoints for stateless payroll calculation,
//! daily hours calculation, storing employees, work logs, and the pay
//! policy, and running and retrieving stored payrolls.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    CalculationRequest, DailyEntryRequest, DailyHoursRequest, PayrollRunRequest,
    WorkLogEntriesRequest, WorkLogRequest,
};
pub use response::{ApiError, ApiErrorResponse, DailyHoursResponse};
pub use state::AppState;
