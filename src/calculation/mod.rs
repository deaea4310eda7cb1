//! Calculation logic for the payroll engine.
//!
//! This module contains the work-hour side (daily hours from entry and exit
//! times, monthly aggregation of a work log) and the payroll side: hourly
//! rate, hour-based pay, allowances, lateness, insurance, progressive tax,
//! and net pay, chained together by [`calculate_payroll`].

mod allowances;
mod daily_hours;
mod hourly_rate;
mod insurance;
mod lateness;
mod net_pay;
mod pay_components;
mod payroll;
mod tax;
mod time_of_day;
mod validation;
mod work_hours;

pub use allowances::{AllowancesResult, calculate_allowances};
pub use daily_hours::calculate_daily_hours;
pub use hourly_rate::{HourlyRate, HourlyRateResult, calculate_hourly_rate};
pub use insurance::{InsuranceResult, calculate_insurance};
pub use lateness::{INVALID_TIME_WARNING, LatenessResult, calculate_lateness_deduction};
pub use net_pay::{NET_PAY_FLOORED_WARNING, NetPayResult, calculate_net_pay};
pub use pay_components::{PayComponentsResult, calculate_pay_components};
pub use payroll::calculate_payroll;
pub use tax::{TaxResult, calculate_tax};
pub use time_of_day::{MINUTES_PER_DAY, parse_time_of_day};
pub use validation::{validate_pay_policy, validate_payroll_input};
pub use work_hours::{WorkHoursAggregation, aggregate_work_log};
