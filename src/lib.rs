//! Payroll engine for residential-estate personnel.
//!
//! This crate turns a month of logged work hours and a configured pay policy
//! into an itemized payroll: hour-based pay, allowances, insurance,
//! progressive income tax, lateness penalty, and net pay, each step recorded
//! in an audit trace. Around that core it provides YAML configuration, a
//! document store abstraction, and an HTTP API.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
