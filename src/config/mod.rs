//! Configuration loading and management for the payroll engine.
//!
//! This module provides functionality to load the default pay policy and the
//! statutory constants (standard monthly hours, tax brackets) from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use estate_payroll::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Overtime multiplier: {}", config.policy().overtime_multiplier);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    DEFAULT_STANDARD_MONTHLY_HOURS, PayPolicy, PayrollConfig, StatutoryConfig, TaxBracket,
    TaxTable,
};
