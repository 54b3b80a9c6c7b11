//! Application layer - application services
//!
//! This module contains the services that orchestrate rule-set lookup,
//! validation and logging for callers handling requests.

pub mod services;

pub use services::*;
