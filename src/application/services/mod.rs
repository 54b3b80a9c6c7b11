//! Application services - Orchestration of domain logic

pub mod validation_service;

pub use validation_service::ValidationService;
