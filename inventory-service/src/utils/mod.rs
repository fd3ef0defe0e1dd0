//! Shared utilities
//!
//! Error types and validation helpers used across the service.

pub mod errors;
pub mod validation;
