//! Data models
//!
//! Structs that map to the PostgreSQL schema, plus the payment status
//! transition rules that guard them.

pub mod sale;
