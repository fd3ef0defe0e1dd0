//! Data models
//!
//! Structs that map to the PostgreSQL schema, plus the status
//! transition rules that guard them.

pub mod vehicle;
