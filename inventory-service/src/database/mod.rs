//! Database module
//!
//! Handles the PostgreSQL connection pool and migrations.

pub mod connection;

pub use connection::{create_pool, run_migrations};
