//! Service configuration

pub mod environment;

pub use environment::*;
