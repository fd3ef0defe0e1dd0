//! Outbound HTTP clients

pub mod inventory_client;
