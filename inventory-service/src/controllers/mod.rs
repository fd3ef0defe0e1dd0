//! Controllers: request validation and status transition rules

pub mod vehicle_controller;
