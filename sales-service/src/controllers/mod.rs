//! Controllers: request validation, payment transitions and the
//! cross-service notification flow

pub mod sale_controller;
