//! CRUD repositories over PostgreSQL

pub mod vehicle_repository;
