//! CRUD repositories over PostgreSQL

pub mod sale_repository;
