//! Data access layer.

pub mod user_repository;
