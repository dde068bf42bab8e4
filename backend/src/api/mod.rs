//! Central module for organizing the application's API endpoints.
//!
//! Holds the shared response envelope and the user management routes;
//! authentication routes live in `crate::auth`.

pub mod common;
pub mod user;
