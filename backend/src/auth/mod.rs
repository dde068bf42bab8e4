//! Authentication module for login, token issuance and access control.
//!
//! This module provides the public interface for logging users in, signing
//! their access tokens and guarding routes behind token authentication.

pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod service;
