//! Collection of general utility functions.
//!
//! Token signing and password hashing helpers shared by the auth flow and
//! the user service.

pub mod jwt;
pub mod password;
