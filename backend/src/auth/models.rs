//! Data structures for the authentication flow.
//!
//! Request and response payloads for login, plus the `data` section of the
//! `/me` response.

use crate::database::models::User;
use serde::{Deserialize, Serialize};

/// Login request payload
///
/// Empty strings are accepted and fail at lookup or verification.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// `data` section of a successful login response
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
}

/// `data` section of the `/me` response
#[derive(Debug, Serialize)]
pub struct CurrentUser {
    pub user: User,
}
