//! Handler functions for authentication-related API endpoints.
//!
//! These functions parse incoming requests for login, logout and the current
//! identity, and delegate to `auth::service` for the actual checks.

use crate::api::common::{ApiError, ApiResponse, error_response, service_error_to_http};
use crate::auth::errors::AuthError;
use crate::auth::models::*;
use crate::auth::service::AuthService;
use crate::errors::ServiceError;
use crate::repositories::user_repository::UserRepository;
use crate::services::user_service::UserService;
use crate::utils::jwt::{Claims, JwtUtils};
use crate::utils::password::PasswordHasher;
use axum::{
    extract::{Extension, Json, rejection::JsonRejection},
    http::StatusCode,
};
use sqlx::SqlitePool;
use std::sync::Arc;

/// Handle user login request
#[axum::debug_handler]
pub async fn login(
    Extension(pool): Extension<SqlitePool>,
    Extension(jwt_utils): Extension<Arc<JwtUtils>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<LoginResponse>>, AuthError> {
    let Json(payload) = payload?;
    let store = UserRepository::new(&pool);
    let auth_service = AuthService::new(&store, jwt_utils.as_ref());

    let response = auth_service.login(payload).await?;
    Ok(Json(ApiResponse::success(response, "Logged in successfully!")))
}

/// Handle logout request
///
/// Tokens are stateless and expire on their own; the client drops its copy.
#[axum::debug_handler]
pub async fn logout() -> Json<ApiResponse<()>> {
    Json(ApiResponse::message("Logged out successfully"))
}

/// Get the authenticated user's record
#[axum::debug_handler]
pub async fn me(
    Extension(pool): Extension<SqlitePool>,
    Extension(hasher): Extension<PasswordHasher>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<ApiResponse<CurrentUser>>, ApiError> {
    let user_service = UserService::new(&pool, hasher);

    let user = user_service
        .get_user_required(claims.user_id())
        .await
        .map_err(|error| match error {
            ServiceError::NotFound { .. } => {
                error_response(StatusCode::NOT_FOUND, "Failed to find user - user not found.")
            }
            other => service_error_to_http(other),
        })?;

    Ok(Json(ApiResponse::success(
        CurrentUser { user },
        "Authenticated user retrieved successfully",
    )))
}
