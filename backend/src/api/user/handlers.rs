//! Handler functions for user management API endpoints.
//!
//! These functions process create, list, get, update and delete requests for
//! users and shape the results into the standard response envelope.

use crate::api::common::{
    ApiError, ApiResponse, error_response, json_rejection_to_http, service_error_to_http,
    validation_error_response,
};
use crate::database::models::{CreateNewUser, UpdateUser, User};
use crate::errors::ServiceError;
use crate::services::user_service::UserService;
use crate::utils::password::PasswordHasher;
use axum::{
    extract::{Extension, Json, Path, rejection::JsonRejection},
    http::StatusCode,
};
use serde::Serialize;
use sqlx::SqlitePool;
use validator::Validate;

const USER_NOT_FOUND: &str = "Failed to find user - user not found.";

/// `data` section for single-user responses
#[derive(Debug, Serialize)]
pub struct UserData {
    pub user: User,
}

/// `data` section for the user listing
#[derive(Debug, Serialize)]
pub struct UsersData {
    pub users: Vec<User>,
}

fn user_error_to_http(error: ServiceError) -> ApiError {
    match error {
        ServiceError::NotFound { .. } => error_response(StatusCode::NOT_FOUND, USER_NOT_FOUND),
        other => service_error_to_http(other),
    }
}

/// Creates a user.
#[axum::debug_handler]
pub async fn create_user(
    Extension(pool): Extension<SqlitePool>,
    Extension(hasher): Extension<PasswordHasher>,
    payload: Result<Json<CreateNewUser>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<UserData>>), ApiError> {
    let Json(payload) = payload.map_err(json_rejection_to_http)?;
    if let Err(errors) = payload.validate() {
        return Err(validation_error_response(&errors));
    }

    tracing::info!("Creating user: {}", payload.username);

    let user_service = UserService::new(&pool, hasher);
    let user = user_service
        .create_user(payload)
        .await
        .map_err(user_error_to_http)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            UserData { user },
            "User created successfully!",
        )),
    ))
}

/// Lists all users.
#[axum::debug_handler]
pub async fn get_all_users(
    Extension(pool): Extension<SqlitePool>,
    Extension(hasher): Extension<PasswordHasher>,
) -> Result<Json<ApiResponse<UsersData>>, ApiError> {
    let user_service = UserService::new(&pool, hasher);
    let users = user_service
        .get_all_users()
        .await
        .map_err(user_error_to_http)?;

    Ok(Json(ApiResponse::success(
        UsersData { users },
        "Successfully retrieved all users!",
    )))
}

/// Retrieves a user by its ID.
#[axum::debug_handler]
pub async fn get_user_by_id(
    Extension(pool): Extension<SqlitePool>,
    Extension(hasher): Extension<PasswordHasher>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<UserData>>, ApiError> {
    let user_service = UserService::new(&pool, hasher);
    let user = user_service.get_user_required(&id).await.map_err(|e| {
        tracing::debug!("User not found for ID {}: {}", id, e);
        user_error_to_http(e)
    })?;

    Ok(Json(ApiResponse::success(
        UserData { user },
        format!("User (id: {}) successfully retrieved.", id),
    )))
}

/// Replaces a user's username, email and password.
#[axum::debug_handler]
pub async fn update_user(
    Extension(pool): Extension<SqlitePool>,
    Extension(hasher): Extension<PasswordHasher>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateUser>, JsonRejection>,
) -> Result<Json<ApiResponse<UserData>>, ApiError> {
    let Json(payload) = payload.map_err(json_rejection_to_http)?;
    if let Err(errors) = payload.validate() {
        return Err(validation_error_response(&errors));
    }

    let user_service = UserService::new(&pool, hasher);
    let user = user_service
        .update_user(&id, payload)
        .await
        .map_err(user_error_to_http)?;

    Ok(Json(ApiResponse::success(
        UserData { user },
        format!("Successfully updated user (id: {})!", id),
    )))
}

/// Deletes a user.
#[axum::debug_handler]
pub async fn delete_user(
    Extension(pool): Extension<SqlitePool>,
    Extension(hasher): Extension<PasswordHasher>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let user_service = UserService::new(&pool, hasher);
    user_service
        .delete_user(&id)
        .await
        .map_err(user_error_to_http)?;

    Ok(StatusCode::NO_CONTENT)
}
