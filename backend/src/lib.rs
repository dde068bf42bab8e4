//! User accounts backend with login and JWT issuance.
//!
//! [`build_router`] assembles every route together with the shared state
//! (database pool, token utilities, password hasher) as request extensions.

pub mod api;
pub mod auth;
pub mod config;
pub mod database;
pub mod errors;
pub mod repositories;
pub mod services;
pub mod utils;

use crate::api::common::ApiResponse;
use crate::utils::jwt::JwtUtils;
use crate::utils::password::PasswordHasher;
use axum::{Extension, Router, response::Json, routing::get};
use sqlx::SqlitePool;
use std::sync::Arc;

/// Builds the application router.
pub fn build_router(
    pool: SqlitePool,
    jwt_utils: Arc<JwtUtils>,
    hasher: PasswordHasher,
) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .merge(auth::routes::auth_router())
        .merge(api::user::routes::user_router())
        .layer(Extension(pool))
        .layer(Extension(jwt_utils))
        .layer(Extension(hasher))
}

async fn root_handler() -> Json<ApiResponse<serde_json::Value>> {
    Json(ApiResponse::success(
        serde_json::json!({
            "service": "userauth-backend",
            "version": env!("CARGO_PKG_VERSION")
        }),
        "Welcome to the user accounts API",
    ))
}
