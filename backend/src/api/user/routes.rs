//! Defines the HTTP routes for user management.

use super::handlers::{create_user, delete_user, get_all_users, get_user_by_id, update_user};
use axum::{Router, routing::get};

pub fn user_router() -> Router {
    Router::new()
        .route("/user", get(get_all_users).post(create_user))
        .route(
            "/user/{id}",
            get(get_user_by_id).put(update_user).delete(delete_user),
        )
}
