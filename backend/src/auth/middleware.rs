//! Middleware for protecting authenticated routes.
//!
//! The access token is read from the `access-token` header and verified with
//! the shared [`JwtUtils`]. On success the decoded [`Claims`] are inserted
//! into the request extensions for downstream handlers.

use crate::auth::errors::AuthError;
use crate::auth::service::authenticate;
use crate::utils::jwt::JwtUtils;
use axum::{Extension, extract::Request, middleware::Next, response::Response};
use std::sync::Arc;

/// Request header carrying the access token.
pub const ACCESS_TOKEN_HEADER: &str = "access-token";

/// JWT authentication middleware
pub async fn jwt_auth(
    Extension(jwt_utils): Extension<Arc<JwtUtils>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let presented = request
        .headers()
        .get(ACCESS_TOKEN_HEADER)
        .and_then(|header| header.to_str().ok());

    let claims = authenticate(&jwt_utils, presented)?;

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}
