//! Core business logic for the authentication system.
//!
//! Login looks the user up in a [`CredentialStore`], checks the password and
//! signs an access token. Token authentication verifies a presented token
//! with the same [`JwtUtils`] that issued it.

use crate::auth::errors::AuthError;
use crate::auth::models::{LoginRequest, LoginResponse};
use crate::repositories::user_repository::CredentialStore;
use crate::utils::jwt::{Claims, JwtUtils, TokenSubject};
use crate::utils::password::verify_password_async;

/// Authentication service for handling login and token validation
pub struct AuthService<'a, S: CredentialStore + ?Sized> {
    store: &'a S,
    jwt_utils: &'a JwtUtils,
}

impl<'a, S: CredentialStore + ?Sized> AuthService<'a, S> {
    /// Create a new AuthService instance
    pub fn new(store: &'a S, jwt_utils: &'a JwtUtils) -> Self {
        AuthService { store, jwt_utils }
    }

    /// Authenticate a user and issue an access token for `{id, username}`.
    ///
    /// # Errors
    /// - `AuthError::NotFound` if no user has the username
    /// - `AuthError::Unauthorized` if the password does not match
    /// - `AuthError::SigningFailure` if the token cannot be signed
    pub async fn login(&self, login_request: LoginRequest) -> Result<LoginResponse, AuthError> {
        let LoginRequest { username, password } = login_request;

        let user = self
            .store
            .find_by_username(&username)
            .await
            .map_err(AuthError::Store)?
            .ok_or_else(|| {
                tracing::info!("Login failed: unknown username {}", username);
                AuthError::NotFound {
                    username: username.clone(),
                }
            })?;

        if !verify_password_async(password, user.password_hash.clone()).await {
            tracing::info!(user_id = %user.id, "Login failed: incorrect password");
            return Err(AuthError::Unauthorized);
        }

        let access_token = self
            .jwt_utils
            .generate_token(TokenSubject {
                id: user.id.clone(),
                username: user.username,
            })
            .map_err(|e| AuthError::SigningFailure(e.to_string()))?;

        tracing::info!(user_id = %user.id, "Login succeeded");
        Ok(LoginResponse { access_token })
    }
}

/// Validate a presented access token.
///
/// Every failure is reported as `AuthError::Unauthenticated`; the reason is
/// only logged.
pub fn authenticate(jwt_utils: &JwtUtils, presented: Option<&str>) -> Result<Claims, AuthError> {
    let token = presented
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            tracing::debug!("Rejected request without access token");
            AuthError::Unauthenticated
        })?;

    jwt_utils.validate_token(token).map_err(|e| {
        tracing::debug!("Rejected access token: {}", e);
        AuthError::Unauthenticated
    })
}
