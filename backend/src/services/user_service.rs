//! User business logic service.
//!
//! Handles validation, uniqueness checks and password hashing around the
//! user repository.

use crate::database::models::{CreateNewUser, CreateUser, UpdateUser, User, UserChanges};
use crate::errors::{ServiceError, ServiceResult, format_validation_errors};
use crate::repositories::user_repository::UserRepository;
use crate::utils::password::PasswordHasher;
use sqlx::SqlitePool;
use uuid::Uuid;
use validator::Validate;

pub struct UserService<'a> {
    /// Shared database connection pool
    pool: &'a SqlitePool,
    hasher: PasswordHasher,
}

impl<'a> UserService<'a> {
    /// Creates a new UserService instance.
    ///
    /// # Arguments
    /// * `pool` - Reference to SQLite connection pool
    /// * `hasher` - bcrypt settings used for new and changed passwords
    pub fn new(pool: &'a SqlitePool, hasher: PasswordHasher) -> Self {
        Self { pool, hasher }
    }

    /// Creates a new user with full validation.
    ///
    /// # Errors
    /// Returns `ServiceError` for:
    /// - Validation failures
    /// - A username or email that is already taken
    /// - Hashing or database failures
    pub async fn create_user(&self, create_user: CreateNewUser) -> ServiceResult<User> {
        if let Err(validation_errors) = create_user.validate() {
            return Err(ServiceError::validation(format_validation_errors(
                &validation_errors,
            )));
        }

        let repo = UserRepository::new(self.pool);

        if repo
            .get_user_by_username(&create_user.username)
            .await?
            .is_some()
        {
            return Err(ServiceError::already_exists("User", &create_user.username));
        }

        if repo.get_user_by_email(&create_user.email).await?.is_some() {
            return Err(ServiceError::already_exists("User", &create_user.email));
        }

        let password_hash = self.hasher.hash_async(create_user.password).await?;
        let username = create_user.username.clone();

        let data = CreateUser {
            id: Uuid::now_v7().to_string(),
            username: create_user.username,
            email: create_user.email,
            password_hash,
        };

        let user = repo
            .create_user(data)
            .await
            .map_err(|e| map_write_error(e, &username))?;

        tracing::info!(user_id = %user.id, "Created user {}", user.username);
        Ok(user)
    }

    /// Lists all users.
    pub async fn get_all_users(&self) -> ServiceResult<Vec<User>> {
        let repo = UserRepository::new(self.pool);
        Ok(repo.get_all_users().await?)
    }

    /// Retrieves a user by ID with existence verification.
    ///
    /// # Errors
    /// Returns `ServiceError::NotFound` if user doesn't exist
    pub async fn get_user_required(&self, id: &str) -> ServiceResult<User> {
        let repo = UserRepository::new(self.pool);
        let user = repo
            .get_user_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", id))?;
        Ok(user)
    }

    /// Replaces a user's username, email and password. The ID never changes.
    pub async fn update_user(&self, id: &str, update: UpdateUser) -> ServiceResult<User> {
        if let Err(validation_errors) = update.validate() {
            return Err(ServiceError::validation(format_validation_errors(
                &validation_errors,
            )));
        }

        let repo = UserRepository::new(self.pool);

        if repo.get_user_by_id(id).await?.is_none() {
            return Err(ServiceError::not_found("User", id));
        }

        if let Some(existing) = repo.get_user_by_username(&update.username).await? {
            if existing.id != id {
                return Err(ServiceError::already_exists("User", &update.username));
            }
        }

        if let Some(existing) = repo.get_user_by_email(&update.email).await? {
            if existing.id != id {
                return Err(ServiceError::already_exists("User", &update.email));
            }
        }

        let password_hash = self.hasher.hash_async(update.password).await?;
        let username = update.username.clone();

        let changes = UserChanges {
            username: update.username,
            email: update.email,
            password_hash,
        };

        let user = repo
            .update_user(id, changes)
            .await
            .map_err(|e| map_write_error(e, &username))?
            .ok_or_else(|| ServiceError::not_found("User", id))?;

        tracing::info!(user_id = %user.id, "Updated user");
        Ok(user)
    }

    /// Deletes a user.
    ///
    /// # Errors
    /// Returns `ServiceError::NotFound` if no user has the given ID
    pub async fn delete_user(&self, id: &str) -> ServiceResult<()> {
        let repo = UserRepository::new(self.pool);
        if !repo.delete_user(id).await? {
            return Err(ServiceError::not_found("User", id));
        }

        tracing::info!(user_id = %id, "Deleted user");
        Ok(())
    }
}

/// A unique-constraint violation that slipped past the pre-checks (for
/// example a concurrent insert) is still reported as a conflict.
fn map_write_error(error: anyhow::Error, identifier: &str) -> ServiceError {
    if let Some(sqlx::Error::Database(db_error)) = error.downcast_ref::<sqlx::Error>() {
        if db_error.is_unique_violation() {
            return ServiceError::already_exists("User", identifier);
        }
    }
    ServiceError::from(error)
}
