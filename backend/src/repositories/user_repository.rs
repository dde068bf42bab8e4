//! Database repository for user management operations.
//!
//! Provides CRUD operations for system users and the username lookup the
//! login flow depends on.

use crate::database::models::{CreateUser, User, UserChanges};
use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

const USER_COLUMNS: &str = "id, username, email, password_hash, created_at, updated_at";

/// Read access to stored credentials, as consumed by the login flow.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Returns the record whose username matches exactly, if any.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>>;
}

/// Repository for user database operations.
///
/// Handles all persistence operations for the User entity. Uniqueness of
/// `username` and `email` is enforced by the table constraints.
pub struct UserRepository<'a> {
    /// Shared SQLite connection pool
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    /// Creates a new UserRepository instance.
    ///
    /// # Arguments
    /// * `pool` - Reference to SQLite connection pool
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Creates a new user in the database.
    ///
    /// # Arguments
    /// * `user` - CreateUser DTO containing user details
    ///
    /// # Returns
    /// The newly created User with all fields populated
    pub async fn create_user(&self, user: CreateUser) -> Result<User> {
        let now = Utc::now();
        let query = format!(
            "INSERT INTO users (id, username, email, password_hash, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?) RETURNING {USER_COLUMNS}"
        );

        let user = sqlx::query_as::<_, User>(&query)
            .bind(user.id)
            .bind(user.username)
            .bind(user.email)
            .bind(user.password_hash)
            .bind(now)
            .bind(now)
            .fetch_one(self.pool)
            .await?;

        Ok(user)
    }

    /// Retrieves a user by their unique identifier.
    ///
    /// # Returns
    /// `Some(User)` if found, `None` otherwise
    pub async fn get_user_by_id(&self, id: &str) -> Result<Option<User>> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?");
        let user = sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(user)
    }

    /// Retrieves a user by their username.
    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE username = ?");
        let user = sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(self.pool)
            .await?;

        Ok(user)
    }

    /// Retrieves a user by their email.
    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?");
        let user = sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(self.pool)
            .await?;

        Ok(user)
    }

    /// Lists every user, oldest first.
    pub async fn get_all_users(&self) -> Result<Vec<User>> {
        let query = format!("SELECT {USER_COLUMNS} FROM users ORDER BY created_at ASC, id ASC");
        let users = sqlx::query_as::<_, User>(&query)
            .fetch_all(self.pool)
            .await?;

        Ok(users)
    }

    /// Replaces the mutable fields of a user.
    ///
    /// # Returns
    /// The updated User, or `None` if no row has the given ID
    pub async fn update_user(&self, id: &str, changes: UserChanges) -> Result<Option<User>> {
        let query = format!(
            "UPDATE users SET username = ?, email = ?, password_hash = ?, updated_at = ? \
             WHERE id = ? RETURNING {USER_COLUMNS}"
        );

        let user = sqlx::query_as::<_, User>(&query)
            .bind(changes.username)
            .bind(changes.email)
            .bind(changes.password_hash)
            .bind(Utc::now())
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(user)
    }

    /// Deletes a user.
    ///
    /// # Returns
    /// `true` if a row was removed
    pub async fn delete_user(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl<'a> CredentialStore for UserRepository<'a> {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        self.get_user_by_username(username).await
    }
}
