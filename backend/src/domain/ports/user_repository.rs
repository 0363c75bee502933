//! Port for user account persistence (the credential store).
//!
//! Adapters must enforce username uniqueness in storage and report a
//! collision as [`UserPersistenceError::DuplicateUsername`] rather than relying
//! on a read-then-write check.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;

use crate::domain::{Error, PasswordHash, User, UserId, Username};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// The username is already registered.
        DuplicateUsername { username: String } => "username {username} is already registered",
    }
}

/// Account data for a registration insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: Username,
    pub password_hash: PasswordHash,
    pub registered_at: DateTime<Utc>,
}

/// Stored password hash for a user, only read during authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserCredentials {
    pub user_id: UserId,
    pub password_hash: PasswordHash,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account and return the stored user.
    async fn create(&self, user: &NewUser) -> Result<User, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch the stored hash for a username.
    async fn find_credentials(
        &self,
        username: &Username,
    ) -> Result<Option<UserCredentials>, UserPersistenceError>;
}

impl From<UserPersistenceError> for Error {
    fn from(error: UserPersistenceError) -> Self {
        match error {
            UserPersistenceError::Connection { message } => {
                Self::service_unavailable(format!("user repository unavailable: {message}"))
            }
            UserPersistenceError::Query { message } => {
                Self::internal(format!("user repository error: {message}"))
            }
            UserPersistenceError::DuplicateUsername { username } => {
                Self::conflict(format!("username {username} is already taken"))
                    .with_details(json!({ "field": "username" }))
            }
        }
    }
}
