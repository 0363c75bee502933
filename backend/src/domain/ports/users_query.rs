//! Driving port for reading user accounts.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

/// Domain use-case port for user lookups.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Fetch a user, failing with not-found for unknown ids.
    async fn get_user(&self, id: &UserId) -> Result<User, Error>;
}
