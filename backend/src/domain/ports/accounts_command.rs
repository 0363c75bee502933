//! Driving port for account registration.

use async_trait::async_trait;

use crate::domain::{Credentials, Error, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountsCommand: Send + Sync {
    /// Create an account, failing with a conflict when the username is taken.
    async fn register(&self, credentials: &Credentials) -> Result<UserId, Error>;
}
