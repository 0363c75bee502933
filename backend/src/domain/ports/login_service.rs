//! Driving port for login.
//!
//! Inbound adapters call it to check credentials without knowing how the
//! credential store is backed, so handler tests can substitute a double.

use async_trait::async_trait;

use crate::domain::{Credentials, Error, UserId};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Return the user id when the credentials match, `None` otherwise.
    ///
    /// An unknown username and a wrong password produce the same `Ok(None)`.
    /// `Err` is reserved for infrastructure failures.
    async fn authenticate(&self, credentials: &Credentials) -> Result<Option<UserId>, Error>;
}
