//! Account service: registration, login, and user lookups.
//!
//! Password hashing is CPU-bound, so it runs on Tokio's blocking pool.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info, warn};
use zeroize::Zeroizing;

use crate::domain::ports::{AccountsCommand, LoginService, NewUser, UserRepository, UsersQuery};
use crate::domain::{Credentials, Error, PasswordHash, User, UserId, password};

/// Credential store backed by a [`UserRepository`].
#[derive(Clone)]
pub struct AccountService<U> {
    users: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<U> AccountService<U> {
    /// Create a service over `users`, stamping registrations with `clock`.
    pub fn new(users: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self { users, clock }
    }
}

async fn run_blocking<T, F>(task: F) -> Result<T, Error>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|err| Error::internal(format!("password task failed: {err}")))
}

#[async_trait]
impl<U> AccountsCommand for AccountService<U>
where
    U: UserRepository + 'static,
{
    async fn register(&self, credentials: &Credentials) -> Result<UserId, Error> {
        let plaintext = Zeroizing::new(credentials.password().to_owned());
        let password_hash = run_blocking(move || PasswordHash::generate(&plaintext))
            .await?
            .map_err(|err| Error::internal(err.to_string()))?;

        let new_user = NewUser {
            username: credentials.username().clone(),
            password_hash,
            registered_at: self.clock.utc(),
        };
        let user = self.users.create(&new_user).await.map_err(|err| {
            debug!(username = %new_user.username, error = %err, "registration rejected");
            Error::from(err)
        })?;

        info!(user_id = %user.id(), username = %user.username(), "registered user");
        Ok(user.id())
    }
}

#[async_trait]
impl<U> LoginService for AccountService<U>
where
    U: UserRepository + 'static,
{
    async fn authenticate(&self, credentials: &Credentials) -> Result<Option<UserId>, Error> {
        let stored = self.users.find_credentials(credentials.username()).await?;
        let plaintext = Zeroizing::new(credentials.password().to_owned());

        let Some(stored) = stored else {
            run_blocking(move || password::verify_against_dummy(&plaintext)).await?;
            debug!(username = %credentials.username(), "login failed");
            return Ok(None);
        };

        let hash = stored.password_hash;
        let verified = run_blocking(move || hash.verify(&plaintext))
            .await?
            .map_err(|err| {
                warn!(user_id = %stored.user_id, error = %err, "stored password hash unreadable");
                Error::internal(err.to_string())
            })?;

        if verified {
            info!(user_id = %stored.user_id, "user logged in");
            Ok(Some(stored.user_id))
        } else {
            debug!(username = %credentials.username(), "login failed");
            Ok(None)
        }
    }
}

#[async_trait]
impl<U> UsersQuery for AccountService<U>
where
    U: UserRepository + 'static,
{
    async fn get_user(&self, id: &UserId) -> Result<User, Error> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::not_found(format!("user {id} not found")))
    }
}
