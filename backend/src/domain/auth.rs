//! Authentication primitives: credentials and the request identity.
//!
//! Inbound adapters build [`Credentials`] from untrusted payloads and resolve
//! an [`Identity`] from the session before calling any protected operation.

use std::fmt;

use zeroize::Zeroizing;

use super::{Error, UserId, UserValidationError, Username};

/// Validation failures for credential payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialsValidationError {
    /// Username failed [`Username`] validation.
    Username(UserValidationError),
    /// Password was empty.
    EmptyPassword,
}

impl fmt::Display for CredentialsValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Username(err) => err.fmt(f),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for CredentialsValidationError {}

impl CredentialsValidationError {
    /// Name of the offending payload field.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::Username(_) => "username",
            Self::EmptyPassword => "password",
        }
    }
}

/// Username and plaintext password supplied at registration or login.
///
/// ## Invariants
/// - `username` satisfies [`Username`] validation.
/// - `password` is non-empty; surrounding whitespace is kept as typed.
///
/// The password is wiped from memory on drop and never printed.
///
/// # Examples
/// ```
/// use recipe_box::domain::Credentials;
///
/// let creds = Credentials::try_from_parts("alice", "s3cret").expect("valid");
/// assert_eq!(creds.username().as_ref(), "alice");
/// assert!(!format!("{creds:?}").contains("s3cret"));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: Username,
    password: Zeroizing<String>,
}

impl Credentials {
    /// Validate raw username and password inputs.
    pub fn try_from_parts(
        username: &str,
        password: &str,
    ) -> Result<Self, CredentialsValidationError> {
        let username = Username::new(username).map_err(CredentialsValidationError::Username)?;
        if password.is_empty() {
            return Err(CredentialsValidationError::EmptyPassword);
        }
        Ok(Self {
            username,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Normalised username.
    #[must_use]
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Plaintext password as typed.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Who is making the current request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Identity {
    /// No valid session.
    #[default]
    Anonymous,
    /// Session bound to a registered user.
    Authenticated(UserId),
}

impl Identity {
    /// Identifier of the signed-in user, if any.
    #[must_use]
    pub fn user_id(&self) -> Option<&UserId> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated(id) => Some(id),
        }
    }

    /// Return the signed-in user or fail with an unauthorised error.
    pub fn require(&self) -> Result<UserId, Error> {
        self.user_id()
            .copied()
            .ok_or_else(|| Error::unauthorized("login required"))
    }
}

impl From<Option<UserId>> for Identity {
    fn from(value: Option<UserId>) -> Self {
        value.map_or(Self::Anonymous, Self::Authenticated)
    }
}
