//! User accounts: identifiers, usernames, and the public user record.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Maximum length of a username, in characters.
pub const USERNAME_MAX: usize = 80;

/// Validation errors for user identifiers and usernames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    NonPositiveId,
    EmptyUsername,
    UsernameTooLong { max: usize },
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveId => write!(f, "user id must be a positive integer"),
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::UsernameTooLong { max } => {
                write!(f, "username must be at most {max} characters")
            }
        }
    }
}

impl std::error::Error for UserValidationError {}

/// System-assigned user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct UserId(i64);

impl UserId {
    /// Validate and wrap a raw identifier.
    pub fn new(raw: i64) -> Result<Self, UserValidationError> {
        if raw <= 0 {
            return Err(UserValidationError::NonPositiveId);
        }
        Ok(Self(raw))
    }

    /// Wrap an identifier assigned by a store; stores only hand out positive ids.
    pub(crate) const fn assigned(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw numeric value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<UserId> for i64 {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<i64> for UserId {
    type Error = UserValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Unique login name, trimmed and immutable once registered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`].
    ///
    /// # Examples
    /// ```
    /// use recipe_box::domain::Username;
    ///
    /// let name = Username::new("  alice ").expect("valid username");
    /// assert_eq!(name.as_ref(), "alice");
    /// ```
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        if trimmed.chars().count() > USERNAME_MAX {
            return Err(UserValidationError::UsernameTooLong { max: USERNAME_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Registered user as visible outside the credential store.
///
/// The password hash is deliberately absent; see
/// [`UserCredentials`](crate::domain::ports::UserCredentials).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[schema(value_type = i64, example = 1)]
    id: UserId,
    #[schema(value_type = String, example = "alice")]
    username: Username,
    registered_at: DateTime<Utc>,
}

impl User {
    /// Build a user from validated parts.
    #[must_use]
    pub fn new(id: UserId, username: Username, registered_at: DateTime<Utc>) -> Self {
        Self {
            id,
            username,
            registered_at,
        }
    }

    /// Stable identifier.
    #[must_use]
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Login name.
    #[must_use]
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// UTC instant the account was created.
    #[must_use]
    pub fn registered_at(&self) -> DateTime<Utc> {
        self.registered_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0)]
    #[case(-4)]
    fn user_id_rejects_non_positive(#[case] raw: i64) {
        assert_eq!(UserId::new(raw), Err(UserValidationError::NonPositiveId));
    }

    #[rstest]
    #[case("", UserValidationError::EmptyUsername)]
    #[case("   ", UserValidationError::EmptyUsername)]
    fn username_rejects_blank(#[case] raw: &str, #[case] expected: UserValidationError) {
        assert_eq!(Username::new(raw), Err(expected));
    }

    #[rstest]
    fn username_enforces_length_limit() {
        let at_limit = "a".repeat(USERNAME_MAX);
        let over_limit = "a".repeat(USERNAME_MAX + 1);

        assert!(Username::new(&at_limit).is_ok());
        assert_eq!(
            Username::new(&over_limit),
            Err(UserValidationError::UsernameTooLong { max: USERNAME_MAX })
        );
    }

    #[rstest]
    fn user_serialises_camel_case() {
        let registered_at = DateTime::parse_from_rfc3339("2024-03-01T12:00:00Z")
            .expect("timestamp")
            .with_timezone(&Utc);
        let user = User::new(
            UserId::new(3).expect("id"),
            Username::new("alice").expect("username"),
            registered_at,
        );

        let value = serde_json::to_value(&user).expect("serialise user");
        assert_eq!(value["id"], 3);
        assert_eq!(value["username"], "alice");
        assert_eq!(value["registeredAt"], "2024-03-01T12:00:00Z");
    }
}
