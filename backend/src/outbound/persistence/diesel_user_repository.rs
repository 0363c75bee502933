//! PostgreSQL-backed `UserRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{NewUser, UserCredentials, UserPersistenceError, UserRepository};
use crate::domain::{User, UserId, Username};

use super::error_mapping::{DieselFailure, USERNAME_UNIQUE, classify};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel adapter for the `users` table.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    UserPersistenceError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error, username: Option<&str>) -> UserPersistenceError {
    match classify(error) {
        DieselFailure::Connection(message) => UserPersistenceError::connection(message),
        DieselFailure::UniqueViolation { constraint } => match (constraint.as_deref(), username) {
            (Some(USERNAME_UNIQUE) | None, Some(name)) => {
                UserPersistenceError::duplicate_username(name)
            }
            (other, _) => {
                warn!(constraint = ?other, "unexpected unique violation on users");
                UserPersistenceError::query("unique constraint violated")
            }
        },
        DieselFailure::ForeignKeyViolation { .. } => {
            UserPersistenceError::query("foreign key violation")
        }
        DieselFailure::Query(message) => UserPersistenceError::query(message),
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn create(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let username = user.username.as_ref();
        let row = NewUserRow {
            username,
            password_hash: user.password_hash.as_str(),
            registered_at: user.registered_at,
        };

        let stored: UserRow = diesel::insert_into(users::table)
            .values(&row)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, Some(username)))?;

        stored.into_user().map_err(UserPersistenceError::query)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .find(id.get())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, None))?;

        row.map(UserRow::into_user)
            .transpose()
            .map_err(UserPersistenceError::query)
    }

    async fn find_credentials(
        &self,
        username: &Username,
    ) -> Result<Option<UserCredentials>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::username.eq(username.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, None))?;

        let Some(row) = row else {
            return Ok(None);
        };
        let password_hash = row.password_hash().map_err(UserPersistenceError::query)?;
        Ok(Some(UserCredentials {
            user_id: UserId::assigned(row.id),
            password_hash,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;

    struct UniqueInfo(Option<&'static str>);

    impl DatabaseErrorInformation for UniqueInfo {
        fn message(&self) -> &str {
            "duplicate key value violates unique constraint"
        }
        fn details(&self) -> Option<&str> {
            None
        }
        fn hint(&self) -> Option<&str> {
            None
        }
        fn table_name(&self) -> Option<&str> {
            Some("users")
        }
        fn column_name(&self) -> Option<&str> {
            None
        }
        fn constraint_name(&self) -> Option<&str> {
            self.0
        }
        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn unique_violation(constraint: Option<&'static str>) -> DieselError {
        DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new(UniqueInfo(constraint)),
        )
    }

    #[rstest]
    #[case(Some(USERNAME_UNIQUE))]
    #[case(None)]
    fn username_collision_is_duplicate(#[case] constraint: Option<&'static str>) {
        let err = map_diesel_error(unique_violation(constraint), Some("alice"));
        assert_eq!(err, UserPersistenceError::duplicate_username("alice"));
    }

    #[rstest]
    fn unknown_unique_constraint_is_query_error() {
        let err = map_diesel_error(unique_violation(Some("users_pkey")), Some("alice"));
        assert!(matches!(err, UserPersistenceError::Query { .. }));
    }

    #[rstest]
    fn pool_failure_is_connection_error() {
        let err = map_pool_error(PoolError::checkout("timed out"));
        assert_eq!(err, UserPersistenceError::connection("timed out"));
    }
}
