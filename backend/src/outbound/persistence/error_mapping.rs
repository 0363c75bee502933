//! Classification of Diesel failures shared by the repositories.
//!
//! Each repository turns a [`DieselFailure`] into its own port error, so the
//! constraint-specific cases (duplicate username, dangling reference) stay
//! close to the table that owns them.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

/// Constraint protecting `users.username`.
pub(crate) const USERNAME_UNIQUE: &str = "users_username_key";

/// Coarse outcome of a failed Diesel operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DieselFailure {
    /// The connection dropped mid-operation.
    Connection(String),
    /// A unique constraint rejected the write.
    UniqueViolation { constraint: Option<String> },
    /// A foreign key constraint rejected the write.
    ForeignKeyViolation { constraint: Option<String> },
    /// Anything else.
    Query(String),
}

/// Classify `error`, logging the raw database message at debug level.
pub(crate) fn classify(error: DieselError) -> DieselFailure {
    match error {
        DieselError::DatabaseError(kind, info) => {
            debug!(
                ?kind,
                message = info.message(),
                constraint = info.constraint_name(),
                "diesel operation failed"
            );
            let constraint = info.constraint_name().map(str::to_owned);
            match kind {
                DatabaseErrorKind::UniqueViolation => DieselFailure::UniqueViolation { constraint },
                DatabaseErrorKind::ForeignKeyViolation => {
                    DieselFailure::ForeignKeyViolation { constraint }
                }
                DatabaseErrorKind::ClosedConnection => {
                    DieselFailure::Connection("database connection error".to_owned())
                }
                _ => DieselFailure::Query("database error".to_owned()),
            }
        }
        DieselError::NotFound => DieselFailure::Query("record not found".to_owned()),
        DieselError::QueryBuilderError(_) => {
            DieselFailure::Query("database query error".to_owned())
        }
        other => {
            debug!(error = %other, "diesel operation failed");
            DieselFailure::Query("database error".to_owned())
        }
    }
}
