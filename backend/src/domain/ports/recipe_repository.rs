//! Port for recipe persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Error, Recipe, RecipeDraft, RecipeId, SearchQuery, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by recipe repository adapters.
    pub enum RecipePersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "recipe repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "recipe repository query failed: {message}",
        /// The author reference does not resolve to a user.
        MissingAuthor { author_id: i64 } => "author {author_id} does not exist",
    }
}

/// Recipe data for an insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecipe {
    pub author_id: UserId,
    pub draft: RecipeDraft,
    pub created_at: DateTime<Utc>,
}

/// Recipe storage. Every listing is ordered by recipe id ascending.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// Insert a recipe; fails with `MissingAuthor` when the author is unknown.
    async fn create(&self, recipe: &NewRecipe) -> Result<Recipe, RecipePersistenceError>;

    async fn find_by_id(&self, id: &RecipeId) -> Result<Option<Recipe>, RecipePersistenceError>;

    async fn list_all(&self) -> Result<Vec<Recipe>, RecipePersistenceError>;

    async fn list_by_author(&self, author_id: &UserId)
    -> Result<Vec<Recipe>, RecipePersistenceError>;

    /// Case-insensitive substring search over name or tags.
    ///
    /// Adapters return an empty list for a blank query without touching
    /// storage.
    async fn search(&self, query: &SearchQuery) -> Result<Vec<Recipe>, RecipePersistenceError>;
}

impl From<RecipePersistenceError> for Error {
    fn from(error: RecipePersistenceError) -> Self {
        match error {
            RecipePersistenceError::Connection { message } => {
                Self::service_unavailable(format!("recipe repository unavailable: {message}"))
            }
            RecipePersistenceError::Query { message } => {
                Self::internal(format!("recipe repository error: {message}"))
            }
            RecipePersistenceError::MissingAuthor { author_id } => {
                Self::not_found(format!("user {author_id} not found"))
            }
        }
    }
}
