//! Port for the favorites ledger.
//!
//! Storage owns the `(user, recipe)` uniqueness rule: adding an existing pair
//! returns the original favorite id and writes nothing, even when two callers
//! race on the same pair.

use async_trait::async_trait;

use crate::domain::{Error, FavoriteId, FavoriteRecipe, RecipeId, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by favorites adapters.
    pub enum FavoritePersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "favorite repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "favorite repository query failed: {message}",
        /// The user or recipe reference does not resolve.
        MissingReference { message: String } => "favorite reference not found: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FavoriteRepository: Send + Sync {
    /// Record a favorite, returning the existing id when the pair is present.
    async fn add(
        &self,
        user_id: &UserId,
        recipe_id: &RecipeId,
    ) -> Result<FavoriteId, FavoritePersistenceError>;

    /// Favorites joined with their recipes, oldest favorite first.
    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<FavoriteRecipe>, FavoritePersistenceError>;

    async fn exists(
        &self,
        user_id: &UserId,
        recipe_id: &RecipeId,
    ) -> Result<bool, FavoritePersistenceError>;
}

impl From<FavoritePersistenceError> for Error {
    fn from(error: FavoritePersistenceError) -> Self {
        match error {
            FavoritePersistenceError::Connection { message } => {
                Self::service_unavailable(format!("favorite repository unavailable: {message}"))
            }
            FavoritePersistenceError::Query { message } => {
                Self::internal(format!("favorite repository error: {message}"))
            }
            FavoritePersistenceError::MissingReference { message } => Self::not_found(message),
        }
    }
}
