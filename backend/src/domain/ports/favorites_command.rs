//! Driving port for favoriting recipes.

use async_trait::async_trait;

use crate::domain::{Error, FavoriteId, RecipeId, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FavoritesCommand: Send + Sync {
    /// Idempotently favorite a recipe, returning the favorite id.
    async fn add_favorite(&self, user: &UserId, recipe: &RecipeId) -> Result<FavoriteId, Error>;
}
