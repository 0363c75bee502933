//! Driving port for reading favorites.

use async_trait::async_trait;

use crate::domain::{Error, FavoriteRecipe, Identity, RecipeId, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FavoritesQuery: Send + Sync {
    /// The user's favorites; not-found when the user is not registered.
    async fn list_for_user(&self, user: &UserId) -> Result<Vec<FavoriteRecipe>, Error>;

    /// Whether the viewer has favorited the recipe. Always `false` when
    /// anonymous.
    async fn is_favorited(&self, viewer: &Identity, recipe: &RecipeId) -> Result<bool, Error>;
}
