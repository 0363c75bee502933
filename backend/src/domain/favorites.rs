//! Favorite ledger service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{FavoriteRepository, FavoritesCommand, FavoritesQuery, UserRepository};
use crate::domain::{Error, FavoriteId, FavoriteRecipe, Identity, RecipeId, UserId};

/// Favorites over a [`FavoriteRepository`], with user existence checks for
/// listings.
#[derive(Clone)]
pub struct FavoriteService<F, U> {
    favorites: Arc<F>,
    users: Arc<U>,
}

impl<F, U> FavoriteService<F, U> {
    pub fn new(favorites: Arc<F>, users: Arc<U>) -> Self {
        Self { favorites, users }
    }
}

#[async_trait]
impl<F, U> FavoritesCommand for FavoriteService<F, U>
where
    F: FavoriteRepository,
    U: UserRepository,
{
    async fn add_favorite(&self, user: &UserId, recipe: &RecipeId) -> Result<FavoriteId, Error> {
        let id = self.favorites.add(user, recipe).await?;
        info!(favorite_id = %id, user_id = %user, recipe_id = %recipe, "favorite recorded");
        Ok(id)
    }
}

#[async_trait]
impl<F, U> FavoritesQuery for FavoriteService<F, U>
where
    F: FavoriteRepository,
    U: UserRepository,
{
    async fn list_for_user(&self, user: &UserId) -> Result<Vec<FavoriteRecipe>, Error> {
        if self.users.find_by_id(user).await?.is_none() {
            return Err(Error::not_found(format!("user {user} not found")));
        }
        Ok(self.favorites.list_for_user(user).await?)
    }

    async fn is_favorited(&self, viewer: &Identity, recipe: &RecipeId) -> Result<bool, Error> {
        let Some(user) = viewer.user_id() else {
            return Ok(false);
        };
        Ok(self.favorites.exists(user, recipe).await?)
    }
}
