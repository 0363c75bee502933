//! Driving port for writing recipes.

use async_trait::async_trait;

use crate::domain::{Error, RecipeDraft, RecipeId, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipesCommand: Send + Sync {
    /// Store a recipe authored by `author`; the creation time is set here.
    async fn create_recipe(&self, author: &UserId, draft: &RecipeDraft) -> Result<RecipeId, Error>;
}
