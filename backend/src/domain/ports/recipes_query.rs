//! Driving port for browsing and searching recipes.
//!
//! Every operation is open to anonymous callers.

use async_trait::async_trait;

use crate::domain::{Error, Identity, Recipe, RecipeDetail, RecipeId, SearchQuery, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipesQuery: Send + Sync {
    /// Fetch one recipe or fail with not-found.
    async fn get_recipe(&self, id: &RecipeId) -> Result<Recipe, Error>;

    /// Recipe with its author's username and the viewer's favorite flag.
    async fn recipe_detail(&self, id: &RecipeId, viewer: &Identity) -> Result<RecipeDetail, Error>;

    async fn list_all(&self) -> Result<Vec<Recipe>, Error>;

    /// Recipes by one author; not-found when the author is not registered.
    async fn list_by_author(&self, author: &UserId) -> Result<Vec<Recipe>, Error>;

    /// Keyword search. A blank query yields an empty list.
    async fn search(&self, query: &SearchQuery) -> Result<Vec<Recipe>, Error>;
}
