//! Favorites: a user's bookmarks of recipes.

use std::fmt;

use serde::Serialize;
use utoipa::ToSchema;

use super::RecipeId;

/// System-assigned favorite identifier.
///
/// Only ever produced by a store, so there is no validating constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(into = "i64")]
pub struct FavoriteId(i64);

impl FavoriteId {
    pub(crate) const fn assigned(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw numeric value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for FavoriteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<FavoriteId> for i64 {
    fn from(value: FavoriteId) -> Self {
        value.0
    }
}

/// Denormalised favorites entry joining a favorite with its recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteRecipe {
    #[schema(value_type = i64, example = 4)]
    pub recipe_id: RecipeId,
    #[schema(example = "Chocolate Cake")]
    pub recipe_name: String,
    #[schema(example = "dessert, chocolate")]
    pub recipe_tags: String,
}
