//! Internal Diesel row structs.
//!
//! These types never leave the persistence layer. Conversions back into
//! domain types re-run domain validation, so a row that violates an invariant
//! surfaces as a query error instead of a malformed value.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::{
    FavoriteRecipe, PasswordHash, Recipe, RecipeDraft, RecipeId, User, UserId, Username,
};

use super::schema::{favorites, recipes, users};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub registered_at: DateTime<Utc>,
}

impl UserRow {
    pub(crate) fn into_user(self) -> Result<User, String> {
        let username = Username::new(&self.username)
            .map_err(|err| format!("stored user {} is invalid: {err}", self.id))?;
        Ok(User::new(
            UserId::assigned(self.id),
            username,
            self.registered_at,
        ))
    }

    pub(crate) fn password_hash(&self) -> Result<PasswordHash, String> {
        PasswordHash::from_phc(self.password_hash.as_str())
            .map_err(|err| format!("stored user {} has a bad hash: {err}", self.id))
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub username: &'a str,
    pub password_hash: &'a str,
    pub registered_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = recipes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RecipeRow {
    pub id: i64,
    pub name: String,
    pub tags: String,
    pub ingredients: String,
    pub instructions: String,
    pub author_id: i64,
    pub created_at: DateTime<Utc>,
}

impl RecipeRow {
    pub(crate) fn into_recipe(self) -> Result<Recipe, String> {
        let draft =
            RecipeDraft::try_from_parts(&self.name, &self.tags, &self.ingredients, &self.instructions)
                .map_err(|err| format!("stored recipe {} is invalid: {err}", self.id))?;
        Ok(Recipe::new(
            RecipeId::assigned(self.id),
            draft,
            UserId::assigned(self.author_id),
            self.created_at,
        ))
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = recipes)]
pub(crate) struct NewRecipeRow<'a> {
    pub name: &'a str,
    pub tags: &'a str,
    pub ingredients: &'a str,
    pub instructions: &'a str,
    pub author_id: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Insertable)]
#[diesel(table_name = favorites)]
pub(crate) struct NewFavoriteRow {
    pub user_id: i64,
    pub recipe_id: i64,
}

/// Favorite joined with the recipe columns shown in listings.
#[derive(Debug, Clone, Queryable)]
pub(crate) struct FavoriteRecipeRow {
    pub recipe_id: i64,
    pub recipe_name: String,
    pub recipe_tags: String,
}

impl From<FavoriteRecipeRow> for FavoriteRecipe {
    fn from(row: FavoriteRecipeRow) -> Self {
        Self {
            recipe_id: RecipeId::assigned(row.recipe_id),
            recipe_name: row.recipe_name,
            recipe_tags: row.recipe_tags,
        }
    }
}
