//! PostgreSQL-backed `RecipeRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{NewRecipe, RecipePersistenceError, RecipeRepository};
use crate::domain::{Recipe, RecipeId, SearchQuery, UserId};

use super::error_mapping::{DieselFailure, classify};
use super::models::{NewRecipeRow, RecipeRow};
use super::pool::{DbPool, PoolError};
use super::schema::recipes;

/// Diesel adapter for the `recipes` table.
#[derive(Clone)]
pub struct DieselRecipeRepository {
    pool: DbPool,
}

impl DieselRecipeRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> RecipePersistenceError {
    RecipePersistenceError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error, author_id: Option<i64>) -> RecipePersistenceError {
    match (classify(error), author_id) {
        (DieselFailure::ForeignKeyViolation { .. }, Some(author_id)) => {
            RecipePersistenceError::missing_author(author_id)
        }
        (DieselFailure::Connection(message), _) => RecipePersistenceError::connection(message),
        (DieselFailure::Query(message), _) => RecipePersistenceError::query(message),
        (DieselFailure::UniqueViolation { .. } | DieselFailure::ForeignKeyViolation { .. }, _) => {
            RecipePersistenceError::query("constraint violated")
        }
    }
}

fn into_recipes(rows: Vec<RecipeRow>) -> Result<Vec<Recipe>, RecipePersistenceError> {
    rows.into_iter()
        .map(RecipeRow::into_recipe)
        .collect::<Result<_, _>>()
        .map_err(RecipePersistenceError::query)
}

/// `ILIKE` pattern matching `term` anywhere, with wildcards in the term
/// escaped so they match literally.
pub(crate) fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

#[async_trait]
impl RecipeRepository for DieselRecipeRepository {
    async fn create(&self, recipe: &NewRecipe) -> Result<Recipe, RecipePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let author_id = recipe.author_id.get();
        let row = NewRecipeRow {
            name: recipe.draft.name(),
            tags: recipe.draft.tags(),
            ingredients: recipe.draft.ingredients(),
            instructions: recipe.draft.instructions(),
            author_id,
            created_at: recipe.created_at,
        };

        let stored: RecipeRow = diesel::insert_into(recipes::table)
            .values(&row)
            .returning(RecipeRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, Some(author_id)))?;

        stored.into_recipe().map_err(RecipePersistenceError::query)
    }

    async fn find_by_id(&self, id: &RecipeId) -> Result<Option<Recipe>, RecipePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<RecipeRow> = recipes::table
            .find(id.get())
            .select(RecipeRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, None))?;

        row.map(RecipeRow::into_recipe)
            .transpose()
            .map_err(RecipePersistenceError::query)
    }

    async fn list_all(&self) -> Result<Vec<Recipe>, RecipePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<RecipeRow> = recipes::table
            .order(recipes::id.asc())
            .select(RecipeRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, None))?;

        into_recipes(rows)
    }

    async fn list_by_author(
        &self,
        author_id: &UserId,
    ) -> Result<Vec<Recipe>, RecipePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<RecipeRow> = recipes::table
            .filter(recipes::author_id.eq(author_id.get()))
            .order(recipes::id.asc())
            .select(RecipeRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, None))?;

        into_recipes(rows)
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<Recipe>, RecipePersistenceError> {
        let Some(term) = query.term() else {
            return Ok(Vec::new());
        };
        let pattern = contains_pattern(term);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<RecipeRow> = recipes::table
            .filter(
                recipes::name
                    .ilike(pattern.as_str())
                    .or(recipes::tags.ilike(pattern.as_str())),
            )
            .order(recipes::id.asc())
            .select(RecipeRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, None))?;

        into_recipes(rows)
    }
}
