//! PostgreSQL-backed `FavoriteRepository`.
//!
//! `add` relies on the `(user_id, recipe_id)` unique constraint: the insert
//! uses `ON CONFLICT DO NOTHING`, and when it writes nothing the existing row
//! is read back. Concurrent adds for one pair therefore resolve to one row.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{FavoritePersistenceError, FavoriteRepository};
use crate::domain::{FavoriteId, FavoriteRecipe, RecipeId, UserId};

use super::error_mapping::{DieselFailure, classify};
use super::models::{FavoriteRecipeRow, NewFavoriteRow};
use super::pool::{DbPool, PoolError};
use super::schema::{favorites, recipes};

/// Diesel adapter for the `favorites` table.
#[derive(Clone)]
pub struct DieselFavoriteRepository {
    pool: DbPool,
}

impl DieselFavoriteRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> FavoritePersistenceError {
    FavoritePersistenceError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error) -> FavoritePersistenceError {
    match classify(error) {
        DieselFailure::Connection(message) => FavoritePersistenceError::connection(message),
        DieselFailure::ForeignKeyViolation { constraint } => {
            let target = match constraint.as_deref() {
                Some(name) if name.contains("recipe_id") => "recipe",
                Some(name) if name.contains("user_id") => "user",
                _ => "user or recipe",
            };
            FavoritePersistenceError::missing_reference(format!("{target} not found"))
        }
        DieselFailure::UniqueViolation { .. } => {
            FavoritePersistenceError::query("unexpected unique violation")
        }
        DieselFailure::Query(message) => FavoritePersistenceError::query(message),
    }
}

#[async_trait]
impl FavoriteRepository for DieselFavoriteRepository {
    async fn add(
        &self,
        user_id: &UserId,
        recipe_id: &RecipeId,
    ) -> Result<FavoriteId, FavoritePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewFavoriteRow {
            user_id: user_id.get(),
            recipe_id: recipe_id.get(),
        };

        let inserted: Option<i64> = diesel::insert_into(favorites::table)
            .values(&row)
            .on_conflict((favorites::user_id, favorites::recipe_id))
            .do_nothing()
            .returning(favorites::id)
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        let id = match inserted {
            Some(id) => id,
            None => favorites::table
                .filter(favorites::user_id.eq(row.user_id))
                .filter(favorites::recipe_id.eq(row.recipe_id))
                .select(favorites::id)
                .first(&mut conn)
                .await
                .map_err(map_diesel_error)?,
        };
        Ok(FavoriteId::assigned(id))
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<FavoriteRecipe>, FavoritePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<FavoriteRecipeRow> = favorites::table
            .inner_join(recipes::table)
            .filter(favorites::user_id.eq(user_id.get()))
            .order(favorites::id.asc())
            .select((recipes::id, recipes::name, recipes::tags))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(FavoriteRecipe::from).collect())
    }

    async fn exists(
        &self,
        user_id: &UserId,
        recipe_id: &RecipeId,
    ) -> Result<bool, FavoritePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::select(diesel::dsl::exists(
            favorites::table
                .filter(favorites::user_id.eq(user_id.get()))
                .filter(favorites::recipe_id.eq(recipe_id.get())),
        ))
        .get_result(&mut conn)
        .await
        .map_err(map_diesel_error)
    }
}
