//! In-memory implementation of the user, recipe, and favorite repositories.
//!
//! All tables live behind one mutex, so the username and `(user, recipe)`
//! uniqueness checks and the inserts they guard happen atomically. Data is
//! lost when the process exits.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{
    FavoritePersistenceError, FavoriteRepository, NewRecipe, NewUser, RecipePersistenceError,
    RecipeRepository, UserCredentials, UserPersistenceError, UserRepository,
};
use crate::domain::{
    FavoriteId, FavoriteRecipe, PasswordHash, Recipe, RecipeId, SearchQuery, User, UserId,
    Username,
};

#[derive(Debug)]
struct StoredUser {
    user: User,
    password_hash: PasswordHash,
}

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<UserId, StoredUser>,
    usernames: HashMap<String, UserId>,
    recipes: BTreeMap<RecipeId, Recipe>,
    favorites: BTreeMap<FavoriteId, (UserId, RecipeId)>,
    favorite_pairs: HashMap<(UserId, RecipeId), FavoriteId>,
    last_user_id: i64,
    last_recipe_id: i64,
    last_favorite_id: i64,
}

/// Shared in-memory store; clones share the same tables.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, String> {
        self.tables
            .lock()
            .map_err(|_| "memory store lock poisoned".to_owned())
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut tables = self.lock().map_err(UserPersistenceError::query)?;
        let key = user.username.as_ref().to_owned();
        if tables.usernames.contains_key(&key) {
            return Err(UserPersistenceError::duplicate_username(key));
        }

        tables.last_user_id += 1;
        let id = UserId::assigned(tables.last_user_id);
        let stored = User::new(id, user.username.clone(), user.registered_at);
        tables.usernames.insert(key, id);
        tables.users.insert(
            id,
            StoredUser {
                user: stored.clone(),
                password_hash: user.password_hash.clone(),
            },
        );
        Ok(stored)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let tables = self.lock().map_err(UserPersistenceError::query)?;
        Ok(tables.users.get(id).map(|stored| stored.user.clone()))
    }

    async fn find_credentials(
        &self,
        username: &Username,
    ) -> Result<Option<UserCredentials>, UserPersistenceError> {
        let tables = self.lock().map_err(UserPersistenceError::query)?;
        let credentials = tables
            .usernames
            .get(username.as_ref())
            .and_then(|id| tables.users.get(id))
            .map(|stored| UserCredentials {
                user_id: stored.user.id(),
                password_hash: stored.password_hash.clone(),
            });
        Ok(credentials)
    }
}

#[async_trait]
impl RecipeRepository for MemoryStore {
    async fn create(&self, recipe: &NewRecipe) -> Result<Recipe, RecipePersistenceError> {
        let mut tables = self.lock().map_err(RecipePersistenceError::query)?;
        if !tables.users.contains_key(&recipe.author_id) {
            return Err(RecipePersistenceError::missing_author(
                recipe.author_id.get(),
            ));
        }

        tables.last_recipe_id += 1;
        let id = RecipeId::assigned(tables.last_recipe_id);
        let stored = Recipe::new(
            id,
            recipe.draft.clone(),
            recipe.author_id,
            recipe.created_at,
        );
        tables.recipes.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: &RecipeId) -> Result<Option<Recipe>, RecipePersistenceError> {
        let tables = self.lock().map_err(RecipePersistenceError::query)?;
        Ok(tables.recipes.get(id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Recipe>, RecipePersistenceError> {
        let tables = self.lock().map_err(RecipePersistenceError::query)?;
        Ok(tables.recipes.values().cloned().collect())
    }

    async fn list_by_author(
        &self,
        author_id: &UserId,
    ) -> Result<Vec<Recipe>, RecipePersistenceError> {
        let tables = self.lock().map_err(RecipePersistenceError::query)?;
        Ok(tables
            .recipes
            .values()
            .filter(|recipe| recipe.author_id() == *author_id)
            .cloned()
            .collect())
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<Recipe>, RecipePersistenceError> {
        if query.term().is_none() {
            return Ok(Vec::new());
        }
        let tables = self.lock().map_err(RecipePersistenceError::query)?;
        Ok(tables
            .recipes
            .values()
            .filter(|recipe| query.matches(recipe))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl FavoriteRepository for MemoryStore {
    async fn add(
        &self,
        user_id: &UserId,
        recipe_id: &RecipeId,
    ) -> Result<FavoriteId, FavoritePersistenceError> {
        let mut tables = self.lock().map_err(FavoritePersistenceError::query)?;
        if !tables.users.contains_key(user_id) {
            return Err(FavoritePersistenceError::missing_reference(format!(
                "user {user_id} not found"
            )));
        }
        if !tables.recipes.contains_key(recipe_id) {
            return Err(FavoritePersistenceError::missing_reference(format!(
                "recipe {recipe_id} not found"
            )));
        }
        if let Some(existing) = tables.favorite_pairs.get(&(*user_id, *recipe_id)) {
            return Ok(*existing);
        }

        tables.last_favorite_id += 1;
        let id = FavoriteId::assigned(tables.last_favorite_id);
        tables.favorite_pairs.insert((*user_id, *recipe_id), id);
        tables.favorites.insert(id, (*user_id, *recipe_id));
        Ok(id)
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<FavoriteRecipe>, FavoritePersistenceError> {
        let tables = self.lock().map_err(FavoritePersistenceError::query)?;
        Ok(tables
            .favorites
            .values()
            .filter(|(owner, _)| owner == user_id)
            .filter_map(|(_, recipe_id)| tables.recipes.get(recipe_id))
            .map(|recipe| FavoriteRecipe {
                recipe_id: recipe.id(),
                recipe_name: recipe.name().to_owned(),
                recipe_tags: recipe.tags().to_owned(),
            })
            .collect())
    }

    async fn exists(
        &self,
        user_id: &UserId,
        recipe_id: &RecipeId,
    ) -> Result<bool, FavoritePersistenceError> {
        let tables = self.lock().map_err(FavoritePersistenceError::query)?;
        Ok(tables.favorite_pairs.contains_key(&(*user_id, *recipe_id)))
    }
}

#[cfg(test)]
mod tests;
