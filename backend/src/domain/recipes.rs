//! Recipe service: authoring, browsing, and keyword search.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{
    FavoriteRepository, NewRecipe, RecipeRepository, RecipesCommand, RecipesQuery, UserRepository,
};
use crate::domain::{
    Error, Identity, Recipe, RecipeDetail, RecipeDraft, RecipeId, SearchQuery, UserId,
};

/// Recipe repository contract layered over the driven ports.
#[derive(Clone)]
pub struct RecipeService<R, U, F> {
    recipes: Arc<R>,
    users: Arc<U>,
    favorites: Arc<F>,
    clock: Arc<dyn Clock>,
}

impl<R, U, F> RecipeService<R, U, F> {
    /// Create a service over the recipe, user, and favorite stores.
    pub fn new(recipes: Arc<R>, users: Arc<U>, favorites: Arc<F>, clock: Arc<dyn Clock>) -> Self {
        Self {
            recipes,
            users,
            favorites,
            clock,
        }
    }
}

impl<R, U, F> RecipeService<R, U, F>
where
    R: RecipeRepository,
    U: UserRepository,
    F: FavoriteRepository,
{
    fn recipe_not_found(id: &RecipeId) -> Error {
        Error::not_found(format!("recipe {id} not found"))
    }

    async fn find_recipe(&self, id: &RecipeId) -> Result<Recipe, Error> {
        self.recipes
            .find_by_id(id)
            .await?
            .ok_or_else(|| Self::recipe_not_found(id))
    }
}

#[async_trait]
impl<R, U, F> RecipesCommand for RecipeService<R, U, F>
where
    R: RecipeRepository,
    U: UserRepository,
    F: FavoriteRepository,
{
    async fn create_recipe(&self, author: &UserId, draft: &RecipeDraft) -> Result<RecipeId, Error> {
        let new_recipe = NewRecipe {
            author_id: *author,
            draft: draft.clone(),
            created_at: self.clock.utc(),
        };
        let recipe = self.recipes.create(&new_recipe).await?;
        info!(recipe_id = %recipe.id(), author_id = %author, "created recipe");
        Ok(recipe.id())
    }
}

#[async_trait]
impl<R, U, F> RecipesQuery for RecipeService<R, U, F>
where
    R: RecipeRepository,
    U: UserRepository,
    F: FavoriteRepository,
{
    async fn get_recipe(&self, id: &RecipeId) -> Result<Recipe, Error> {
        self.find_recipe(id).await
    }

    async fn recipe_detail(&self, id: &RecipeId, viewer: &Identity) -> Result<RecipeDetail, Error> {
        let recipe = self.find_recipe(id).await?;
        let author = self
            .users
            .find_by_id(&recipe.author_id())
            .await?
            .ok_or_else(|| {
                Error::internal(format!("author of recipe {id} is missing"))
            })?;
        let is_favorite = match viewer.user_id() {
            Some(user_id) => self.favorites.exists(user_id, id).await?,
            None => false,
        };
        Ok(RecipeDetail {
            recipe,
            author_username: author.username().to_string(),
            is_favorite,
        })
    }

    async fn list_all(&self) -> Result<Vec<Recipe>, Error> {
        Ok(self.recipes.list_all().await?)
    }

    async fn list_by_author(&self, author: &UserId) -> Result<Vec<Recipe>, Error> {
        if self.users.find_by_id(author).await?.is_none() {
            return Err(Error::not_found(format!("user {author} not found")));
        }
        Ok(self.recipes.list_by_author(author).await?)
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<Recipe>, Error> {
        if query.term().is_none() {
            return Ok(Vec::new());
        }
        Ok(self.recipes.search(query).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{
        MockFavoriteRepository, MockRecipeRepository, MockUserRepository, RecipePersistenceError,
    };
    use crate::domain::{ErrorCode, User, Username};
    use chrono::{DateTime, TimeZone, Utc};
    use mockable::MockClock;
    use rstest::rstest;

    type Service = RecipeService<MockRecipeRepository, MockUserRepository, MockFavoriteRepository>;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 2, 18, 30, 0)
            .single()
            .expect("valid timestamp")
    }

    fn service(
        recipes: MockRecipeRepository,
        users: MockUserRepository,
        favorites: MockFavoriteRepository,
    ) -> Service {
        let mut clock = MockClock::new();
        clock.expect_utc().return_const(now());
        RecipeService::new(
            Arc::new(recipes),
            Arc::new(users),
            Arc::new(favorites),
            Arc::new(clock),
        )
    }

    fn draft(name: &str, tags: &str) -> RecipeDraft {
        RecipeDraft::try_from_parts(name, tags, "flour", "bake").expect("valid draft")
    }

    fn stored(id: i64, author: i64, name: &str) -> Recipe {
        Recipe::new(
            RecipeId::new(id).expect("id"),
            draft(name, ""),
            UserId::new(author).expect("id"),
            now(),
        )
    }

    fn alice() -> User {
        User::new(
            UserId::new(1).expect("id"),
            Username::new("alice").expect("username"),
            now(),
        )
    }

    #[rstest]
    #[tokio::test]
    async fn create_sets_author_and_timestamp() {
        let mut recipes = MockRecipeRepository::new();
        recipes
            .expect_create()
            .withf(|new_recipe| {
                new_recipe.author_id.get() == 1
                    && new_recipe.created_at == now()
                    && new_recipe.draft.name() == "Cake"
            })
            .times(1)
            .returning(|new_recipe| {
                Ok(Recipe::new(
                    RecipeId::new(10).expect("id"),
                    new_recipe.draft.clone(),
                    new_recipe.author_id,
                    new_recipe.created_at,
                ))
            });

        let id = service(recipes, MockUserRepository::new(), MockFavoriteRepository::new())
            .create_recipe(&UserId::new(1).expect("id"), &draft("Cake", "dessert"))
            .await
            .expect("create succeeds");
        assert_eq!(id.get(), 10);
    }

    #[rstest]
    #[tokio::test]
    async fn create_for_unknown_author_is_not_found() {
        let mut recipes = MockRecipeRepository::new();
        recipes
            .expect_create()
            .times(1)
            .return_once(|_| Err(RecipePersistenceError::missing_author(42_i64)));

        let err = service(recipes, MockUserRepository::new(), MockFavoriteRepository::new())
            .create_recipe(&UserId::new(42).expect("id"), &draft("Cake", ""))
            .await
            .expect_err("unknown author");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[tokio::test]
    async fn get_missing_recipe_is_not_found() {
        let mut recipes = MockRecipeRepository::new();
        recipes.expect_find_by_id().times(1).return_once(|_| Ok(None));

        let err = service(recipes, MockUserRepository::new(), MockFavoriteRepository::new())
            .get_recipe(&RecipeId::new(5).expect("id"))
            .await
            .expect_err("missing");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[case(Identity::Anonymous, false)]
    #[case(Identity::Authenticated(UserId::new(2).expect("id")), true)]
    #[tokio::test]
    async fn detail_includes_author_and_favorite_flag(
        #[case] viewer: Identity,
        #[case] expected_favorite: bool,
    ) {
        let mut recipes = MockRecipeRepository::new();
        recipes
            .expect_find_by_id()
            .return_once(|_| Ok(Some(stored(3, 1, "Cake"))));
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().return_once(|_| Ok(Some(alice())));
        let mut favorites = MockFavoriteRepository::new();
        favorites.expect_exists().returning(|_, _| Ok(true));

        let detail = service(recipes, users, favorites)
            .recipe_detail(&RecipeId::new(3).expect("id"), &viewer)
            .await
            .expect("detail");
        assert_eq!(detail.author_username, "alice");
        assert_eq!(detail.is_favorite, expected_favorite);
    }

    #[rstest]
    #[tokio::test]
    async fn list_by_unknown_author_is_not_found() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().times(1).return_once(|_| Ok(None));
        let mut recipes = MockRecipeRepository::new();
        recipes.expect_list_by_author().never();

        let err = service(recipes, users, MockFavoriteRepository::new())
            .list_by_author(&UserId::new(9).expect("id"))
            .await
            .expect_err("unknown author");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[tokio::test]
    async fn list_by_author_returns_their_recipes() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().return_once(|_| Ok(Some(alice())));
        let mut recipes = MockRecipeRepository::new();
        recipes
            .expect_list_by_author()
            .return_once(|_| Ok(vec![stored(1, 1, "Cake"), stored(2, 1, "Pie")]));

        let listed = service(recipes, users, MockFavoriteRepository::new())
            .list_by_author(&UserId::new(1).expect("id"))
            .await
            .expect("list");
        assert_eq!(listed.len(), 2);
    }

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    #[case(Some("  "))]
    #[tokio::test]
    async fn blank_search_skips_storage(#[case] raw: Option<&str>) {
        let mut recipes = MockRecipeRepository::new();
        recipes.expect_search().never();

        let found = service(recipes, MockUserRepository::new(), MockFavoriteRepository::new())
            .search(&SearchQuery::new(raw))
            .await
            .expect("search");
        assert!(found.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn search_delegates_trimmed_term() {
        let mut recipes = MockRecipeRepository::new();
        recipes
            .expect_search()
            .withf(|query| query.term() == Some("chocolate"))
            .times(1)
            .return_once(|_| Ok(vec![stored(1, 1, "Chocolate Cake")]));

        let found = service(recipes, MockUserRepository::new(), MockFavoriteRepository::new())
            .search(&SearchQuery::new(Some("  chocolate ")))
            .await
            .expect("search");
        assert_eq!(found.len(), 1);
    }
}
