//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and depend only on driving
//! ports, so they can be tested with doubles and no I/O.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{
    AccountsCommand, FavoriteRepository, FavoritesCommand, FavoritesQuery, LoginService,
    RecipeRepository, RecipesCommand, RecipesQuery, UserRepository, UsersQuery,
};
use crate::domain::{AccountService, FavoriteService, RecipeService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub accounts: Arc<dyn AccountsCommand>,
    pub users: Arc<dyn UsersQuery>,
    pub recipes: Arc<dyn RecipesCommand>,
    pub recipes_query: Arc<dyn RecipesQuery>,
    pub favorites: Arc<dyn FavoritesCommand>,
    pub favorites_query: Arc<dyn FavoritesQuery>,
}

impl HttpState {
    /// Wire every port from one implementation of all of them, as the
    /// default service stack does.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use mockable::DefaultClock;
    /// use recipe_box::inbound::http::state::HttpState;
    /// use recipe_box::outbound::memory::MemoryStore;
    ///
    /// let state = HttpState::from_store(Arc::new(MemoryStore::new()), Arc::new(DefaultClock));
    /// let _login = state.login.clone();
    /// ```
    pub fn from_store<S>(store: Arc<S>, clock: Arc<dyn Clock>) -> Self
    where
        S: UserRepository + RecipeRepository + FavoriteRepository + 'static,
    {
        Self::from_repositories(store.clone(), store.clone(), store, clock)
    }

    /// Build the domain services over separate repositories.
    pub fn from_repositories<U, R, F>(
        users: Arc<U>,
        recipes: Arc<R>,
        favorites: Arc<F>,
        clock: Arc<dyn Clock>,
    ) -> Self
    where
        U: UserRepository + 'static,
        R: RecipeRepository + 'static,
        F: FavoriteRepository + 'static,
    {
        let accounts = Arc::new(AccountService::new(users.clone(), clock.clone()));
        let recipe_service = Arc::new(RecipeService::new(
            recipes,
            users.clone(),
            favorites.clone(),
            clock,
        ));
        let favorite_service = Arc::new(FavoriteService::new(favorites, users));

        Self {
            login: accounts.clone(),
            accounts: accounts.clone(),
            users: accounts,
            recipes: recipe_service.clone(),
            recipes_query: recipe_service,
            favorites: favorite_service.clone(),
            favorites_query: favorite_service,
        }
    }
}
