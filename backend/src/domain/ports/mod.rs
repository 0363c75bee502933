//! Domain ports for the hexagonal boundary.
//!
//! Driving ports (`*Command`, `*Query`, [`LoginService`]) are called by inbound
//! adapters. Driven ports (`*Repository`) are implemented by outbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod accounts_command;
mod favorite_repository;
mod favorites_command;
mod favorites_query;
mod login_service;
mod recipe_repository;
mod recipes_command;
mod recipes_query;
mod user_repository;
mod users_query;

pub use accounts_command::AccountsCommand;
#[cfg(test)]
pub use accounts_command::MockAccountsCommand;
#[cfg(test)]
pub use favorite_repository::MockFavoriteRepository;
pub use favorite_repository::{FavoritePersistenceError, FavoriteRepository};
pub use favorites_command::FavoritesCommand;
#[cfg(test)]
pub use favorites_command::MockFavoritesCommand;
pub use favorites_query::FavoritesQuery;
#[cfg(test)]
pub use favorites_query::MockFavoritesQuery;
pub use login_service::LoginService;
#[cfg(test)]
pub use login_service::MockLoginService;
#[cfg(test)]
pub use recipe_repository::MockRecipeRepository;
pub use recipe_repository::{NewRecipe, RecipePersistenceError, RecipeRepository};
#[cfg(test)]
pub use recipes_command::MockRecipesCommand;
pub use recipes_command::RecipesCommand;
#[cfg(test)]
pub use recipes_query::MockRecipesQuery;
pub use recipes_query::RecipesQuery;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{NewUser, UserCredentials, UserPersistenceError, UserRepository};
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::UsersQuery;
