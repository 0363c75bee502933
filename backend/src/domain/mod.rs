//! Domain primitives, services, and ports.
//!
//! Purpose: define the strongly typed entities of the recipe box (users,
//! recipes, favorites), the services that enforce their rules, and the ports
//! that connect those services to inbound and outbound adapters.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - User, Username, UserId: registered accounts.
//! - Recipe, RecipeDraft, RecipeDetail, SearchQuery: recipes and lookups.
//! - FavoriteId, FavoriteRecipe: the favorites ledger.
//! - Credentials, Identity, PasswordHash: authentication.
//! - AccountService, RecipeService, FavoriteService: driving port
//!   implementations.

pub mod accounts;
pub mod auth;
pub mod error;
pub mod favorite;
pub mod favorites;
pub mod password;
pub mod ports;
pub mod recipe;
pub mod recipes;
pub mod trace_id;
pub mod user;

pub use self::accounts::AccountService;
pub use self::auth::{Credentials, CredentialsValidationError, Identity};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::favorite::{FavoriteId, FavoriteRecipe};
pub use self::favorites::FavoriteService;
pub use self::password::{PasswordError, PasswordHash};
pub use self::recipe::{
    RECIPE_NAME_MAX, RECIPE_TAGS_MAX, Recipe, RecipeDetail, RecipeDraft, RecipeId,
    RecipeValidationError, SearchQuery,
};
pub use self::recipes::RecipeService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{USERNAME_MAX, User, UserId, UserValidationError, Username};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use recipe_box::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::unauthorized("login required"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
