//! OpenAPI document for the recipe box API.
//!
//! Served by Swagger UI in debug builds and written out by the
//! `openapi-dump` binary.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode, FavoriteRecipe, Recipe, RecipeDetail, User};
use crate::inbound::http::favorites::FavoriteResponse;
use crate::inbound::http::health::{ProbeBody, ProbeStatus};
use crate::inbound::http::recipes::RecipeRequest;
use crate::inbound::http::users::CredentialsRequest;

/// Registers the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login or /api/v1/register.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Recipe box API",
        description = "Accounts, recipes, keyword search and favorites behind a session cookie."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::register,
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::users::profile,
        crate::inbound::http::recipes::list_recipes,
        crate::inbound::http::recipes::create_recipe,
        crate::inbound::http::recipes::search_recipes,
        crate::inbound::http::recipes::get_recipe,
        crate::inbound::http::recipes::my_recipes,
        crate::inbound::http::recipes::recipes_by_author,
        crate::inbound::http::favorites::add_favorite,
        crate::inbound::http::favorites::list_favorites,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        User,
        Recipe,
        RecipeDetail,
        FavoriteRecipe,
        CredentialsRequest,
        RecipeRequest,
        FavoriteResponse,
        ProbeBody,
        ProbeStatus
    )),
    tags(
        (name = "users", description = "Registration, sign-in and profile"),
        (name = "recipes", description = "Publishing, browsing and searching recipes"),
        (name = "favorites", description = "Per-user favorite recipes"),
        (name = "health", description = "Orchestration probes")
    )
)]
pub struct ApiDoc;
