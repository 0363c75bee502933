//! Favorite handlers.
//!
//! ```text
//! POST /api/v1/recipes/{id}/favorite
//! GET  /api/v1/favorites
//! ```

use actix_web::{get, post, web};
use serde::Serialize;

use crate::domain::{ApiResult, Error, FavoriteId, FavoriteRecipe, RecipeId};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_recipe_id};

/// Result of favoriting a recipe. Repeating the call returns the same id.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteResponse {
    #[schema(value_type = i64, example = 1)]
    pub favorite_id: FavoriteId,
    #[schema(value_type = i64, example = 1)]
    pub recipe_id: RecipeId,
}

/// Mark a recipe as a favorite of the signed-in user.
#[utoipa::path(
    post,
    path = "/api/v1/recipes/{id}/favorite",
    params(("id" = i64, Path, description = "Recipe id")),
    responses(
        (status = 200, description = "Recipe is a favorite", body = FavoriteResponse),
        (status = 400, description = "Invalid id", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 404, description = "No such recipe", body = Error)
    ),
    tags = ["favorites"],
    operation_id = "addFavorite"
)]
#[post("/recipes/{id}/favorite")]
pub async fn add_favorite(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<web::Json<FavoriteResponse>> {
    let user_id = session.require_user_id()?;
    let recipe_id = parse_recipe_id(path.into_inner(), FieldName::new("id"))?;
    let favorite_id = state.favorites.add_favorite(&user_id, &recipe_id).await?;
    Ok(web::Json(FavoriteResponse {
        favorite_id,
        recipe_id,
    }))
}

/// The signed-in user's favorites, in the order they were added.
#[utoipa::path(
    get,
    path = "/api/v1/favorites",
    responses(
        (status = 200, description = "Favorites", body = [FavoriteRecipe]),
        (status = 401, description = "Login required", body = Error)
    ),
    tags = ["favorites"],
    operation_id = "listFavorites"
)]
#[get("/favorites")]
pub async fn list_favorites(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<FavoriteRecipe>>> {
    let user_id = session.require_user_id()?;
    Ok(web::Json(state.favorites_query.list_for_user(&user_id).await?))
}
