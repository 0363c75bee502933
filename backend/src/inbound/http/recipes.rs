//! Recipe handlers.
//!
//! ```text
//! GET  /api/v1/recipes
//! POST /api/v1/recipes {"name":"Pancakes","tags":"breakfast","ingredients":"...","instructions":"..."}
//! GET  /api/v1/recipes/search?q=cake
//! GET  /api/v1/recipes/{id}
//! GET  /api/v1/my-recipes
//! GET  /api/v1/users/{id}/recipes
//! ```

use actix_web::http::header;
use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::IntoParams;

use crate::domain::{ApiResult, Error, Recipe, RecipeDetail, RecipeDraft, SearchQuery};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_recipe_id, parse_user_id};

/// Body for `POST /api/v1/recipes`. `tags` may be omitted.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeRequest {
    #[schema(example = "Pancakes")]
    pub name: String,
    #[serde(default)]
    #[schema(example = "breakfast, sweet")]
    pub tags: String,
    #[schema(example = "flour, milk, eggs")]
    pub ingredients: String,
    #[schema(example = "Whisk, rest, fry.")]
    pub instructions: String,
}

impl TryFrom<&RecipeRequest> for RecipeDraft {
    type Error = crate::domain::RecipeValidationError;

    fn try_from(value: &RecipeRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(
            &value.name,
            &value.tags,
            &value.ingredients,
            &value.instructions,
        )
    }
}

/// Query string for keyword search.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Matched case-insensitively against recipe names and tags.
    pub q: Option<String>,
}

/// Every recipe, oldest first.
#[utoipa::path(
    get,
    path = "/api/v1/recipes",
    responses(
        (status = 200, description = "All recipes", body = [Recipe]),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["recipes"],
    operation_id = "listRecipes",
    security([])
)]
#[get("/recipes")]
pub async fn list_recipes(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Recipe>>> {
    Ok(web::Json(state.recipes_query.list_all().await?))
}

/// Publish a recipe as the signed-in user.
#[utoipa::path(
    post,
    path = "/api/v1/recipes",
    request_body = RecipeRequest,
    responses(
        (status = 201, description = "Recipe created", body = Recipe,
            headers(("Location" = String, description = "URL of the new recipe"))),
        (status = 400, description = "Invalid recipe", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 404, description = "Author no longer exists", body = Error)
    ),
    tags = ["recipes"],
    operation_id = "createRecipe"
)]
#[post("/recipes")]
pub async fn create_recipe(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<RecipeRequest>,
) -> ApiResult<HttpResponse> {
    let author = session.require_user_id()?;
    let draft = RecipeDraft::try_from(&*payload)?;
    let id = state.recipes.create_recipe(&author, &draft).await?;
    let recipe = state.recipes_query.get_recipe(&id).await?;
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/api/v1/recipes/{id}")))
        .json(recipe))
}

/// Keyword search over names and tags. A blank or missing `q` yields `[]`.
#[utoipa::path(
    get,
    path = "/api/v1/recipes/search",
    params(SearchParams),
    responses(
        (status = 200, description = "Matching recipes", body = [Recipe]),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["recipes"],
    operation_id = "searchRecipes",
    security([])
)]
#[get("/recipes/search")]
pub async fn search_recipes(
    state: web::Data<HttpState>,
    params: web::Query<SearchParams>,
) -> ApiResult<web::Json<Vec<Recipe>>> {
    let query = SearchQuery::new(params.q.as_deref());
    Ok(web::Json(state.recipes_query.search(&query).await?))
}

/// One recipe with its author's username and the viewer's favorite flag.
#[utoipa::path(
    get,
    path = "/api/v1/recipes/{id}",
    params(("id" = i64, Path, description = "Recipe id")),
    responses(
        (status = 200, description = "Recipe detail", body = RecipeDetail),
        (status = 400, description = "Invalid id", body = Error),
        (status = 404, description = "No such recipe", body = Error)
    ),
    tags = ["recipes"],
    operation_id = "getRecipe",
    security([])
)]
#[get("/recipes/{id}")]
pub async fn get_recipe(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<web::Json<RecipeDetail>> {
    let id = parse_recipe_id(path.into_inner(), FieldName::new("id"))?;
    let detail = state
        .recipes_query
        .recipe_detail(&id, &session.identity())
        .await?;
    Ok(web::Json(detail))
}

/// Recipes written by the signed-in user.
#[utoipa::path(
    get,
    path = "/api/v1/my-recipes",
    responses(
        (status = 200, description = "Own recipes", body = [Recipe]),
        (status = 401, description = "Login required", body = Error)
    ),
    tags = ["recipes"],
    operation_id = "myRecipes"
)]
#[get("/my-recipes")]
pub async fn my_recipes(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<Recipe>>> {
    let author = session.require_user_id()?;
    Ok(web::Json(state.recipes_query.list_by_author(&author).await?))
}

/// Recipes written by any registered user.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}/recipes",
    params(("id" = i64, Path, description = "Author's user id")),
    responses(
        (status = 200, description = "The author's recipes", body = [Recipe]),
        (status = 400, description = "Invalid id", body = Error),
        (status = 404, description = "No such user", body = Error)
    ),
    tags = ["recipes"],
    operation_id = "recipesByAuthor",
    security([])
)]
#[get("/users/{id}/recipes")]
pub async fn recipes_by_author(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<Vec<Recipe>>> {
    let author = parse_user_id(path.into_inner(), FieldName::new("id"))?;
    Ok(web::Json(state.recipes_query.list_by_author(&author).await?))
}
