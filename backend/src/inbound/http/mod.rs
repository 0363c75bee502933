//! HTTP inbound adapter exposing the recipe box REST endpoints.

pub mod error;
pub mod favorites;
pub mod health;
pub mod recipes;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

use actix_web::web;

/// Register every `/api/v1` handler on `cfg`.
///
/// `search_recipes` is registered ahead of `get_recipe` so `/recipes/search`
/// is not captured by the `{id}` segment.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use recipe_box::inbound::http::configure_api;
///
/// let _app = App::new().service(web::scope("/api/v1").configure(configure_api));
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(users::register)
        .service(users::login)
        .service(users::logout)
        .service(users::profile)
        .service(recipes::list_recipes)
        .service(recipes::create_recipe)
        .service(recipes::search_recipes)
        .service(recipes::get_recipe)
        .service(recipes::my_recipes)
        .service(recipes::recipes_by_author)
        .service(favorites::add_favorite)
        .service(favorites::list_favorites);
}
