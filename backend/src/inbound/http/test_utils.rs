//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpResponse, web};

use crate::domain::ports::{
    MockAccountsCommand, MockFavoritesCommand, MockFavoritesQuery, MockLoginService,
    MockRecipesCommand, MockRecipesQuery, MockUsersQuery,
};
use crate::domain::{Error, UserId};

use super::session::{SessionContext, SessionRegistry};
use super::state::HttpState;
use super::validation::{json_config, path_config};

/// Path that signs the caller in as the user id in the last segment.
pub const TEST_LOGIN_PATH: &str = "/api/v1/test-login";

/// Session middleware for tests: fresh key, cookie named `session`, and no
/// `Secure` flag so plain-HTTP test requests carry it.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// The `session` cookie set on a response.
pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Cookie<'static> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("response sets a session cookie")
}

/// Driving-port doubles; tests set expectations on the ones they touch.
#[derive(Default)]
pub struct MockPorts {
    pub login: MockLoginService,
    pub accounts: MockAccountsCommand,
    pub users: MockUsersQuery,
    pub recipes: MockRecipesCommand,
    pub recipes_query: MockRecipesQuery,
    pub favorites: MockFavoritesCommand,
    pub favorites_query: MockFavoritesQuery,
}

impl MockPorts {
    pub fn into_state(self) -> HttpState {
        HttpState {
            login: Arc::new(self.login),
            accounts: Arc::new(self.accounts),
            users: Arc::new(self.users),
            recipes: Arc::new(self.recipes),
            recipes_query: Arc::new(self.recipes_query),
            favorites: Arc::new(self.favorites),
            favorites_query: Arc::new(self.favorites_query),
        }
    }
}

async fn test_login(session: SessionContext, path: web::Path<i64>) -> Result<HttpResponse, Error> {
    let user_id = UserId::new(path.into_inner())
        .map_err(|err| Error::invalid_request(err.to_string()))?;
    session.persist_user(&user_id)?;
    Ok(HttpResponse::NoContent().finish())
}

/// The full `/api/v1` surface over `ports`, plus a sign-in shortcut at
/// [`TEST_LOGIN_PATH`].
pub fn test_app(
    ports: MockPorts,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(ports.into_state()))
        .app_data(web::Data::new(SessionRegistry::default()))
        .app_data(json_config())
        .app_data(path_config())
        .service(
            web::scope("/api/v1")
                .wrap(test_session_middleware())
                .route("/test-login/{id}", web::post().to(test_login))
                .configure(super::configure_api),
        )
}
