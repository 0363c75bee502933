//! Session-backed auth gate.
//!
//! Wraps the Actix session so handlers only see domain operations: sign a
//! user in, resolve the request [`Identity`], require a signed-in user, or
//! sign out. The cookie holds an opaque token; [`SessionRegistry`] maps it
//! to the user on the server.

mod registry;

pub use registry::SessionRegistry;

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;
use tracing::warn;
use uuid::Uuid;

use crate::domain::{Error, Identity, UserId};

pub(crate) const TOKEN_KEY: &str = "token";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext {
    session: Session,
    registry: SessionRegistry,
}

impl SessionContext {
    pub fn new(session: Session, registry: SessionRegistry) -> Self {
        Self { session, registry }
    }

    fn token(&self) -> Option<Uuid> {
        match self.session.get::<String>(TOKEN_KEY) {
            Ok(Some(raw)) => match Uuid::parse_str(&raw) {
                Ok(token) => Some(token),
                Err(error) => {
                    warn!(%error, "malformed token in session cookie");
                    None
                }
            },
            Ok(None) => None,
            Err(error) => {
                warn!(%error, "unreadable token in session cookie");
                None
            }
        }
    }

    /// Bind the session to `user_id` under a fresh token, rotating the
    /// session key and revoking any token the cookie held before.
    pub fn persist_user(&self, user_id: &UserId) -> Result<(), Error> {
        if let Some(previous) = self.token() {
            self.registry.revoke(&previous);
        }
        self.session.renew();
        let token = self.registry.issue(*user_id);
        self.session
            .insert(TOKEN_KEY, token.to_string())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Resolve who is making the request.
    ///
    /// A token that is malformed, unknown, expired or revoked is anonymous.
    pub fn identity(&self) -> Identity {
        self.token()
            .and_then(|token| self.registry.resolve(&token))
            .map_or(Identity::Anonymous, Identity::Authenticated)
    }

    /// Require a signed-in user or fail with `401 Unauthorized`.
    pub fn require_user_id(&self) -> Result<UserId, Error> {
        self.identity().require()
    }

    /// Revoke the token server-side and drop the cookie state, so the
    /// cookie is dead even if a copy was kept.
    pub fn logout(&self) {
        if let Some(token) = self.token() {
            self.registry.revoke(&token);
        }
        self.session.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let registry = req
            .app_data::<web::Data<SessionRegistry>>()
            .map(|data| data.get_ref().clone());
        let fut = Session::from_request(req, payload);
        Box::pin(async move {
            let session = fut.await?;
            let registry = registry
                .ok_or_else(|| Error::internal("session registry is not configured"))?;
            Ok(SessionContext::new(session, registry))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::{session_cookie, test_session_middleware};
    use actix_web::dev::ServiceResponse;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test as actix_test};

    fn session_test_app(
        registry: SessionRegistry,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(registry))
            .wrap(test_session_middleware())
            .route(
                "/login",
                web::get().to(|session: SessionContext| async move {
                    session.persist_user(&UserId::new(42).expect("fixture id"))?;
                    Ok::<_, Error>(HttpResponse::Ok())
                }),
            )
            .route(
                "/whoami",
                web::get().to(|session: SessionContext| async move {
                    let id = session.require_user_id()?;
                    Ok::<_, Error>(HttpResponse::Ok().body(id.to_string()))
                }),
            )
            .route(
                "/logout",
                web::get().to(|session: SessionContext| async move {
                    session.logout();
                    HttpResponse::Ok()
                }),
            )
            .route(
                "/set-token/{raw}",
                web::get().to(|session: Session, raw: web::Path<String>| async move {
                    session
                        .insert(TOKEN_KEY, raw.into_inner())
                        .expect("set raw token");
                    HttpResponse::Ok()
                }),
            )
            .route(
                "/identity",
                web::get().to(|session: SessionContext| async move {
                    HttpResponse::Ok().body(format!("{:?}", session.identity()))
                }),
            )
    }

    macro_rules! get {
        ($app:expr, $uri:expr) => {
            actix_test::call_service(
                &$app,
                actix_test::TestRequest::get().uri($uri).to_request(),
            )
            .await
        };
        ($app:expr, $uri:expr, $cookie:expr) => {
            actix_test::call_service(
                &$app,
                actix_test::TestRequest::get().uri($uri).cookie($cookie).to_request(),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn round_trips_user_id() {
        let app = actix_test::init_service(session_test_app(SessionRegistry::default())).await;

        let login = get!(app, "/login");
        assert_eq!(login.status(), StatusCode::OK);
        let cookie = session_cookie(&login);

        let res = get!(app, "/whoami", cookie);
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(actix_test::read_body(res).await, "42");
    }

    #[actix_web::test]
    async fn missing_user_is_unauthorised() {
        let app = actix_test::init_service(session_test_app(SessionRegistry::default())).await;

        let res = get!(app, "/whoami");
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn logout_returns_to_anonymous() {
        let app = actix_test::init_service(session_test_app(SessionRegistry::default())).await;

        let login = get!(app, "/login");
        let logout = get!(app, "/logout", session_cookie(&login));
        let cleared = session_cookie(&logout);

        let res = get!(app, "/whoami", cleared);
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn cookie_kept_from_before_logout_is_rejected() {
        let registry = SessionRegistry::default();
        let app = actix_test::init_service(session_test_app(registry.clone())).await;

        let login = get!(app, "/login");
        let kept = session_cookie(&login);
        let before = get!(app, "/whoami", kept.clone());
        assert_eq!(before.status(), StatusCode::OK);

        let logout = get!(app, "/logout", kept.clone());
        assert_eq!(logout.status(), StatusCode::OK);
        assert!(registry.is_empty());

        let replayed = get!(app, "/whoami", kept);
        assert_eq!(replayed.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn signing_in_again_revokes_the_previous_token() {
        let registry = SessionRegistry::default();
        let app = actix_test::init_service(session_test_app(registry.clone())).await;

        let first = session_cookie(&get!(app, "/login"));
        let second = session_cookie(&get!(app, "/login", first.clone()));

        assert_eq!(registry.len(), 1);
        assert_eq!(
            get!(app, "/whoami", first).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get!(app, "/whoami", second).status(),
            StatusCode::OK
        );
    }

    #[actix_web::test]
    async fn forged_tokens_are_anonymous() {
        let app = actix_test::init_service(session_test_app(SessionRegistry::default())).await;

        for raw in ["not-a-token".to_owned(), Uuid::new_v4().to_string()] {
            let set = get!(app, &format!("/set-token/{raw}"));
            let res = get!(app, "/identity", session_cookie(&set));
            assert_eq!(actix_test::read_body(res).await, "Anonymous");
        }
    }

    #[actix_web::test]
    async fn missing_registry_is_a_server_error() {
        let app = actix_test::init_service(App::new().wrap(test_session_middleware()).route(
            "/identity",
            web::get().to(|session: SessionContext| async move {
                HttpResponse::Ok().body(format!("{:?}", session.identity()))
            }),
        ))
        .await;

        let res = get!(app, "/identity");
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
