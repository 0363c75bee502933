//! Account handlers: registration, sign-in, sign-out and the profile.
//!
//! ```text
//! POST /api/v1/register {"username":"alice","password":"s3cret"}
//! POST /api/v1/login    {"username":"alice","password":"s3cret"}
//! POST /api/v1/logout
//! GET  /api/v1/profile
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::{ApiResult, Credentials, CredentialsValidationError, Error, User};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Username and password, shared by `register` and `login`.
///
/// Example JSON: `{"username":"alice","password":"s3cret"}`
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CredentialsRequest {
    #[schema(example = "alice")]
    pub username: String,
    #[schema(example = "s3cret", format = Password)]
    pub password: String,
}

impl TryFrom<CredentialsRequest> for Credentials {
    type Error = CredentialsValidationError;

    fn try_from(value: CredentialsRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password)
    }
}

/// Create an account and sign it in.
#[utoipa::path(
    post,
    path = "/api/v1/register",
    request_body = CredentialsRequest,
    responses(
        (status = 201, description = "Account created", body = User,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Username already taken", body = Error),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CredentialsRequest>,
) -> ApiResult<HttpResponse> {
    let credentials = Credentials::try_from(payload.into_inner())?;
    let user_id = state.accounts.register(&credentials).await?;
    let user = state.users.get_user(&user_id).await?;
    session.persist_user(&user_id)?;
    Ok(HttpResponse::Created().json(user))
}

/// Authenticate and establish a session.
///
/// A wrong password and an unknown username both answer `401` with the same
/// message.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Login success",
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CredentialsRequest>,
) -> ApiResult<HttpResponse> {
    let credentials = Credentials::try_from(payload.into_inner())?;
    let Some(user_id) = state.login.authenticate(&credentials).await? else {
        return Err(Error::unauthorized("invalid credentials"));
    };
    session.persist_user(&user_id)?;
    info!(user_id = %user_id, "user signed in");
    Ok(HttpResponse::Ok().finish())
}

/// End the session. Succeeds whether or not anyone was signed in.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses((status = 204, description = "Session cleared")),
    tags = ["users"],
    operation_id = "logout",
    security([])
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.logout();
    HttpResponse::NoContent().finish()
}

/// The signed-in user's profile.
#[utoipa::path(
    get,
    path = "/api/v1/profile",
    responses(
        (status = 200, description = "Current user", body = User),
        (status = 401, description = "Login required", body = Error),
        (status = 404, description = "Account no longer exists", body = Error)
    ),
    tags = ["users"],
    operation_id = "profile"
)]
#[get("/profile")]
pub async fn profile(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<User>> {
    let user_id = session.require_user_id()?;
    let user = state.users.get_user(&user_id).await?;
    Ok(web::Json(user))
}

#[cfg(test)]
mod tests;
