//! Tests for the account handlers.

use super::*;
use crate::domain::{UserId, Username};
use crate::inbound::http::test_utils::{MockPorts, TEST_LOGIN_PATH, session_cookie, test_app};
use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use chrono::{TimeZone, Utc};
use rstest::rstest;
use serde_json::Value;

fn alice() -> User {
    User::new(
        UserId::new(7).expect("fixture id"),
        Username::new("alice").expect("fixture username"),
        Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0)
            .single()
            .expect("fixture timestamp"),
    )
}

fn body(username: &str, password: &str) -> CredentialsRequest {
    CredentialsRequest {
        username: username.into(),
        password: password.into(),
    }
}

#[actix_web::test]
async fn register_creates_account_and_signs_in() {
    let mut ports = MockPorts::default();
    ports
        .accounts
        .expect_register()
        .withf(|creds| creds.username().as_ref() == "alice" && creds.password() == "s3cret")
        .times(1)
        .returning(|_| Ok(UserId::new(7).expect("fixture id")));
    ports
        .users
        .expect_get_user()
        .returning(|_| Ok(alice()))
        .times(2);
    let app = actix_test::init_service(test_app(ports)).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/register")
            .set_json(body("  alice ", "s3cret"))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let cookie = session_cookie(&res);
    let value: Value = actix_test::read_body_json(res).await;
    assert_eq!(value["id"], 7);
    assert_eq!(value["username"], "alice");
    assert!(value.get("registeredAt").is_some());
    assert!(value.get("passwordHash").is_none());

    let profile_res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/profile")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(profile_res.status(), StatusCode::OK);
}

#[actix_web::test]
async fn register_reports_conflict() {
    let mut ports = MockPorts::default();
    ports
        .accounts
        .expect_register()
        .returning(|_| Err(Error::conflict("username already taken")));
    let app = actix_test::init_service(test_app(ports)).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/register")
            .set_json(body("alice", "s3cret"))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let value: Value = actix_test::read_body_json(res).await;
    assert_eq!(value["code"], "conflict");
}

#[rstest]
#[case("/api/v1/register", "   ", "pw", "username")]
#[case("/api/v1/register", "alice", "", "password")]
#[case("/api/v1/login", "", "pw", "username")]
#[case("/api/v1/login", "alice", "", "password")]
#[actix_web::test]
async fn invalid_credentials_are_rejected_before_the_store(
    #[case] uri: &str,
    #[case] username: &str,
    #[case] password: &str,
    #[case] field: &str,
) {
    let app = actix_test::init_service(test_app(MockPorts::default())).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri(uri)
            .set_json(body(username, password))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let value: Value = actix_test::read_body_json(res).await;
    assert_eq!(value["code"], "invalid_request");
    assert_eq!(value["details"]["field"], field);
}

#[actix_web::test]
async fn login_sets_session_cookie() {
    let mut ports = MockPorts::default();
    ports
        .login
        .expect_authenticate()
        .returning(|_| Ok(Some(UserId::new(7).expect("fixture id"))));
    let app = actix_test::init_service(test_app(ports)).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(body("alice", "s3cret"))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(session_cookie(&res).name(), "session");
}

#[actix_web::test]
async fn login_rejects_unknown_credentials() {
    let mut ports = MockPorts::default();
    ports.login.expect_authenticate().returning(|_| Ok(None));
    let app = actix_test::init_service(test_app(ports)).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(body("alice", "wrong"))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let value: Value = actix_test::read_body_json(res).await;
    assert_eq!(value["message"], "invalid credentials");
}

#[actix_web::test]
async fn profile_requires_session() {
    let app = actix_test::init_service(test_app(MockPorts::default())).await;
    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/profile")
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn logout_clears_the_session() {
    let mut ports = MockPorts::default();
    ports.users.expect_get_user().never();
    let app = actix_test::init_service(test_app(ports)).await;

    let signed_in = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri(&format!("{TEST_LOGIN_PATH}/7"))
            .to_request(),
    )
    .await;
    let signed_out = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/logout")
            .cookie(session_cookie(&signed_in))
            .to_request(),
    )
    .await;
    assert_eq!(signed_out.status(), StatusCode::NO_CONTENT);

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/profile")
            .cookie(session_cookie(&signed_out))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}
