//! HTTP-level tests for the sign-up / sign-in / sign-out endpoints.

mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use sample_auth::{api::routes::create_router, AppConfig, AppState};
use serde_json::{json, Value};

async fn create_test_server(config: AppConfig) -> TestServer {
    let users = common::memory_store().await;
    let state = AppState::new(config, users);

    TestServer::builder()
        .save_cookies()
        .build(create_router(state))
        .expect("Failed to create test server")
}

async fn sign_up(server: &TestServer, email: &str) -> Value {
    let response = server
        .post("/users")
        .json(&json!({
            "name": "Example User",
            "email": email,
            "password": common::PASSWORD,
            "password_confirmation": common::PASSWORD,
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()
}

fn location(response: &axum_test::TestResponse) -> String {
    response
        .header("location")
        .to_str()
        .expect("location should be ASCII")
        .to_string()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server(AppConfig::default()).await;

    let response = server.get("/health").await;

    response.assert_status_ok();
    response.assert_text("OK");
}

#[tokio::test]
async fn test_sign_up_normalizes_email_and_signs_in() {
    let server = create_test_server(AppConfig::default()).await;

    let body = sign_up(&server, "USER@Example.com").await;

    assert_eq!(body["email"], "user@example.com");
    assert_eq!(body["admin"], false);
    assert!(body.get("password_digest").is_none());
    assert!(body.get("remember_digest").is_none());

    // The remember cookie from sign-up is already good for protected pages.
    let profile = server.get("/profile").await;
    profile.assert_status_ok();
    assert_eq!(profile.json::<Value>()["id"], body["id"]);
}

#[tokio::test]
async fn test_sign_up_validation_errors() {
    let server = create_test_server(AppConfig::default()).await;

    let response = server
        .post("/users")
        .json(&json!({
            "name": "",
            "email": "user_at_foo.org",
            "password": "foo",
            "password_confirmation": "bar",
        }))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body = response.json::<Value>();
    assert!(body["errors"]["name"].is_array());
    assert!(body["errors"]["email"].is_array());
    assert!(body["errors"]["password"].is_array());
    assert!(body["errors"]["password_confirmation"].is_array());
}

#[tokio::test]
async fn test_wrong_password_is_unauthorized() {
    let server = create_test_server(AppConfig::default()).await;
    sign_up(&server, "user@example.com").await;
    server.delete("/signout").await;

    let response = server
        .post("/signin")
        .json(&json!({ "email": "user@example.com", "password": "invalid" }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert!(response.maybe_cookie("remember_token").is_none());
}

#[tokio::test]
async fn test_anonymous_profile_redirects_to_sign_in() {
    let server = create_test_server(AppConfig::default()).await;

    let response = server.get("/profile").await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/signin");
}

#[tokio::test]
async fn test_sign_in_returns_to_stored_location_once() {
    let server = create_test_server(AppConfig::default()).await;
    sign_up(&server, "user@example.com").await;
    server.delete("/signout").await;

    // Denied request remembers where it was going.
    let denied = server.get("/profile").await;
    assert_eq!(location(&denied), "/signin");

    let signed_in = server
        .post("/signin")
        .json(&json!({ "email": "USER@example.com", "password": common::PASSWORD }))
        .await;
    signed_in.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(location(&signed_in), "/profile");
    assert!(!signed_in.cookie("remember_token").value().is_empty());

    // The stored location was consumed; the next sign-in goes to the default.
    let again = server
        .post("/signin")
        .json(&json!({ "email": "user@example.com", "password": common::PASSWORD }))
        .await;
    assert!(location(&again).starts_with("/users/"));
}

#[tokio::test]
async fn test_sign_out_deletes_cookie() {
    let server = create_test_server(AppConfig::default()).await;
    sign_up(&server, "user@example.com").await;
    server.get("/profile").await.assert_status_ok();

    let response = server.delete("/signout").await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
    assert_eq!(response.cookie("remember_token").value(), "");

    let profile = server.get("/profile").await;
    profile.assert_status(StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_show_unknown_user_is_not_found() {
    let server = create_test_server(AppConfig::default()).await;

    let response = server.get("/users/does-not-exist").await;

    response.assert_status(StatusCode::NOT_FOUND);
}
