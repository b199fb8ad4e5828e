mod common;

use axum::http::{Method, StatusCode};
use common::spawn_app;
use serde_json::json;

#[tokio::test]
async fn healthz_is_public() {
    let app = spawn_app().await;
    let response = app.send(Method::GET, "/api/v1/healthz", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(&response.body[..], b"ok");
}

#[tokio::test]
async fn protected_routes_require_a_valid_token() {
    let app = spawn_app().await;

    let missing = app.send(Method::GET, "/api/v1/expenses", None, None).await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);

    let garbage = app
        .send(Method::GET, "/api/v1/expenses", Some("not-a-jwt"), None)
        .await;
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);

    let token = app.register("ada").await;
    let ok = app
        .send(Method::GET, "/api/v1/expenses", Some(&token), None)
        .await;
    assert_eq!(ok.status, StatusCode::OK);
}

#[tokio::test]
async fn register_then_login() {
    let app = spawn_app().await;
    let register = app
        .send(
            Method::POST,
            "/api/v1/auth/register",
            None,
            Some(json!({ "username": "ada", "email": "Ada@Example.com", "password": "pw-123" })),
        )
        .await;
    assert_eq!(register.status, StatusCode::CREATED);
    let registered = register.json();
    assert_eq!(registered["tokenType"], "Bearer");
    assert_eq!(registered["user"]["email"], "ada@example.com");
    assert!(registered["user"].get("passwordHash").is_none());

    let login = app
        .send(
            Method::POST,
            "/api/v1/auth/login",
            None,
            Some(json!({ "email": "ada@example.com", "password": "pw-123" })),
        )
        .await;
    assert_eq!(login.status, StatusCode::OK);
    let logged_in = login.json();
    assert_eq!(logged_in["user"]["id"], registered["user"]["id"]);

    let token = logged_in["accessToken"].as_str().unwrap();
    let listed = app
        .send(Method::GET, "/api/v1/expenses", Some(token), None)
        .await;
    assert_eq!(listed.status, StatusCode::OK);
}

#[tokio::test]
async fn bad_credentials_look_the_same() {
    let app = spawn_app().await;
    app.register("ada").await;

    let wrong_password = app
        .send(
            Method::POST,
            "/api/v1/auth/login",
            None,
            Some(json!({ "email": "ada@example.com", "password": "nope" })),
        )
        .await;
    let unknown_email = app
        .send(
            Method::POST,
            "/api/v1/auth/login",
            None,
            Some(json!({ "email": "who@example.com", "password": "nope" })),
        )
        .await;

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.json(), unknown_email.json());
    assert_eq!(wrong_password.json()["message"], "Invalid email or password");
}

#[tokio::test]
async fn duplicate_and_invalid_registrations_are_refused() {
    let app = spawn_app().await;
    app.register("ada").await;

    let duplicate = app
        .send(
            Method::POST,
            "/api/v1/auth/register",
            None,
            Some(json!({ "username": "ada", "email": "other@example.com", "password": "pw" })),
        )
        .await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);
    assert_eq!(duplicate.json()["message"], "Email or username exists");

    let invalid = app
        .send(
            Method::POST,
            "/api/v1/auth/register",
            None,
            Some(json!({ "username": "bob", "email": "bob", "password": "pw" })),
        )
        .await;
    assert_eq!(invalid.status, StatusCode::UNPROCESSABLE_ENTITY);
}
