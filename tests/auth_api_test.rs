//! Registration, login and account administration.

mod common;

use axum::http::{Method, StatusCode};
use common::{response_json, TestApp, TEST_PASSWORD};
use serde_json::{json, Value};
use warehouse_api::auth::UserRole;

async fn post_public(app: &TestApp, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app.request(Method::POST, uri, Some(body), None).await;
    let status = response.status();
    (status, response_json(response).await)
}

#[tokio::test]
async fn register_then_login_yields_logistic_token() {
    let app = TestApp::new().await;

    let (status, registered) = post_public(
        &app,
        "/api/auth/register",
        json!({ "email": "jo@example.com", "username": "jo", "password": TEST_PASSWORD }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", registered);
    assert_eq!(registered["message"], "User registered successfully!");
    assert_eq!(registered["user"]["role"], "Logistic");
    assert!(registered["token"].as_str().is_some_and(|t| !t.is_empty()));

    let (status, logged_in) = post_public(
        &app,
        "/api/auth/login",
        json!({ "username": "jo", "password": TEST_PASSWORD }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", logged_in);
    assert_eq!(logged_in["message"], "Login successful!");
    assert!(logged_in["expiration"].as_str().is_some());

    let token = logged_in["token"].as_str().unwrap_or_default().to_string();
    let claims = app
        .state
        .auth_service()
        .validate_token(&token)
        .expect("issued token validates");
    assert_eq!(claims.roles, vec!["Logistic".to_string()]);
    assert!(claims.permissions.iter().any(|p| p == "stocks:create"));
}

#[tokio::test]
async fn duplicate_email_and_username_conflict() {
    let app = TestApp::new().await;

    let (status, _) = post_public(
        &app,
        "/api/auth/register",
        json!({ "email": "sam@example.com", "username": "sam", "password": "pw" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = post_public(
        &app,
        "/api/auth/register",
        json!({ "email": "sam@example.com", "username": "sam2", "password": "pw" }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["message"]
        .as_str()
        .unwrap_or_default()
        .contains("User with this email already exists."));

    let (status, body) = post_public(
        &app,
        "/api/auth/register",
        json!({ "email": "other@example.com", "username": "sam", "password": "pw" }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["message"]
        .as_str()
        .unwrap_or_default()
        .contains("Username already taken."));
}

#[tokio::test]
async fn wrong_password_and_unknown_user_are_unauthorized() {
    let app = TestApp::new().await;
    post_public(
        &app,
        "/api/auth/register",
        json!({ "email": "kim@example.com", "username": "kim", "password": TEST_PASSWORD }),
    )
    .await;

    for body in [
        json!({ "username": "kim", "password": "not-it" }),
        json!({ "username": "nobody", "password": TEST_PASSWORD }),
    ] {
        let (status, error) = post_public(&app, "/api/auth/login", body).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(error["message"]
            .as_str()
            .unwrap_or_default()
            .contains("Invalid username or password."));
    }
}

#[tokio::test]
async fn register_rejects_malformed_email() {
    let app = TestApp::new().await;
    let (status, _) = post_public(
        &app,
        "/api/auth/register",
        json!({ "email": "not-an-email", "username": "x", "password": "pw" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn super_admin_manages_accounts() {
    let app = TestApp::new().await;
    let admin = app.token_for(UserRole::SuperAdmin).await;

    let created = app
        .expect_json(
            Method::POST,
            "/api/user",
            Some(json!({
                "username": "lee",
                "email": "lee@example.com",
                "password": TEST_PASSWORD,
                "role": "Manager"
            })),
            &admin,
            StatusCode::CREATED,
        )
        .await;
    assert_eq!(created["role"], "Manager");
    let uri = format!("/api/user/{}", created["id"].as_str().unwrap_or_default());

    let updated = app
        .expect_json(
            Method::PUT,
            &uri,
            Some(json!({ "role": "Logistic", "email": "lee@warehouse.example.com" })),
            &admin,
            StatusCode::OK,
        )
        .await;
    assert_eq!(updated["role"], "Logistic");
    assert_eq!(updated["email"], "lee@warehouse.example.com");
    assert_eq!(updated["username"], "lee");

    let listed = app
        .expect_json(Method::GET, "/api/user", None, &admin, StatusCode::OK)
        .await;
    assert_eq!(listed.as_array().map(Vec::len), Some(2));

    let deleted = app
        .expect_json(Method::DELETE, &uri, None, &admin, StatusCode::OK)
        .await;
    assert_eq!(deleted["message"], "User deleted successfully.");
    app.expect_json(Method::GET, &uri, None, &admin, StatusCode::NOT_FOUND)
        .await;
}

#[tokio::test]
async fn create_user_rejects_unknown_role() {
    let app = TestApp::new().await;
    let admin = app.token_for(UserRole::SuperAdmin).await;

    app.expect_json(
        Method::POST,
        "/api/user",
        Some(json!({
            "username": "pat",
            "email": "pat@example.com",
            "password": TEST_PASSWORD,
            "role": "Janitor"
        })),
        &admin,
        StatusCode::BAD_REQUEST,
    )
    .await;
}

#[tokio::test]
async fn super_admin_seed_runs_once() {
    let app = TestApp::new().await;
    let users = &app.state.services.users;

    users
        .ensure_super_admin(&app.state.config)
        .await
        .expect("seed super admin");
    users
        .ensure_super_admin(&app.state.config)
        .await
        .expect("second seed is a no-op");

    let accounts = users.list_users().await.expect("list users");
    assert_eq!(accounts.len(), 1);
    assert_eq!(accounts[0].role.as_deref(), Some("SuperAdmin"));
    assert_eq!(accounts[0].username, app.state.config.admin_username);
}
