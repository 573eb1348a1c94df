//! Role-based access to the inventory and account routes.

mod common;

use axum::http::{Method, StatusCode};
use common::{response_json, TestApp};
use rstest::rstest;
use serde_json::json;
use warehouse_api::auth::UserRole;

#[rstest]
#[case::warehouses("/api/warehouses")]
#[case::shelves("/api/shelves")]
#[case::items("/api/items")]
#[case::suppliers("/api/suppliers")]
#[case::stocks("/api/stocks")]
#[tokio::test]
async fn inventory_requires_a_token(#[case] uri: &str) {
    let app = TestApp::new().await;

    let response = app.request(Method::GET, uri, None, None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .request(Method::GET, uri, None, Some("not-a-jwt"))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logistic_reads_and_records_stock_but_cannot_manage_inventory() {
    let app = TestApp::new().await;
    let manager = app.token_for(UserRole::Manager).await;
    let logistic = app.token_for(UserRole::Logistic).await;
    let (item_id, shelf_id) = app.seed_location(&manager).await;

    app.expect_json(Method::GET, "/api/warehouses", None, &logistic, StatusCode::OK)
        .await;
    app.expect_json(Method::GET, "/api/items", None, &logistic, StatusCode::OK)
        .await;

    let stock = app
        .expect_json(
            Method::POST,
            "/api/stocks",
            Some(json!({ "itemId": item_id, "shelfId": shelf_id, "quantity": 6 })),
            &logistic,
            StatusCode::CREATED,
        )
        .await;
    let stock_id = stock["id"].as_i64().unwrap_or_default();

    app.expect_json(
        Method::PUT,
        &format!("/api/stocks/{}/quantity", stock_id),
        Some(json!({ "quantity": 2 })),
        &logistic,
        StatusCode::NO_CONTENT,
    )
    .await;

    let denied = app
        .request(
            Method::POST,
            "/api/warehouses",
            Some(json!({ "name": "Overflow", "location": "Yard" })),
            Some(&logistic),
        )
        .await;
    assert_eq!(denied.status(), StatusCode::FORBIDDEN);

    let denied = app
        .request(
            Method::DELETE,
            &format!("/api/stocks/{}", stock_id),
            None,
            Some(&logistic),
        )
        .await;
    assert_eq!(denied.status(), StatusCode::FORBIDDEN);

    let denied = app
        .request(
            Method::DELETE,
            &format!("/api/items/{}", item_id),
            None,
            Some(&logistic),
        )
        .await;
    assert_eq!(denied.status(), StatusCode::FORBIDDEN);
}

#[rstest]
#[case::logistic(UserRole::Logistic)]
#[case::manager(UserRole::Manager)]
#[tokio::test]
async fn only_super_admin_reaches_user_routes(#[case] role: UserRole) {
    let app = TestApp::new().await;
    let token = app.token_for(role).await;

    let response = app.request(Method::GET, "/api/user", None, Some(&token)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = response_json(response).await;
    assert_eq!(body["error"]["code"], "AUTH_INSUFFICIENT_PERMISSIONS");
}

#[tokio::test]
async fn super_admin_manages_inventory_too() {
    let app = TestApp::new().await;
    let admin = app.token_for(UserRole::SuperAdmin).await;

    let (item_id, shelf_id) = app.seed_location(&admin).await;
    app.expect_json(
        Method::POST,
        "/api/stocks",
        Some(json!({ "itemId": item_id, "shelfId": shelf_id, "quantity": 1 })),
        &admin,
        StatusCode::CREATED,
    )
    .await;
}

#[tokio::test]
async fn health_and_docs_are_public() {
    let app = TestApp::new().await;

    let response = app.request(Method::GET, "/health", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["status"], "up");
    assert_eq!(body["database"]["status"], "up");

    let response = app
        .request(Method::GET, "/api-docs/openapi.json", None, None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
}
