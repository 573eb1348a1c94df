//! Warehouses and shelves: uniqueness of shelf codes and delete guards.

mod common;

use axum::http::{Method, StatusCode};
use common::TestApp;
use serde_json::json;
use warehouse_api::auth::UserRole;

#[tokio::test]
async fn warehouse_lists_its_shelves() {
    let app = TestApp::new().await;
    let token = app.token_for(UserRole::Manager).await;

    let warehouse_id = app.create_warehouse(&token, "North DC").await;
    app.create_shelf(&token, "A-01", warehouse_id).await;
    app.create_shelf(&token, "A-02", warehouse_id).await;

    let warehouse = app
        .expect_json(
            Method::GET,
            &format!("/api/warehouses/{}", warehouse_id),
            None,
            &token,
            StatusCode::OK,
        )
        .await;
    assert_eq!(warehouse["name"], "North DC");
    assert_eq!(warehouse["shelves"].as_array().map(Vec::len), Some(2));

    let filtered = app
        .expect_json(
            Method::GET,
            &format!("/api/shelves?warehouseId={}", warehouse_id),
            None,
            &token,
            StatusCode::OK,
        )
        .await;
    assert_eq!(filtered.as_array().map(Vec::len), Some(2));
    assert_eq!(filtered[0]["warehouse"]["name"], "North DC");
}

#[tokio::test]
async fn warehouse_with_shelves_cannot_be_deleted() {
    let app = TestApp::new().await;
    let token = app.token_for(UserRole::Manager).await;

    let warehouse_id = app.create_warehouse(&token, "North DC").await;
    let shelf_id = app.create_shelf(&token, "B-07", warehouse_id).await;
    let warehouse_uri = format!("/api/warehouses/{}", warehouse_id);

    app.expect_json(Method::DELETE, &warehouse_uri, None, &token, StatusCode::CONFLICT)
        .await;

    app.expect_json(
        Method::DELETE,
        &format!("/api/shelves/{}", shelf_id),
        None,
        &token,
        StatusCode::NO_CONTENT,
    )
    .await;
    app.expect_json(Method::DELETE, &warehouse_uri, None, &token, StatusCode::NO_CONTENT)
        .await;
    app.expect_json(Method::GET, &warehouse_uri, None, &token, StatusCode::NOT_FOUND)
        .await;
}

#[tokio::test]
async fn shelf_holding_stock_cannot_be_deleted() {
    let app = TestApp::new().await;
    let token = app.token_for(UserRole::Manager).await;
    let (item_id, shelf_id) = app.seed_location(&token).await;

    app.expect_json(
        Method::POST,
        "/api/stocks",
        Some(json!({ "itemId": item_id, "shelfId": shelf_id, "quantity": 2 })),
        &token,
        StatusCode::CREATED,
    )
    .await;

    let error = app
        .expect_json(
            Method::DELETE,
            &format!("/api/shelves/{}", shelf_id),
            None,
            &token,
            StatusCode::CONFLICT,
        )
        .await;
    assert_eq!(error["error"], "Conflict");

    let shelf = app
        .expect_json(
            Method::GET,
            &format!("/api/shelves/{}", shelf_id),
            None,
            &token,
            StatusCode::OK,
        )
        .await;
    assert_eq!(shelf["stocks"][0]["itemName"], "Pallet Box");
    assert_eq!(shelf["stocks"][0]["quantity"], 2);
}

#[tokio::test]
async fn shelf_codes_are_unique_per_warehouse_only() {
    let app = TestApp::new().await;
    let token = app.token_for(UserRole::Manager).await;

    let north = app.create_warehouse(&token, "North DC").await;
    let south = app.create_warehouse(&token, "South DC").await;
    app.create_shelf(&token, "C-03", north).await;

    app.expect_json(
        Method::POST,
        "/api/shelves",
        Some(json!({ "code": "C-03", "warehouseId": north })),
        &token,
        StatusCode::CONFLICT,
    )
    .await;

    app.create_shelf(&token, "C-03", south).await;
}

#[tokio::test]
async fn renaming_a_shelf_onto_a_sibling_code_conflicts() {
    let app = TestApp::new().await;
    let token = app.token_for(UserRole::Manager).await;

    let warehouse_id = app.create_warehouse(&token, "North DC").await;
    app.create_shelf(&token, "D-01", warehouse_id).await;
    let second = app.create_shelf(&token, "D-02", warehouse_id).await;
    let uri = format!("/api/shelves/{}", second);

    app.expect_json(
        Method::PUT,
        &uri,
        Some(json!({ "code": "D-01" })),
        &token,
        StatusCode::CONFLICT,
    )
    .await;

    // Keeping its own code is not a clash
    app.expect_json(
        Method::PUT,
        &uri,
        Some(json!({ "code": "D-02" })),
        &token,
        StatusCode::NO_CONTENT,
    )
    .await;
}

#[tokio::test]
async fn shelf_in_unknown_warehouse_is_a_validation_error() {
    let app = TestApp::new().await;
    let token = app.token_for(UserRole::Manager).await;

    app.expect_json(
        Method::POST,
        "/api/shelves",
        Some(json!({ "code": "Z-99", "warehouseId": 404 })),
        &token,
        StatusCode::BAD_REQUEST,
    )
    .await;
    app.expect_json(
        Method::POST,
        "/api/shelves",
        Some(json!({ "code": "Z-99" })),
        &token,
        StatusCode::BAD_REQUEST,
    )
    .await;
}
