//! Suppliers and items.

mod common;

use axum::http::{Method, StatusCode};
use common::{id_of, TestApp};
use rstest::rstest;
use serde_json::{json, Value};
use warehouse_api::auth::UserRole;

#[tokio::test]
async fn supplier_crud_round() {
    let app = TestApp::new().await;
    let token = app.token_for(UserRole::Manager).await;

    let supplier_id = app.create_supplier(&token, "Nordic Parts").await;
    let uri = format!("/api/suppliers/{}", supplier_id);

    app.expect_json(
        Method::PUT,
        &uri,
        Some(json!({
            "name": "Nordic Parts AB",
            "email": "orders@nordicparts.example.com"
        })),
        &token,
        StatusCode::NO_CONTENT,
    )
    .await;

    let supplier = app
        .expect_json(Method::GET, &uri, None, &token, StatusCode::OK)
        .await;
    assert_eq!(supplier["name"], "Nordic Parts AB");
    assert_eq!(supplier["contactName"], Value::Null);
    assert_eq!(supplier["items"], json!([]));

    app.expect_json(Method::DELETE, &uri, None, &token, StatusCode::NO_CONTENT)
        .await;
    app.expect_json(Method::GET, &uri, None, &token, StatusCode::NOT_FOUND)
        .await;
}

#[tokio::test]
async fn supplier_with_items_cannot_be_deleted() {
    let app = TestApp::new().await;
    let token = app.token_for(UserRole::Manager).await;

    let supplier_id = app.create_supplier(&token, "Acme Supply").await;
    let item_id = app.create_item(&token, "Shrink Wrap", supplier_id).await;

    let supplier = app
        .expect_json(
            Method::GET,
            &format!("/api/suppliers/{}", supplier_id),
            None,
            &token,
            StatusCode::OK,
        )
        .await;
    assert_eq!(supplier["items"][0]["id"].as_i64(), Some(item_id));
    assert_eq!(supplier["items"][0]["price"], 12.5);

    app.expect_json(
        Method::DELETE,
        &format!("/api/suppliers/{}", supplier_id),
        None,
        &token,
        StatusCode::CONFLICT,
    )
    .await;
}

#[tokio::test]
async fn item_embeds_its_supplier() {
    let app = TestApp::new().await;
    let token = app.token_for(UserRole::Manager).await;

    let supplier_id = app.create_supplier(&token, "Acme Supply").await;
    let item_id = app.create_item(&token, "Pallet Box", supplier_id).await;

    let item = app
        .expect_json(
            Method::GET,
            &format!("/api/items/{}", item_id),
            None,
            &token,
            StatusCode::OK,
        )
        .await;
    assert_eq!(item["supplierId"].as_i64(), Some(supplier_id));
    assert_eq!(item["supplier"]["name"], "Acme Supply");
    assert_eq!(item["price"], 12.5);
}

#[tokio::test]
async fn item_cannot_move_to_an_unknown_supplier() {
    let app = TestApp::new().await;
    let token = app.token_for(UserRole::Manager).await;

    let supplier_id = app.create_supplier(&token, "Acme Supply").await;
    let item_id = app.create_item(&token, "Pallet Box", supplier_id).await;

    let error = app
        .expect_json(
            Method::PUT,
            &format!("/api/items/{}", item_id),
            Some(json!({ "name": "Pallet Box", "price": 10.0, "supplierId": 5150 })),
            &token,
            StatusCode::BAD_REQUEST,
        )
        .await;
    assert!(error["message"]
        .as_str()
        .unwrap_or_default()
        .contains("Supplier with ID 5150 does not exist."));
}

#[rstest]
#[case::missing_supplier(json!({ "name": "Crate", "price": 3.0 }))]
#[case::missing_price(json!({ "name": "Crate", "supplierId": 1 }))]
#[case::negative_price(json!({ "name": "Crate", "price": -1.0, "supplierId": 1 }))]
#[case::unknown_supplier(json!({ "name": "Crate", "price": 3.0, "supplierId": 999 }))]
#[tokio::test]
async fn invalid_items_are_rejected(#[case] body: Value) {
    let app = TestApp::new().await;
    let token = app.token_for(UserRole::Manager).await;
    app.create_supplier(&token, "Acme Supply").await;

    app.expect_json(
        Method::POST,
        "/api/items",
        Some(body),
        &token,
        StatusCode::BAD_REQUEST,
    )
    .await;
}

#[tokio::test]
async fn item_with_stock_cannot_be_deleted() {
    let app = TestApp::new().await;
    let token = app.token_for(UserRole::Manager).await;
    let (item_id, shelf_id) = app.seed_location(&token).await;

    let stock = app
        .expect_json(
            Method::POST,
            "/api/stocks",
            Some(json!({ "itemId": item_id, "shelfId": shelf_id, "quantity": 1 })),
            &token,
            StatusCode::CREATED,
        )
        .await;

    let item_uri = format!("/api/items/{}", item_id);
    app.expect_json(Method::DELETE, &item_uri, None, &token, StatusCode::CONFLICT)
        .await;

    app.expect_json(
        Method::DELETE,
        &format!("/api/stocks/{}", id_of(&stock)),
        None,
        &token,
        StatusCode::NO_CONTENT,
    )
    .await;
    app.expect_json(Method::DELETE, &item_uri, None, &token, StatusCode::NO_CONTENT)
        .await;
}
