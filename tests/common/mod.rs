#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{self, Body},
    http::{Method, Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;
use warehouse_api::{
    auth::UserRole,
    config::AppConfig,
    db::{self, DbConfig},
    dto::{CreateUserRequest, LoginRequest},
    AppState,
};

pub const STRONG_SECRET: &str =
    "Kq8vN2xR7tLp4Wz9Yb3Hc6Jm1Fd5Gs0Ae8Ui2Oy7Tr4Ew9Qn3Xk6Vb1Zl5Pm8Hj2Rc";

pub const TEST_PASSWORD: &str = "Warehouse#2024";

/// Helper harness for spinning up the full router over an in-memory SQLite database.
pub struct TestApp {
    router: Router,
    pub state: AppState,
}

impl TestApp {
    /// Construct a new test application with fresh database state.
    pub async fn new() -> Self {
        let cfg = AppConfig::new(
            "sqlite::memory:".to_string(),
            STRONG_SECRET.to_string(),
            3600,
            "127.0.0.1".to_string(),
            18_080,
            "development".to_string(),
        );

        // One connection keeps every query on the same in-memory database.
        let pool = db::establish_connection_with_config(&DbConfig {
            url: cfg.database_url.clone(),
            max_connections: 1,
            min_connections: 1,
            ..Default::default()
        })
        .await
        .expect("failed to create test database");

        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations in tests");

        let state = AppState::new(Arc::new(pool), cfg);
        let router = warehouse_api::app(state.clone());

        Self { router, state }
    }

    /// Creates an account holding `role` and returns a bearer token for it.
    pub async fn token_for(&self, role: UserRole) -> String {
        let username = format!("{}-{}", role.as_ref().to_lowercase(), Uuid::new_v4().simple());
        self.state
            .services
            .users
            .create_user(CreateUserRequest {
                username: username.clone(),
                email: format!("{}@example.com", username),
                password: TEST_PASSWORD.to_string(),
                role: role.to_string(),
            })
            .await
            .expect("create test account");

        self.state
            .services
            .users
            .authenticate(LoginRequest {
                username,
                password: TEST_PASSWORD.to_string(),
            })
            .await
            .expect("log in test account")
            .token
    }

    /// Send a request against the router with an optional bearer token.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(tok) = token {
            builder = builder.header("authorization", format!("Bearer {}", tok));
        }

        let body = if let Some(json) = body {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&json).expect("failed to serialize json request body"))
        } else {
            Body::empty()
        };

        let request = builder.body(body).expect("failed to build request");
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router error during test request")
    }

    /// Sends the request and asserts the status, returning the JSON body (Null when empty).
    pub async fn expect_json(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        token: &str,
        status: StatusCode,
    ) -> Value {
        let response = self.request(method.clone(), uri, body, Some(token)).await;
        let actual = response.status();
        let json = response_json(response).await;
        assert_eq!(actual, status, "{} {} returned {}", method, uri, json);
        json
    }

    pub async fn create_supplier(&self, token: &str, name: &str) -> i64 {
        let body = self
            .expect_json(
                Method::POST,
                "/api/suppliers",
                Some(json!({
                    "name": name,
                    "contactName": "Dana Reyes",
                    "email": format!("{}@supplier.example.com", name.to_lowercase().replace(' ', "-")),
                    "phoneNumber": "+1 555 0100"
                })),
                token,
                StatusCode::CREATED,
            )
            .await;
        id_of(&body)
    }

    pub async fn create_item(&self, token: &str, name: &str, supplier_id: i64) -> i64 {
        let body = self
            .expect_json(
                Method::POST,
                "/api/items",
                Some(json!({
                    "name": name,
                    "description": "Stackable crate",
                    "price": 12.5,
                    "supplierId": supplier_id
                })),
                token,
                StatusCode::CREATED,
            )
            .await;
        id_of(&body)
    }

    pub async fn create_warehouse(&self, token: &str, name: &str) -> i64 {
        let body = self
            .expect_json(
                Method::POST,
                "/api/warehouses",
                Some(json!({ "name": name, "location": "Rotterdam" })),
                token,
                StatusCode::CREATED,
            )
            .await;
        id_of(&body)
    }

    pub async fn create_shelf(&self, token: &str, code: &str, warehouse_id: i64) -> i64 {
        let body = self
            .expect_json(
                Method::POST,
                "/api/shelves",
                Some(json!({ "code": code, "warehouseId": warehouse_id })),
                token,
                StatusCode::CREATED,
            )
            .await;
        id_of(&body)
    }

    /// Supplier, item, warehouse and shelf ready to take stock: `(item_id, shelf_id)`
    pub async fn seed_location(&self, token: &str) -> (i64, i64) {
        let supplier_id = self.create_supplier(token, "Acme Supply").await;
        let item_id = self.create_item(token, "Pallet Box", supplier_id).await;
        let warehouse_id = self.create_warehouse(token, "Main Depot").await;
        let shelf_id = self.create_shelf(token, "A-01", warehouse_id).await;
        (item_id, shelf_id)
    }
}

pub async fn response_json(response: Response) -> Value {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body bytes");
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(&bytes).expect("json response")
}

pub fn id_of(body: &Value) -> i64 {
    body["id"].as_i64().expect("response carries a numeric id")
}
