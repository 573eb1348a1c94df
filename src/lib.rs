//! Warehouse API Library
//!
//! Inventory backend for suppliers, items, warehouses, shelves and stock,
//! guarded by JWT bearer authentication and role based permissions.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

// Core modules
pub mod auth;
pub mod config;
pub mod db;
pub mod dto;
pub mod entities;
pub mod errors;
pub mod handlers;
pub mod middleware_helpers;
pub mod migrator;
pub mod openapi;
pub mod repositories;
pub mod services;
pub mod tracing;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use http::HeaderValue;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
};

use crate::auth::consts as perm;
use crate::auth::{AuthRouterExt, AuthService, UserRole};

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub services: handlers::AppServices,
}

impl AppState {
    /// Wires every service onto one shared connection pool
    pub fn new(db: Arc<DatabaseConnection>, config: config::AppConfig) -> Self {
        let auth_service = Arc::new(AuthService::new(auth::AuthConfig::from(&config)));
        let services = handlers::AppServices::new(db.clone(), auth_service);
        Self {
            db,
            config,
            services,
        }
    }

    pub fn auth_service(&self) -> Arc<AuthService> {
        self.services.auth.clone()
    }
}

/// Routes mounted under `/api`
pub fn api_routes() -> Router<AppState> {
    // Warehouses
    let warehouses_read = Router::new()
        .route("/warehouses", get(handlers::warehouses::list_warehouses))
        .route("/warehouses/:id", get(handlers::warehouses::get_warehouse))
        .with_permission(perm::WAREHOUSES_READ);

    let warehouses_create = Router::new()
        .route("/warehouses", post(handlers::warehouses::create_warehouse))
        .with_permission(perm::WAREHOUSES_CREATE);

    let warehouses_update = Router::new()
        .route("/warehouses/:id", put(handlers::warehouses::update_warehouse))
        .with_permission(perm::WAREHOUSES_UPDATE);

    let warehouses_delete = Router::new()
        .route(
            "/warehouses/:id",
            delete(handlers::warehouses::delete_warehouse),
        )
        .with_permission(perm::WAREHOUSES_DELETE);

    // Shelves
    let shelves_read = Router::new()
        .route("/shelves", get(handlers::shelves::list_shelves))
        .route("/shelves/:id", get(handlers::shelves::get_shelf))
        .with_permission(perm::SHELVES_READ);

    let shelves_create = Router::new()
        .route("/shelves", post(handlers::shelves::create_shelf))
        .with_permission(perm::SHELVES_CREATE);

    let shelves_update = Router::new()
        .route("/shelves/:id", put(handlers::shelves::update_shelf))
        .with_permission(perm::SHELVES_UPDATE);

    let shelves_delete = Router::new()
        .route("/shelves/:id", delete(handlers::shelves::delete_shelf))
        .with_permission(perm::SHELVES_DELETE);

    // Items
    let items_read = Router::new()
        .route("/items", get(handlers::items::list_items))
        .route("/items/:id", get(handlers::items::get_item))
        .with_permission(perm::ITEMS_READ);

    let items_create = Router::new()
        .route("/items", post(handlers::items::create_item))
        .with_permission(perm::ITEMS_CREATE);

    let items_update = Router::new()
        .route("/items/:id", put(handlers::items::update_item))
        .with_permission(perm::ITEMS_UPDATE);

    let items_delete = Router::new()
        .route("/items/:id", delete(handlers::items::delete_item))
        .with_permission(perm::ITEMS_DELETE);

    // Suppliers
    let suppliers_read = Router::new()
        .route("/suppliers", get(handlers::suppliers::list_suppliers))
        .route("/suppliers/:id", get(handlers::suppliers::get_supplier))
        .with_permission(perm::SUPPLIERS_READ);

    let suppliers_create = Router::new()
        .route("/suppliers", post(handlers::suppliers::create_supplier))
        .with_permission(perm::SUPPLIERS_CREATE);

    let suppliers_update = Router::new()
        .route("/suppliers/:id", put(handlers::suppliers::update_supplier))
        .with_permission(perm::SUPPLIERS_UPDATE);

    let suppliers_delete = Router::new()
        .route(
            "/suppliers/:id",
            delete(handlers::suppliers::delete_supplier),
        )
        .with_permission(perm::SUPPLIERS_DELETE);

    // Stocks
    let stocks_read = Router::new()
        .route("/stocks", get(handlers::stocks::list_stocks))
        .route("/stocks/:id", get(handlers::stocks::get_stock))
        .with_permission(perm::STOCKS_READ);

    let stocks_create = Router::new()
        .route("/stocks", post(handlers::stocks::create_stock))
        .with_permission(perm::STOCKS_CREATE);

    let stocks_update = Router::new()
        .route(
            "/stocks/:id/quantity",
            put(handlers::stocks::update_stock_quantity),
        )
        .with_permission(perm::STOCKS_UPDATE);

    let stocks_delete = Router::new()
        .route("/stocks/:id", delete(handlers::stocks::delete_stock))
        .with_permission(perm::STOCKS_DELETE);

    // Account administration
    let users = Router::new()
        .route(
            "/user",
            get(handlers::users::list_users).post(handlers::users::create_user),
        )
        .route(
            "/user/:id",
            get(handlers::users::get_user)
                .put(handlers::users::update_user)
                .delete(handlers::users::delete_user),
        )
        .with_role(UserRole::SuperAdmin.as_ref());

    // Public
    let auth_routes = Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login));

    Router::new()
        .merge(auth_routes)
        .merge(warehouses_read)
        .merge(warehouses_create)
        .merge(warehouses_update)
        .merge(warehouses_delete)
        .merge(shelves_read)
        .merge(shelves_create)
        .merge(shelves_update)
        .merge(shelves_delete)
        .merge(items_read)
        .merge(items_create)
        .merge(items_update)
        .merge(items_delete)
        .merge(suppliers_read)
        .merge(suppliers_create)
        .merge(suppliers_update)
        .merge(suppliers_delete)
        .merge(stocks_read)
        .merge(stocks_create)
        .merge(stocks_update)
        .merge(stocks_delete)
        .merge(users)
}

/// CORS policy derived from configuration
pub fn cors_layer(cfg: &config::AppConfig) -> CorsLayer {
    let configured_origins = cfg
        .cors_allowed_origins
        .as_deref()
        .map(|raw| {
            raw.split(',')
                .filter_map(|origin| {
                    let trimmed = origin.trim();
                    if trimmed.is_empty() {
                        None
                    } else {
                        HeaderValue::from_str(trimmed).ok()
                    }
                })
                .collect::<Vec<_>>()
        })
        .filter(|origins| !origins.is_empty());

    if let Some(origins) = configured_origins {
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    } else if cfg.should_allow_permissive_cors() {
        ::tracing::info!(
            "Using permissive CORS because explicit origins were not configured ({})",
            if cfg.is_development() {
                "development environment"
            } else {
                "explicit override enabled"
            }
        );
        CorsLayer::permissive()
    } else {
        ::tracing::warn!(
            "No CORS origins configured; cross-origin requests will be rejected. Set APP__CORS_ALLOWED_ORIGINS"
        );
        CorsLayer::new()
    }
}

/// The complete application: health, `/api`, Swagger UI and the shared
/// middleware stack
pub fn app(state: AppState) -> Router {
    let auth_service = state.auth_service();
    let cors = cors_layer(&state.config);

    Router::new()
        .route("/health", get(handlers::health::health_check))
        .nest("/api", api_routes())
        .merge(openapi::swagger_ui())
        // HTTP tracing layer for consistent request/response telemetry
        .layer(crate::tracing::configure_http_tracing())
        .layer(CompressionLayer::new())
        .layer(cors)
        // Inject AuthService into request extensions for auth middleware
        .layer(axum::middleware::from_fn_with_state(
            auth_service,
            auth::inject_auth_service,
        ))
        // Ensure every request carries a request id for traceability
        .layer(axum::middleware::from_fn(
            middleware_helpers::request_id_middleware,
        ))
        .with_state(state)
}
