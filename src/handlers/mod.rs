pub mod auth;
pub mod common;
pub mod health;
pub mod items;
pub mod shelves;
pub mod stocks;
pub mod suppliers;
pub mod users;
pub mod warehouses;

use crate::{auth::AuthService, db::DbPool, services};
use std::sync::Arc;

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;

/// Services layer that encapsulates business logic used by HTTP handlers
#[derive(Clone)]
pub struct AppServices {
    pub suppliers: Arc<services::SupplierService>,
    pub items: Arc<services::ItemService>,
    pub warehouses: Arc<services::WarehouseService>,
    pub shelves: Arc<services::ShelfService>,
    pub stocks: Arc<services::StockService>,
    pub users: Arc<services::UserService>,
    pub auth: Arc<AuthService>,
}

impl AppServices {
    pub fn new(db_pool: Arc<DbPool>, auth_service: Arc<AuthService>) -> Self {
        Self {
            suppliers: Arc::new(services::SupplierService::new(db_pool.clone())),
            items: Arc::new(services::ItemService::new(db_pool.clone())),
            warehouses: Arc::new(services::WarehouseService::new(db_pool.clone())),
            shelves: Arc::new(services::ShelfService::new(db_pool.clone())),
            stocks: Arc::new(services::StockService::new(db_pool.clone())),
            users: Arc::new(services::UserService::new(db_pool, auth_service.clone())),
            auth: auth_service,
        }
    }
}
