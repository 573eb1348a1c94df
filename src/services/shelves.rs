use sea_orm::{DbErr, Set, SqlErr};
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::{
    db::DbPool,
    dto::{CreateShelfRequest, ShelfDto, UpdateShelfRequest},
    entities::shelf,
    errors::ServiceError,
    repositories::{ShelfRepository, WarehouseRepository},
};

/// Service for managing shelves and their per-warehouse codes
#[derive(Clone)]
pub struct ShelfService {
    shelves: ShelfRepository,
    warehouses: WarehouseRepository,
}

impl ShelfService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self {
            shelves: ShelfRepository::new(db_pool.clone()),
            warehouses: WarehouseRepository::new(db_pool),
        }
    }

    #[instrument(skip(self))]
    pub async fn list_shelves(&self) -> Result<Vec<ShelfDto>, ServiceError> {
        let shelves = self.shelves.find_all_details().await?;
        Ok(shelves.into_iter().map(ShelfDto::from).collect())
    }

    /// Shelves of one warehouse; an unknown warehouse simply has none
    #[instrument(skip(self))]
    pub async fn list_shelves_by_warehouse(
        &self,
        warehouse_id: i32,
    ) -> Result<Vec<ShelfDto>, ServiceError> {
        let shelves = self.shelves.find_details_by_warehouse(warehouse_id).await?;
        Ok(shelves.into_iter().map(ShelfDto::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn get_shelf(&self, id: i32) -> Result<ShelfDto, ServiceError> {
        self.shelves
            .find_details(id)
            .await?
            .map(ShelfDto::from)
            .ok_or_else(|| not_found(id))
    }

    #[instrument(skip(self, request), fields(code = %request.code))]
    pub async fn create_shelf(&self, request: CreateShelfRequest) -> Result<ShelfDto, ServiceError> {
        let warehouse_id = request
            .warehouse_id
            .ok_or_else(|| ServiceError::ValidationError("warehouseId is required".to_string()))?;

        if !self.warehouses.exists(warehouse_id).await? {
            return Err(ServiceError::ValidationError(format!(
                "Warehouse with ID {} does not exist.",
                warehouse_id
            )));
        }

        self.ensure_code_free(warehouse_id, &request.code, None)
            .await?;

        let created = self
            .shelves
            .insert(shelf::ActiveModel {
                code: Set(request.code.clone()),
                warehouse_id: Set(warehouse_id),
                ..Default::default()
            })
            .await
            .map_err(|e| duplicate_code_or(e, warehouse_id, &request.code))?;

        info!(shelf_id = created.id, warehouse_id, "Shelf created");
        self.get_shelf(created.id).await
    }

    /// Renames a shelf within its warehouse
    #[instrument(skip(self, request), fields(code = %request.code))]
    pub async fn update_shelf(
        &self,
        id: i32,
        request: UpdateShelfRequest,
    ) -> Result<(), ServiceError> {
        let existing = self
            .shelves
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))?;
        let warehouse_id = existing.warehouse_id;

        self.ensure_code_free(warehouse_id, &request.code, Some(id))
            .await?;

        let mut active: shelf::ActiveModel = existing.into();
        active.code = Set(request.code.clone());
        self.shelves
            .update(active)
            .await
            .map_err(|e| duplicate_code_or(e, warehouse_id, &request.code))?;

        info!(shelf_id = id, "Shelf updated");
        Ok(())
    }

    /// Deletes a shelf that holds no stock
    #[instrument(skip(self))]
    pub async fn delete_shelf(&self, id: i32) -> Result<(), ServiceError> {
        if !self.shelves.exists(id).await? {
            return Err(not_found(id));
        }

        if self.shelves.has_stock(id).await? {
            warn!(shelf_id = id, "Refusing to delete shelf holding stock");
            return Err(ServiceError::Conflict(format!(
                "Cannot delete shelf {} because it still holds stock.",
                id
            )));
        }

        self.shelves.delete_by_id(id).await?;
        info!(shelf_id = id, "Shelf deleted");
        Ok(())
    }

    async fn ensure_code_free(
        &self,
        warehouse_id: i32,
        code: &str,
        exclude_id: Option<i32>,
    ) -> Result<(), ServiceError> {
        if self
            .shelves
            .find_by_warehouse_and_code(warehouse_id, code, exclude_id)
            .await?
            .is_some()
        {
            return Err(duplicate_code(warehouse_id, code));
        }
        Ok(())
    }
}

fn not_found(id: i32) -> ServiceError {
    ServiceError::NotFound(format!("Shelf with ID {} not found.", id))
}

fn duplicate_code(warehouse_id: i32, code: &str) -> ServiceError {
    ServiceError::Conflict(format!(
        "A shelf with code '{}' already exists in warehouse {}.",
        code, warehouse_id
    ))
}

/// A concurrent insert can still trip the (warehouse_id, code) index
fn duplicate_code_or(err: DbErr, warehouse_id: i32, code: &str) -> ServiceError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => duplicate_code(warehouse_id, code),
        _ => ServiceError::DatabaseError(err),
    }
}
