use sea_orm::Set;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::{
    db::DbPool,
    dto::{WarehouseDto, WarehouseRequest},
    entities::warehouse,
    errors::ServiceError,
    repositories::WarehouseRepository,
};

/// Service for managing warehouses
#[derive(Clone)]
pub struct WarehouseService {
    repository: WarehouseRepository,
}

impl WarehouseService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self {
            repository: WarehouseRepository::new(db_pool),
        }
    }

    #[instrument(skip(self))]
    pub async fn list_warehouses(&self) -> Result<Vec<WarehouseDto>, ServiceError> {
        let warehouses = self.repository.find_all_with_shelves().await?;
        Ok(warehouses
            .into_iter()
            .map(|(warehouse, shelves)| WarehouseDto::from_model(warehouse, shelves))
            .collect())
    }

    #[instrument(skip(self))]
    pub async fn get_warehouse(&self, id: i32) -> Result<WarehouseDto, ServiceError> {
        self.repository
            .find_with_shelves(id)
            .await?
            .map(|(warehouse, shelves)| WarehouseDto::from_model(warehouse, shelves))
            .ok_or_else(|| not_found(id))
    }

    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create_warehouse(
        &self,
        request: WarehouseRequest,
    ) -> Result<WarehouseDto, ServiceError> {
        let created = self
            .repository
            .insert(warehouse::ActiveModel {
                name: Set(request.name),
                location: Set(request.location),
                ..Default::default()
            })
            .await?;

        info!(warehouse_id = created.id, "Warehouse created");
        Ok(WarehouseDto::from_model(created, Vec::new()))
    }

    #[instrument(skip(self, request))]
    pub async fn update_warehouse(
        &self,
        id: i32,
        request: WarehouseRequest,
    ) -> Result<(), ServiceError> {
        let existing = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))?;

        let mut active: warehouse::ActiveModel = existing.into();
        active.name = Set(request.name);
        active.location = Set(request.location);
        self.repository.update(active).await?;

        info!(warehouse_id = id, "Warehouse updated");
        Ok(())
    }

    /// Deletes an empty warehouse. A warehouse that still has shelves is
    /// left untouched.
    #[instrument(skip(self))]
    pub async fn delete_warehouse(&self, id: i32) -> Result<(), ServiceError> {
        if !self.repository.exists(id).await? {
            return Err(not_found(id));
        }

        if self.repository.has_shelves(id).await? {
            warn!(warehouse_id = id, "Refusing to delete warehouse with shelves");
            return Err(ServiceError::Conflict(format!(
                "Cannot delete warehouse {} because it still has shelves.",
                id
            )));
        }

        self.repository.delete_by_id(id).await?;
        info!(warehouse_id = id, "Warehouse deleted");
        Ok(())
    }
}

fn not_found(id: i32) -> ServiceError {
    ServiceError::NotFound(format!("Warehouse with ID {} not found.", id))
}
