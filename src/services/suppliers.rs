use sea_orm::Set;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::{
    db::DbPool,
    dto::{SupplierDto, SupplierRequest},
    entities::supplier,
    errors::ServiceError,
    repositories::SupplierRepository,
};

/// Service for managing suppliers
#[derive(Clone)]
pub struct SupplierService {
    repository: SupplierRepository,
}

impl SupplierService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self {
            repository: SupplierRepository::new(db_pool),
        }
    }

    /// Every supplier with the items it supplies
    #[instrument(skip(self))]
    pub async fn list_suppliers(&self) -> Result<Vec<SupplierDto>, ServiceError> {
        let suppliers = self.repository.find_all_with_items().await?;
        Ok(suppliers
            .into_iter()
            .map(|(supplier, items)| SupplierDto::from_model(supplier, items))
            .collect())
    }

    #[instrument(skip(self))]
    pub async fn get_supplier(&self, id: i32) -> Result<SupplierDto, ServiceError> {
        self.repository
            .find_with_items(id)
            .await?
            .map(|(supplier, items)| SupplierDto::from_model(supplier, items))
            .ok_or_else(|| not_found(id))
    }

    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create_supplier(
        &self,
        request: SupplierRequest,
    ) -> Result<SupplierDto, ServiceError> {
        let created = self
            .repository
            .insert(supplier::ActiveModel {
                name: Set(request.name),
                contact_name: Set(request.contact_name),
                email: Set(request.email),
                phone_number: Set(request.phone_number),
                ..Default::default()
            })
            .await?;

        info!(supplier_id = created.id, "Supplier created");
        Ok(SupplierDto::from_model(created, Vec::new()))
    }

    /// Replaces every field of the supplier
    #[instrument(skip(self, request))]
    pub async fn update_supplier(
        &self,
        id: i32,
        request: SupplierRequest,
    ) -> Result<(), ServiceError> {
        let existing = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))?;

        let mut active: supplier::ActiveModel = existing.into();
        active.name = Set(request.name);
        active.contact_name = Set(request.contact_name);
        active.email = Set(request.email);
        active.phone_number = Set(request.phone_number);

        self.repository.update(active).await?;
        info!(supplier_id = id, "Supplier updated");
        Ok(())
    }

    /// Deletes a supplier that no item references any more
    #[instrument(skip(self))]
    pub async fn delete_supplier(&self, id: i32) -> Result<(), ServiceError> {
        if !self.repository.exists(id).await? {
            return Err(not_found(id));
        }

        if self.repository.has_items(id).await? {
            warn!(supplier_id = id, "Refusing to delete supplier with items");
            return Err(ServiceError::Conflict(format!(
                "Cannot delete supplier {} because items still reference it.",
                id
            )));
        }

        self.repository.delete_by_id(id).await?;
        info!(supplier_id = id, "Supplier deleted");
        Ok(())
    }
}

fn not_found(id: i32) -> ServiceError {
    ServiceError::NotFound(format!("Supplier with ID {} not found.", id))
}
