use sea_orm::Set;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::{
    db::DbPool,
    dto::{ItemDto, ItemRequest},
    entities::item,
    errors::ServiceError,
    repositories::{ItemRepository, SupplierRepository},
};

/// Service for managing catalogue items
#[derive(Clone)]
pub struct ItemService {
    items: ItemRepository,
    suppliers: SupplierRepository,
}

impl ItemService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self {
            items: ItemRepository::new(db_pool.clone()),
            suppliers: SupplierRepository::new(db_pool),
        }
    }

    #[instrument(skip(self))]
    pub async fn list_items(&self) -> Result<Vec<ItemDto>, ServiceError> {
        let items = self.items.find_all_with_supplier().await?;
        Ok(items
            .into_iter()
            .map(|(item, supplier)| ItemDto::from_model(item, supplier))
            .collect())
    }

    #[instrument(skip(self))]
    pub async fn get_item(&self, id: i32) -> Result<ItemDto, ServiceError> {
        self.items
            .find_with_supplier(id)
            .await?
            .map(|(item, supplier)| ItemDto::from_model(item, supplier))
            .ok_or_else(|| not_found(id))
    }

    /// Creates an item for an existing supplier
    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create_item(&self, request: ItemRequest) -> Result<ItemDto, ServiceError> {
        let (price, supplier_id) = required_fields(&request)?;

        let supplier = self
            .suppliers
            .find_by_id(supplier_id)
            .await?
            .ok_or_else(|| missing_supplier(supplier_id))?;

        let created = self
            .items
            .insert(item::ActiveModel {
                name: Set(request.name),
                description: Set(request.description),
                price: Set(price),
                supplier_id: Set(supplier_id),
                ..Default::default()
            })
            .await?;

        info!(item_id = created.id, supplier_id, "Item created");
        Ok(ItemDto::from_model(created, Some(supplier)))
    }

    /// Replaces every field; a new supplier id must resolve
    #[instrument(skip(self, request))]
    pub async fn update_item(&self, id: i32, request: ItemRequest) -> Result<(), ServiceError> {
        let (price, supplier_id) = required_fields(&request)?;

        let existing = self
            .items
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))?;

        if existing.supplier_id != supplier_id && !self.suppliers.exists(supplier_id).await? {
            return Err(missing_supplier(supplier_id));
        }

        let mut active: item::ActiveModel = existing.into();
        active.name = Set(request.name);
        active.description = Set(request.description);
        active.price = Set(price);
        active.supplier_id = Set(supplier_id);
        self.items.update(active).await?;

        info!(item_id = id, "Item updated");
        Ok(())
    }

    /// Deletes an item that is no longer stocked anywhere
    #[instrument(skip(self))]
    pub async fn delete_item(&self, id: i32) -> Result<(), ServiceError> {
        if !self.items.exists(id).await? {
            return Err(not_found(id));
        }

        if self.items.has_stock(id).await? {
            warn!(item_id = id, "Refusing to delete stocked item");
            return Err(ServiceError::Conflict(format!(
                "Cannot delete item {} because stock records still reference it.",
                id
            )));
        }

        self.items.delete_by_id(id).await?;
        info!(item_id = id, "Item deleted");
        Ok(())
    }
}

fn required_fields(request: &ItemRequest) -> Result<(rust_decimal::Decimal, i32), ServiceError> {
    let price = request
        .price
        .ok_or_else(|| ServiceError::ValidationError("price is required".to_string()))?;
    let supplier_id = request
        .supplier_id
        .ok_or_else(|| ServiceError::ValidationError("supplierId is required".to_string()))?;
    Ok((price, supplier_id))
}

fn not_found(id: i32) -> ServiceError {
    ServiceError::NotFound(format!("Item with ID {} not found.", id))
}

fn missing_supplier(id: i32) -> ServiceError {
    ServiceError::ValidationError(format!("Supplier with ID {} does not exist.", id))
}
