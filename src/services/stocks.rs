use sea_orm::{EntityTrait, SqlErr, TransactionTrait};
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::{
    db::DbPool,
    dto::{CreateStockRequest, StockDto},
    entities::{item, shelf, stock},
    errors::ServiceError,
    repositories::StockRepository,
};

/// Service for stock rows: one row per (item, shelf) pair
#[derive(Clone)]
pub struct StockService {
    db_pool: Arc<DbPool>,
    repository: StockRepository,
}

impl StockService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self {
            repository: StockRepository::new(db_pool.clone()),
            db_pool,
        }
    }

    #[instrument(skip(self))]
    pub async fn list_stocks(&self) -> Result<Vec<StockDto>, ServiceError> {
        let stocks = self.repository.find_all_details().await?;
        Ok(stocks.into_iter().map(StockDto::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn list_stocks_by_shelf(&self, shelf_id: i32) -> Result<Vec<StockDto>, ServiceError> {
        let stocks = self.repository.find_details_by_shelf(shelf_id).await?;
        Ok(stocks.into_iter().map(StockDto::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn list_stocks_by_item(&self, item_id: i32) -> Result<Vec<StockDto>, ServiceError> {
        let stocks = self.repository.find_details_by_item(item_id).await?;
        Ok(stocks.into_iter().map(StockDto::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn get_stock(&self, id: i32) -> Result<StockDto, ServiceError> {
        self.repository
            .find_details(id)
            .await?
            .map(StockDto::from)
            .ok_or_else(|| not_found(id))
    }

    /// The single row held for an item on a shelf
    #[instrument(skip(self))]
    pub async fn get_stock_by_item_and_shelf(
        &self,
        item_id: i32,
        shelf_id: i32,
    ) -> Result<StockDto, ServiceError> {
        self.repository
            .find_details_by_pair(item_id, shelf_id)
            .await?
            .map(StockDto::from)
            .ok_or_else(|| {
                ServiceError::NotFound(format!(
                    "Stock not found for Item ID: {} on Shelf ID: {}.",
                    item_id, shelf_id
                ))
            })
    }

    /// Records `quantity` units of an item on a shelf.
    ///
    /// When the pair already has a row its quantity is increased instead of
    /// a second row being created. An insert that loses a race against a
    /// concurrent one for the same pair is retried once, which then merges.
    #[instrument(skip(self, request))]
    pub async fn create_stock(&self, request: CreateStockRequest) -> Result<StockDto, ServiceError> {
        let (item_id, shelf_id, quantity) = match (request.item_id, request.shelf_id, request.quantity) {
            (Some(item_id), Some(shelf_id), Some(quantity)) => (item_id, shelf_id, quantity),
            _ => {
                return Err(ServiceError::ValidationError(
                    "itemId, shelfId and quantity are required".to_string(),
                ))
            }
        };
        if quantity < 1 {
            return Err(ServiceError::ValidationError(
                "Quantity must be at least 1".to_string(),
            ));
        }

        match self.add_stock(item_id, shelf_id, quantity).await {
            Err(ServiceError::DatabaseError(ref e))
                if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) =>
            {
                warn!(item_id, shelf_id, "Concurrent stock insert detected, merging");
                self.add_stock(item_id, shelf_id, quantity).await
            }
            result => result,
        }
    }

    /// One transaction: check references, then increment or insert
    async fn add_stock(
        &self,
        item_id: i32,
        shelf_id: i32,
        quantity: i32,
    ) -> Result<StockDto, ServiceError> {
        let txn = self.db_pool.begin().await?;

        if item::Entity::find_by_id(item_id).one(&txn).await?.is_none() {
            return Err(ServiceError::NotFound(format!(
                "Item with ID {} not found.",
                item_id
            )));
        }
        if shelf::Entity::find_by_id(shelf_id).one(&txn).await?.is_none() {
            return Err(ServiceError::NotFound(format!(
                "Shelf with ID {} not found.",
                shelf_id
            )));
        }

        let stock_id = match StockRepository::find_pair_with(&txn, item_id, shelf_id).await? {
            Some(existing) => {
                if existing.quantity.checked_add(quantity).is_none() {
                    return Err(ServiceError::ValidationError(format!(
                        "Adding {} units to stock {} would exceed the maximum quantity of {}.",
                        quantity,
                        existing.id,
                        i32::MAX
                    )));
                }
                StockRepository::increment_with(&txn, existing.id, quantity).await?;
                info!(stock_id = existing.id, added = quantity, "Merged into existing stock");
                existing.id
            }
            None => {
                let created = StockRepository::insert_with(&txn, item_id, shelf_id, quantity).await?;
                info!(stock_id = created.id, item_id, shelf_id, "Stock created");
                created.id
            }
        };

        let stored = stock::Entity::find_by_id(stock_id)
            .one(&txn)
            .await?
            .ok_or_else(|| not_found(stock_id))?;
        let details = StockRepository::attach_relations(&txn, vec![stored])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| not_found(stock_id))?;

        txn.commit().await?;
        Ok(StockDto::from(details))
    }

    /// Replaces the quantity of a row
    #[instrument(skip(self))]
    pub async fn update_quantity(&self, id: i32, quantity: i32) -> Result<(), ServiceError> {
        if quantity < 0 {
            return Err(ServiceError::ValidationError(
                "Quantity cannot be negative".to_string(),
            ));
        }

        if self.repository.set_quantity(id, quantity).await? == 0 {
            return Err(not_found(id));
        }
        info!(stock_id = id, quantity, "Stock quantity set");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn delete_stock(&self, id: i32) -> Result<(), ServiceError> {
        if self.repository.delete_by_id(id).await? == 0 {
            return Err(not_found(id));
        }
        info!(stock_id = id, "Stock deleted");
        Ok(())
    }
}

fn not_found(id: i32) -> ServiceError {
    ServiceError::NotFound(format!("Stock with ID {} not found.", id))
}
