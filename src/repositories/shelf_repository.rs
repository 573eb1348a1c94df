use std::collections::HashMap;

use sea_orm::{
    ColumnTrait, DbErr, EntityTrait, LoaderTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

use super::{EntityRepository, Repository};
use crate::entities::{item, shelf, stock, warehouse};

/// Repository for shelf operations
pub type ShelfRepository = EntityRepository<shelf::Entity>;

/// A shelf with its warehouse and stock rows (each with its item, when still present)
#[derive(Debug, Clone)]
pub struct ShelfDetails {
    pub shelf: shelf::Model,
    pub warehouse: Option<warehouse::Model>,
    pub stocks: Vec<(stock::Model, Option<item::Model>)>,
}

impl EntityRepository<shelf::Entity> {
    /// All shelves ordered by id
    pub async fn find_all_details(&self) -> Result<Vec<ShelfDetails>, DbErr> {
        let shelves = shelf::Entity::find()
            .order_by_asc(shelf::Column::Id)
            .all(self.get_db())
            .await?;
        self.load_details(shelves).await
    }

    /// Shelves of one warehouse; empty when the warehouse does not exist
    pub async fn find_details_by_warehouse(
        &self,
        warehouse_id: i32,
    ) -> Result<Vec<ShelfDetails>, DbErr> {
        let shelves = shelf::Entity::find()
            .filter(shelf::Column::WarehouseId.eq(warehouse_id))
            .order_by_asc(shelf::Column::Id)
            .all(self.get_db())
            .await?;
        self.load_details(shelves).await
    }

    pub async fn find_details(&self, id: i32) -> Result<Option<ShelfDetails>, DbErr> {
        let Some(shelf) = self.find_by_id(id).await? else {
            return Ok(None);
        };
        Ok(self.load_details(vec![shelf]).await?.into_iter().next())
    }

    /// Shelf in `warehouse_id` carrying exactly `code`, ignoring `exclude_id`
    pub async fn find_by_warehouse_and_code(
        &self,
        warehouse_id: i32,
        code: &str,
        exclude_id: Option<i32>,
    ) -> Result<Option<shelf::Model>, DbErr> {
        let mut query = shelf::Entity::find()
            .filter(shelf::Column::WarehouseId.eq(warehouse_id))
            .filter(shelf::Column::Code.eq(code));
        if let Some(id) = exclude_id {
            query = query.filter(shelf::Column::Id.ne(id));
        }
        query.one(self.get_db()).await
    }

    /// Whether any stock row is still held on the shelf
    pub async fn has_stock(&self, id: i32) -> Result<bool, DbErr> {
        let count = stock::Entity::find()
            .filter(stock::Column::ShelfId.eq(id))
            .count(self.get_db())
            .await?;
        Ok(count > 0)
    }

    async fn load_details(&self, shelves: Vec<shelf::Model>) -> Result<Vec<ShelfDetails>, DbErr> {
        if shelves.is_empty() {
            return Ok(Vec::new());
        }

        let db = self.get_db();
        let warehouses = shelves.load_one(warehouse::Entity, db).await?;
        let stocks = shelves.load_many(stock::Entity, db).await?;

        let mut item_ids: Vec<i32> = stocks.iter().flatten().map(|s| s.item_id).collect();
        item_ids.sort_unstable();
        item_ids.dedup();

        let items: HashMap<i32, item::Model> = if item_ids.is_empty() {
            HashMap::new()
        } else {
            item::Entity::find()
                .filter(item::Column::Id.is_in(item_ids))
                .all(db)
                .await?
                .into_iter()
                .map(|item| (item.id, item))
                .collect()
        };

        Ok(shelves
            .into_iter()
            .zip(warehouses)
            .zip(stocks)
            .map(|((shelf, warehouse), stocks)| ShelfDetails {
                shelf,
                warehouse,
                stocks: stocks
                    .into_iter()
                    .map(|stock| {
                        let item = items.get(&stock.item_id).cloned();
                        (stock, item)
                    })
                    .collect(),
            })
            .collect())
    }
}
