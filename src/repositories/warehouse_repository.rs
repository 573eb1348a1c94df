use sea_orm::{
    ColumnTrait, DbErr, EntityTrait, LoaderTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

use super::{EntityRepository, Repository};
use crate::entities::{shelf, warehouse};

/// Repository for warehouse operations
pub type WarehouseRepository = EntityRepository<warehouse::Entity>;

impl EntityRepository<warehouse::Entity> {
    /// All warehouses ordered by id, each with its shelves
    pub async fn find_all_with_shelves(
        &self,
    ) -> Result<Vec<(warehouse::Model, Vec<shelf::Model>)>, DbErr> {
        let warehouses = warehouse::Entity::find()
            .order_by_asc(warehouse::Column::Id)
            .all(self.get_db())
            .await?;
        let shelves = warehouses.load_many(shelf::Entity, self.get_db()).await?;

        Ok(warehouses.into_iter().zip(shelves).collect())
    }

    pub async fn find_with_shelves(
        &self,
        id: i32,
    ) -> Result<Option<(warehouse::Model, Vec<shelf::Model>)>, DbErr> {
        let Some(warehouse) = self.find_by_id(id).await? else {
            return Ok(None);
        };
        let shelves = shelf::Entity::find()
            .filter(shelf::Column::WarehouseId.eq(id))
            .order_by_asc(shelf::Column::Id)
            .all(self.get_db())
            .await?;

        Ok(Some((warehouse, shelves)))
    }

    /// Whether the warehouse still has at least one shelf
    pub async fn has_shelves(&self, id: i32) -> Result<bool, DbErr> {
        let count = shelf::Entity::find()
            .filter(shelf::Column::WarehouseId.eq(id))
            .count(self.get_db())
            .await?;
        Ok(count > 0)
    }
}
