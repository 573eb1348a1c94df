use sea_orm::{
    ColumnTrait, DbErr, EntityTrait, LoaderTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

use super::{EntityRepository, Repository};
use crate::entities::{item, stock, supplier};

/// Repository for item operations
pub type ItemRepository = EntityRepository<item::Entity>;

impl EntityRepository<item::Entity> {
    /// All items ordered by id, each with its supplier
    pub async fn find_all_with_supplier(
        &self,
    ) -> Result<Vec<(item::Model, Option<supplier::Model>)>, DbErr> {
        let items = item::Entity::find()
            .order_by_asc(item::Column::Id)
            .all(self.get_db())
            .await?;
        let suppliers = items.load_one(supplier::Entity, self.get_db()).await?;

        Ok(items.into_iter().zip(suppliers).collect())
    }

    pub async fn find_with_supplier(
        &self,
        id: i32,
    ) -> Result<Option<(item::Model, Option<supplier::Model>)>, DbErr> {
        item::Entity::find_by_id(id)
            .find_also_related(supplier::Entity)
            .one(self.get_db())
            .await
    }

    /// Whether any stock row still references the item
    pub async fn has_stock(&self, id: i32) -> Result<bool, DbErr> {
        let count = stock::Entity::find()
            .filter(stock::Column::ItemId.eq(id))
            .count(self.get_db())
            .await?;
        Ok(count > 0)
    }
}
