use sea_orm::{
    ColumnTrait, DbErr, EntityTrait, LoaderTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

use super::{EntityRepository, Repository};
use crate::entities::{item, supplier};

/// Repository for supplier operations
pub type SupplierRepository = EntityRepository<supplier::Entity>;

impl EntityRepository<supplier::Entity> {
    /// All suppliers ordered by id, each paired with the items it supplies
    pub async fn find_all_with_items(
        &self,
    ) -> Result<Vec<(supplier::Model, Vec<item::Model>)>, DbErr> {
        let suppliers = supplier::Entity::find()
            .order_by_asc(supplier::Column::Id)
            .all(self.get_db())
            .await?;
        let items = suppliers.load_many(item::Entity, self.get_db()).await?;

        Ok(suppliers.into_iter().zip(items).collect())
    }

    /// One supplier with its items
    pub async fn find_with_items(
        &self,
        id: i32,
    ) -> Result<Option<(supplier::Model, Vec<item::Model>)>, DbErr> {
        let Some(supplier) = self.find_by_id(id).await? else {
            return Ok(None);
        };
        let items = item::Entity::find()
            .filter(item::Column::SupplierId.eq(id))
            .order_by_asc(item::Column::Id)
            .all(self.get_db())
            .await?;

        Ok(Some((supplier, items)))
    }

    /// Whether any item still references the supplier
    pub async fn has_items(&self, id: i32) -> Result<bool, DbErr> {
        let count = item::Entity::find()
            .filter(item::Column::SupplierId.eq(id))
            .count(self.get_db())
            .await?;
        Ok(count > 0)
    }
}
