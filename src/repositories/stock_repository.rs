use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DbErr,
    EntityTrait, LoaderTrait, QueryFilter, QueryOrder, Set,
};

use super::{EntityRepository, Repository};
use crate::entities::{item, shelf, stock};

/// Repository for stock operations
pub type StockRepository = EntityRepository<stock::Entity>;

/// A stock row with the item and shelf it points at
#[derive(Debug, Clone)]
pub struct StockDetails {
    pub stock: stock::Model,
    pub item: Option<item::Model>,
    pub shelf: Option<shelf::Model>,
}

impl EntityRepository<stock::Entity> {
    pub async fn find_all_details(&self) -> Result<Vec<StockDetails>, DbErr> {
        self.find_details_where(Condition::all()).await
    }

    pub async fn find_details_by_shelf(&self, shelf_id: i32) -> Result<Vec<StockDetails>, DbErr> {
        self.find_details_where(Condition::all().add(stock::Column::ShelfId.eq(shelf_id)))
            .await
    }

    pub async fn find_details_by_item(&self, item_id: i32) -> Result<Vec<StockDetails>, DbErr> {
        self.find_details_where(Condition::all().add(stock::Column::ItemId.eq(item_id)))
            .await
    }

    pub async fn find_details(&self, id: i32) -> Result<Option<StockDetails>, DbErr> {
        Ok(self
            .find_details_where(Condition::all().add(stock::Column::Id.eq(id)))
            .await?
            .into_iter()
            .next())
    }

    /// The single row for an (item, shelf) pair
    pub async fn find_details_by_pair(
        &self,
        item_id: i32,
        shelf_id: i32,
    ) -> Result<Option<StockDetails>, DbErr> {
        Ok(self
            .find_details_where(
                Condition::all()
                    .add(stock::Column::ItemId.eq(item_id))
                    .add(stock::Column::ShelfId.eq(shelf_id)),
            )
            .await?
            .into_iter()
            .next())
    }

    /// Replace the quantity of a row and stamp it; returns rows affected
    pub async fn set_quantity(&self, id: i32, quantity: i32) -> Result<u64, DbErr> {
        let result = stock::Entity::update_many()
            .col_expr(stock::Column::Quantity, Expr::value(quantity))
            .col_expr(stock::Column::LastUpdated, Expr::value(Utc::now()))
            .filter(stock::Column::Id.eq(id))
            .exec(self.get_db())
            .await?;
        Ok(result.rows_affected)
    }

    async fn find_details_where(&self, condition: Condition) -> Result<Vec<StockDetails>, DbErr> {
        let stocks = stock::Entity::find()
            .filter(condition)
            .order_by_asc(stock::Column::Id)
            .all(self.get_db())
            .await?;
        Self::attach_relations(self.get_db(), stocks).await
    }

    /// Row for an (item, shelf) pair, read through `conn`
    pub async fn find_pair_with<C: ConnectionTrait>(
        conn: &C,
        item_id: i32,
        shelf_id: i32,
    ) -> Result<Option<stock::Model>, DbErr> {
        stock::Entity::find()
            .filter(stock::Column::ItemId.eq(item_id))
            .filter(stock::Column::ShelfId.eq(shelf_id))
            .one(conn)
            .await
    }

    /// `quantity = quantity + delta` evaluated by the database
    pub async fn increment_with<C: ConnectionTrait>(
        conn: &C,
        id: i32,
        delta: i32,
    ) -> Result<u64, DbErr> {
        let result = stock::Entity::update_many()
            .col_expr(
                stock::Column::Quantity,
                Expr::col(stock::Column::Quantity).add(delta),
            )
            .col_expr(stock::Column::LastUpdated, Expr::value(Utc::now()))
            .filter(stock::Column::Id.eq(id))
            .exec(conn)
            .await?;
        Ok(result.rows_affected)
    }

    pub async fn insert_with<C: ConnectionTrait>(
        conn: &C,
        item_id: i32,
        shelf_id: i32,
        quantity: i32,
    ) -> Result<stock::Model, DbErr> {
        stock::ActiveModel {
            item_id: Set(item_id),
            shelf_id: Set(shelf_id),
            quantity: Set(quantity),
            last_updated: Set(Utc::now()),
            ..Default::default()
        }
        .insert(conn)
        .await
    }

    /// Load the item and shelf of every row through `conn`
    pub async fn attach_relations<C: ConnectionTrait>(
        conn: &C,
        stocks: Vec<stock::Model>,
    ) -> Result<Vec<StockDetails>, DbErr> {
        if stocks.is_empty() {
            return Ok(Vec::new());
        }

        let items = stocks.load_one(item::Entity, conn).await?;
        let shelves = stocks.load_one(shelf::Entity, conn).await?;

        Ok(stocks
            .into_iter()
            .zip(items)
            .zip(shelves)
            .map(|((stock, item), shelf)| StockDetails { stock, item, shelf })
            .collect())
    }
}
