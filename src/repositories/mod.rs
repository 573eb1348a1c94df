use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, PaginatorTrait, PrimaryKeyTrait,
};
use std::marker::PhantomData;
use std::sync::Arc;

pub mod item_repository;
pub mod shelf_repository;
pub mod stock_repository;
pub mod supplier_repository;
pub mod user_repository;
pub mod warehouse_repository;

pub use item_repository::ItemRepository;
pub use shelf_repository::ShelfRepository;
pub use stock_repository::StockRepository;
pub use supplier_repository::SupplierRepository;
pub use user_repository::UserRepository;
pub use warehouse_repository::WarehouseRepository;

/// Repository trait for common database operations
pub trait Repository {
    fn get_db(&self) -> &DatabaseConnection;
}

#[derive(Debug, Clone)]
pub struct BaseRepository {
    db: Arc<DatabaseConnection>,
}

impl BaseRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl Repository for BaseRepository {
    fn get_db(&self) -> &DatabaseConnection {
        &self.db
    }
}

type PrimaryKeyOf<E> = <<E as EntityTrait>::PrimaryKey as PrimaryKeyTrait>::ValueType;

/// Generic CRUD over a single sea-orm entity.
///
/// Entity-specific queries are added as inherent impls on the concrete
/// instantiation (see the sibling modules).
#[derive(Debug)]
pub struct EntityRepository<E: EntityTrait> {
    base: BaseRepository,
    _entity: PhantomData<E>,
}

impl<E: EntityTrait> Clone for EntityRepository<E> {
    fn clone(&self) -> Self {
        Self {
            base: self.base.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E: EntityTrait> Repository for EntityRepository<E> {
    fn get_db(&self) -> &DatabaseConnection {
        self.base.get_db()
    }
}

impl<E> EntityRepository<E>
where
    E: EntityTrait,
    E::Model: Send + Sync,
{
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            base: BaseRepository::new(db),
            _entity: PhantomData,
        }
    }

    /// Find a row by primary key
    pub async fn find_by_id<K>(&self, id: K) -> Result<Option<E::Model>, DbErr>
    where
        K: Into<PrimaryKeyOf<E>>,
    {
        E::find_by_id(id).one(self.get_db()).await
    }

    /// Whether a row with this primary key exists
    pub async fn exists<K>(&self, id: K) -> Result<bool, DbErr>
    where
        K: Into<PrimaryKeyOf<E>>,
    {
        Ok(E::find_by_id(id).count(self.get_db()).await? > 0)
    }

    /// Insert a new row and return it as stored
    pub async fn insert<A>(&self, model: A) -> Result<E::Model, DbErr>
    where
        A: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
        E::Model: IntoActiveModel<A>,
    {
        model.insert(self.get_db()).await
    }

    /// Persist the changed columns of an existing row
    pub async fn update<A>(&self, model: A) -> Result<E::Model, DbErr>
    where
        A: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
        E::Model: IntoActiveModel<A>,
    {
        model.update(self.get_db()).await
    }

    /// Delete by primary key, returning the number of rows removed
    pub async fn delete_by_id<K>(&self, id: K) -> Result<u64, DbErr>
    where
        K: Into<PrimaryKeyOf<E>>,
    {
        let result = E::delete_by_id(id).exec(self.get_db()).await?;
        Ok(result.rows_affected)
    }
}
