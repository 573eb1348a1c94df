//! Domain services. Each one owns the referential checks of its entity and
//! delegates storage to the repositories.

pub mod items;
pub mod shelves;
pub mod stocks;
pub mod suppliers;
pub mod users;
pub mod warehouses;

pub use items::ItemService;
pub use shelves::ShelfService;
pub use stocks::StockService;
pub use suppliers::SupplierService;
pub use users::UserService;
pub use warehouses::WarehouseService;
