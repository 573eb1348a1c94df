//! sea-orm entities for the inventory tables. Account tables live under
//! `crate::auth`.

pub mod item;
pub mod shelf;
pub mod stock;
pub mod supplier;
pub mod warehouse;

pub use item::Entity as Item;
pub use shelf::Entity as Shelf;
pub use stock::Entity as Stock;
pub use supplier::Entity as Supplier;
pub use warehouse::Entity as Warehouse;
