//! Request and response bodies of the HTTP API.
//!
//! Responses are mapped field by field from entity models and their loaded
//! relations; JSON uses camelCase.

pub mod auth;
pub mod items;
pub mod shelves;
pub mod stocks;
pub mod suppliers;
pub mod users;
pub mod warehouses;

mod validation;

pub use auth::*;
pub use items::*;
pub use shelves::*;
pub use stocks::*;
pub use suppliers::*;
pub use users::*;
pub use warehouses::*;
