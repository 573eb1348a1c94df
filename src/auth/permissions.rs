/*!
 * # Permissions Module
 *
 * Permissions are `resource:action` strings. A grant of `resource:*` covers
 * every action on that resource and `*` covers everything.
 */

/// Permission actions
pub struct Actions;

impl Actions {
    pub const READ: &'static str = "read";
    pub const CREATE: &'static str = "create";
    pub const UPDATE: &'static str = "update";
    pub const DELETE: &'static str = "delete";
    pub const ALL: &'static str = "*";
}

/// Resource types
pub struct Resources;

impl Resources {
    pub const WAREHOUSES: &'static str = "warehouses";
    pub const SHELVES: &'static str = "shelves";
    pub const ITEMS: &'static str = "items";
    pub const SUPPLIERS: &'static str = "suppliers";
    pub const STOCKS: &'static str = "stocks";
    pub const USERS: &'static str = "users";

    /// Every inventory resource, in route order
    pub const INVENTORY: [&'static str; 5] = [
        Self::WAREHOUSES,
        Self::SHELVES,
        Self::ITEMS,
        Self::SUPPLIERS,
        Self::STOCKS,
    ];
}

/// Common permission string constants for compile-time safety
pub mod consts {
    // Warehouses
    pub const WAREHOUSES_READ: &str = "warehouses:read";
    pub const WAREHOUSES_CREATE: &str = "warehouses:create";
    pub const WAREHOUSES_UPDATE: &str = "warehouses:update";
    pub const WAREHOUSES_DELETE: &str = "warehouses:delete";

    // Shelves
    pub const SHELVES_READ: &str = "shelves:read";
    pub const SHELVES_CREATE: &str = "shelves:create";
    pub const SHELVES_UPDATE: &str = "shelves:update";
    pub const SHELVES_DELETE: &str = "shelves:delete";

    // Items
    pub const ITEMS_READ: &str = "items:read";
    pub const ITEMS_CREATE: &str = "items:create";
    pub const ITEMS_UPDATE: &str = "items:update";
    pub const ITEMS_DELETE: &str = "items:delete";

    // Suppliers
    pub const SUPPLIERS_READ: &str = "suppliers:read";
    pub const SUPPLIERS_CREATE: &str = "suppliers:create";
    pub const SUPPLIERS_UPDATE: &str = "suppliers:update";
    pub const SUPPLIERS_DELETE: &str = "suppliers:delete";

    // Stocks
    pub const STOCKS_READ: &str = "stocks:read";
    pub const STOCKS_CREATE: &str = "stocks:create";
    pub const STOCKS_UPDATE: &str = "stocks:update";
    pub const STOCKS_DELETE: &str = "stocks:delete";

    // Users
    pub const USERS_MANAGE: &str = "users:*";
}

/// Format a permission string
pub fn format_permission(resource: &str, action: &str) -> String {
    format!("{}:{}", resource, action)
}

/// Check if `required_perm` is covered by the granted `user_perm`
pub fn is_permission_implied(user_perm: &str, required_perm: &str) -> bool {
    if user_perm == Actions::ALL || user_perm == required_perm {
        return true;
    }

    match (user_perm.split_once(':'), required_perm.split_once(':')) {
        (Some((user_resource, user_action)), Some((required_resource, _))) => {
            user_action == Actions::ALL && user_resource == required_resource
        }
        _ => false,
    }
}
