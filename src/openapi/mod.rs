use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Warehouse API",
        version = "1.0.0",
        description = r#"
# Warehouse Inventory API

Suppliers, items, warehouses, shelves and the stock held on them.

## Authentication

Obtain a token from `POST /api/auth/login` and send it on every inventory call:

```
Authorization: Bearer <your-jwt-token>
```

Logistic accounts read everything and record stock. Managers manage all
inventory resources. SuperAdmins additionally manage user accounts.

## Stock

Posting stock for an item/shelf pair that already has a row adds to that row.

## Error Handling

```json
{
  "error": "Conflict",
  "message": "Conflict: Cannot delete shelf 4 because it still holds stock.",
  "timestamp": "2024-01-01T00:00:00Z"
}
```
        "#
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development")
    ),
    tags(
        (name = "Auth", description = "Registration and login"),
        (name = "Users", description = "Account administration (SuperAdmin)"),
        (name = "Suppliers", description = "Supplier endpoints"),
        (name = "Items", description = "Catalogue item endpoints"),
        (name = "Warehouses", description = "Warehouse endpoints"),
        (name = "Shelves", description = "Shelf endpoints"),
        (name = "Stocks", description = "Stock endpoints"),
        (name = "Health", description = "Health check endpoints")
    ),
    paths(
        crate::handlers::auth::register,
        crate::handlers::auth::login,

        crate::handlers::users::list_users,
        crate::handlers::users::get_user,
        crate::handlers::users::create_user,
        crate::handlers::users::update_user,
        crate::handlers::users::delete_user,

        crate::handlers::suppliers::list_suppliers,
        crate::handlers::suppliers::get_supplier,
        crate::handlers::suppliers::create_supplier,
        crate::handlers::suppliers::update_supplier,
        crate::handlers::suppliers::delete_supplier,

        crate::handlers::items::list_items,
        crate::handlers::items::get_item,
        crate::handlers::items::create_item,
        crate::handlers::items::update_item,
        crate::handlers::items::delete_item,

        crate::handlers::warehouses::list_warehouses,
        crate::handlers::warehouses::get_warehouse,
        crate::handlers::warehouses::create_warehouse,
        crate::handlers::warehouses::update_warehouse,
        crate::handlers::warehouses::delete_warehouse,

        crate::handlers::shelves::list_shelves,
        crate::handlers::shelves::get_shelf,
        crate::handlers::shelves::create_shelf,
        crate::handlers::shelves::update_shelf,
        crate::handlers::shelves::delete_shelf,

        crate::handlers::stocks::list_stocks,
        crate::handlers::stocks::get_stock,
        crate::handlers::stocks::create_stock,
        crate::handlers::stocks::update_stock_quantity,
        crate::handlers::stocks::delete_stock,

        crate::handlers::health::health_check,
    ),
    components(
        schemas(
            crate::dto::RegisterRequest,
            crate::dto::LoginRequest,
            crate::dto::AuthResponse,
            crate::dto::UserDto,
            crate::dto::CreateUserRequest,
            crate::dto::UpdateUserRequest,
            crate::auth::UserRole,

            crate::dto::SupplierRequest,
            crate::dto::SupplierDto,
            crate::dto::SupplierItemDto,

            crate::dto::ItemRequest,
            crate::dto::ItemDto,
            crate::dto::ItemSupplierDto,

            crate::dto::WarehouseRequest,
            crate::dto::WarehouseDto,
            crate::dto::WarehouseShelfDto,

            crate::dto::CreateShelfRequest,
            crate::dto::UpdateShelfRequest,
            crate::dto::ShelfDto,
            crate::dto::ShelfWarehouseDto,
            crate::dto::ShelfStockDto,

            crate::dto::CreateStockRequest,
            crate::dto::UpdateStockQuantityRequest,
            crate::dto::StockDto,
            crate::dto::StockItemDto,
            crate::dto::StockShelfDto,

            crate::handlers::common::MessageResponse,
            crate::handlers::health::HealthResponse,
            crate::errors::ErrorResponse
        )
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDocV1;

/// Registers the `bearer_auth` scheme referenced by protected paths
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDocV1::openapi())
        .config(utoipa_swagger_ui::Config::from("/api-docs/openapi.json").try_it_out_enabled(true))
}
