use axum::{
    extract::{Json, Path, State},
    response::IntoResponse,
};

use super::common::{
    created_response, map_service_error, no_content_response, success_response, validate_input,
};
use crate::{
    dto::{WarehouseDto, WarehouseRequest},
    errors::{ApiError, ErrorResponse},
    handlers::AppState,
};

/// List warehouses with their shelves
#[utoipa::path(
    get,
    path = "/api/warehouses",
    responses(
        (status = 200, description = "Warehouses listed", body = Vec<WarehouseDto>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Warehouses"
)]
pub async fn list_warehouses(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let warehouses = state
        .services
        .warehouses
        .list_warehouses()
        .await
        .map_err(map_service_error)?;

    Ok(success_response(warehouses))
}

/// Get a warehouse by ID
#[utoipa::path(
    get,
    path = "/api/warehouses/{id}",
    params(("id" = i32, Path, description = "Warehouse ID")),
    responses(
        (status = 200, description = "Warehouse fetched", body = WarehouseDto),
        (status = 404, description = "Warehouse not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Warehouses"
)]
pub async fn get_warehouse(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let warehouse = state
        .services
        .warehouses
        .get_warehouse(id)
        .await
        .map_err(map_service_error)?;

    Ok(success_response(warehouse))
}

/// Create a warehouse
#[utoipa::path(
    post,
    path = "/api/warehouses",
    request_body = WarehouseRequest,
    responses(
        (status = 201, description = "Warehouse created", body = WarehouseDto),
        (status = 400, description = "Invalid request", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Warehouses"
)]
pub async fn create_warehouse(
    State(state): State<AppState>,
    Json(payload): Json<WarehouseRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;

    let warehouse = state
        .services
        .warehouses
        .create_warehouse(payload)
        .await
        .map_err(map_service_error)?;

    Ok(created_response(warehouse))
}

/// Rename or relocate a warehouse
#[utoipa::path(
    put,
    path = "/api/warehouses/{id}",
    params(("id" = i32, Path, description = "Warehouse ID")),
    request_body = WarehouseRequest,
    responses(
        (status = 204, description = "Warehouse updated"),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Warehouse not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Warehouses"
)]
pub async fn update_warehouse(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<WarehouseRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;

    state
        .services
        .warehouses
        .update_warehouse(id, payload)
        .await
        .map_err(map_service_error)?;

    Ok(no_content_response())
}

/// Delete a warehouse without shelves
#[utoipa::path(
    delete,
    path = "/api/warehouses/{id}",
    params(("id" = i32, Path, description = "Warehouse ID")),
    responses(
        (status = 204, description = "Warehouse deleted"),
        (status = 404, description = "Warehouse not found", body = ErrorResponse),
        (status = 409, description = "Warehouse still has shelves", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Warehouses"
)]
pub async fn delete_warehouse(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .services
        .warehouses
        .delete_warehouse(id)
        .await
        .map_err(map_service_error)?;

    Ok(no_content_response())
}
