use axum::{
    extract::{Json, Path, State},
    response::IntoResponse,
};
use tracing::info;

use super::common::{
    created_response, map_service_error, no_content_response, success_response, validate_input,
};
use crate::{
    dto::{ItemDto, ItemRequest},
    errors::{ApiError, ErrorResponse},
    handlers::AppState,
};

/// List items with their supplier
#[utoipa::path(
    get,
    path = "/api/items",
    responses(
        (status = 200, description = "Items listed", body = Vec<ItemDto>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Items"
)]
pub async fn list_items(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let items = state
        .services
        .items
        .list_items()
        .await
        .map_err(map_service_error)?;

    Ok(success_response(items))
}

/// Get an item by ID
#[utoipa::path(
    get,
    path = "/api/items/{id}",
    params(("id" = i32, Path, description = "Item ID")),
    responses(
        (status = 200, description = "Item fetched", body = ItemDto),
        (status = 404, description = "Item not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Items"
)]
pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let item = state
        .services
        .items
        .get_item(id)
        .await
        .map_err(map_service_error)?;

    Ok(success_response(item))
}

/// Create an item for an existing supplier
#[utoipa::path(
    post,
    path = "/api/items",
    request_body = ItemRequest,
    responses(
        (status = 201, description = "Item created", body = ItemDto),
        (status = 400, description = "Invalid request or unknown supplier", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Items"
)]
pub async fn create_item(
    State(state): State<AppState>,
    Json(payload): Json<ItemRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;

    let item = state
        .services
        .items
        .create_item(payload)
        .await
        .map_err(map_service_error)?;

    info!("Item created: {}", item.id);
    Ok(created_response(item))
}

/// Replace an item's details
#[utoipa::path(
    put,
    path = "/api/items/{id}",
    params(("id" = i32, Path, description = "Item ID")),
    request_body = ItemRequest,
    responses(
        (status = 204, description = "Item updated"),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Item not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Items"
)]
pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<ItemRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;

    state
        .services
        .items
        .update_item(id, payload)
        .await
        .map_err(map_service_error)?;

    Ok(no_content_response())
}

/// Delete an item that is not stocked anywhere
#[utoipa::path(
    delete,
    path = "/api/items/{id}",
    params(("id" = i32, Path, description = "Item ID")),
    responses(
        (status = 204, description = "Item deleted"),
        (status = 404, description = "Item not found", body = ErrorResponse),
        (status = 409, description = "Item is still stocked", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Items"
)]
pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .services
        .items
        .delete_item(id)
        .await
        .map_err(map_service_error)?;

    info!("Item deleted: {}", id);
    Ok(no_content_response())
}
