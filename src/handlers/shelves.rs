use axum::{
    extract::{Json, Path, Query, State},
    response::IntoResponse,
};

use super::common::{
    created_response, map_service_error, no_content_response, success_response, validate_input,
};
use crate::{
    dto::{CreateShelfRequest, ShelfDto, ShelfQuery, UpdateShelfRequest},
    errors::{ApiError, ErrorResponse},
    handlers::AppState,
};

/// List shelves, optionally only those of one warehouse
#[utoipa::path(
    get,
    path = "/api/shelves",
    params(ShelfQuery),
    responses(
        (status = 200, description = "Shelves listed", body = Vec<ShelfDto>),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Shelves"
)]
pub async fn list_shelves(
    State(state): State<AppState>,
    Query(query): Query<ShelfQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let service = &state.services.shelves;
    let shelves = match query.warehouse_id {
        Some(warehouse_id) => service.list_shelves_by_warehouse(warehouse_id).await,
        None => service.list_shelves().await,
    }
    .map_err(map_service_error)?;

    Ok(success_response(shelves))
}

/// Get a shelf with its warehouse and stock
#[utoipa::path(
    get,
    path = "/api/shelves/{id}",
    params(("id" = i32, Path, description = "Shelf ID")),
    responses(
        (status = 200, description = "Shelf fetched", body = ShelfDto),
        (status = 404, description = "Shelf not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Shelves"
)]
pub async fn get_shelf(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let shelf = state
        .services
        .shelves
        .get_shelf(id)
        .await
        .map_err(map_service_error)?;

    Ok(success_response(shelf))
}

/// Create a shelf in an existing warehouse
#[utoipa::path(
    post,
    path = "/api/shelves",
    request_body = CreateShelfRequest,
    responses(
        (status = 201, description = "Shelf created", body = ShelfDto),
        (status = 400, description = "Invalid request or unknown warehouse", body = ErrorResponse),
        (status = 409, description = "Code already used in the warehouse", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Shelves"
)]
pub async fn create_shelf(
    State(state): State<AppState>,
    Json(payload): Json<CreateShelfRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;

    let shelf = state
        .services
        .shelves
        .create_shelf(payload)
        .await
        .map_err(map_service_error)?;

    Ok(created_response(shelf))
}

/// Change a shelf's code
#[utoipa::path(
    put,
    path = "/api/shelves/{id}",
    params(("id" = i32, Path, description = "Shelf ID")),
    request_body = UpdateShelfRequest,
    responses(
        (status = 204, description = "Shelf updated"),
        (status = 404, description = "Shelf not found", body = ErrorResponse),
        (status = 409, description = "Code already used in the warehouse", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Shelves"
)]
pub async fn update_shelf(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateShelfRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;

    state
        .services
        .shelves
        .update_shelf(id, payload)
        .await
        .map_err(map_service_error)?;

    Ok(no_content_response())
}

/// Delete an empty shelf
#[utoipa::path(
    delete,
    path = "/api/shelves/{id}",
    params(("id" = i32, Path, description = "Shelf ID")),
    responses(
        (status = 204, description = "Shelf deleted"),
        (status = 404, description = "Shelf not found", body = ErrorResponse),
        (status = 409, description = "Shelf still holds stock", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Shelves"
)]
pub async fn delete_shelf(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .services
        .shelves
        .delete_shelf(id)
        .await
        .map_err(map_service_error)?;

    Ok(no_content_response())
}
