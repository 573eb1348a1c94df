use axum::{
    extract::{Json, Path, Query, State},
    response::{IntoResponse, Response},
};
use tracing::info;

use super::common::{
    created_response, map_service_error, no_content_response, success_response, validate_input,
};
use crate::{
    dto::{CreateStockRequest, StockDto, StockQuery, UpdateStockQuantityRequest},
    errors::{ApiError, ErrorResponse, ServiceError},
    handlers::AppState,
};

/// List stock rows.
///
/// With both `shelfId` and `itemId` the single matching row is returned;
/// with one of them the rows are filtered by it.
#[utoipa::path(
    get,
    path = "/api/stocks",
    params(StockQuery),
    responses(
        (status = 200, description = "Stock rows, or the single row for an item/shelf pair", body = Vec<StockDto>),
        (status = 404, description = "No stock for the item/shelf pair", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Stocks"
)]
pub async fn list_stocks(
    State(state): State<AppState>,
    Query(query): Query<StockQuery>,
) -> Result<Response, ApiError> {
    let service = &state.services.stocks;

    let response = match (query.item_id, query.shelf_id) {
        (Some(item_id), Some(shelf_id)) => success_response(
            service
                .get_stock_by_item_and_shelf(item_id, shelf_id)
                .await
                .map_err(map_service_error)?,
        ),
        (None, Some(shelf_id)) => success_response(
            service
                .list_stocks_by_shelf(shelf_id)
                .await
                .map_err(map_service_error)?,
        ),
        (Some(item_id), None) => success_response(
            service
                .list_stocks_by_item(item_id)
                .await
                .map_err(map_service_error)?,
        ),
        (None, None) => success_response(service.list_stocks().await.map_err(map_service_error)?),
    };

    Ok(response)
}

#[utoipa::path(
    get,
    path = "/api/stocks/{id}",
    params(("id" = i32, Path, description = "Stock ID")),
    responses(
        (status = 200, description = "Stock fetched", body = StockDto),
        (status = 404, description = "Stock not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Stocks"
)]
pub async fn get_stock(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let stock = state
        .services
        .stocks
        .get_stock(id)
        .await
        .map_err(map_service_error)?;

    Ok(success_response(stock))
}

/// Record stock of an item on a shelf; an existing row for the pair is
/// topped up instead of duplicated
#[utoipa::path(
    post,
    path = "/api/stocks",
    request_body = CreateStockRequest,
    responses(
        (status = 201, description = "Stock created or merged", body = StockDto),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Item or shelf not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Stocks"
)]
pub async fn create_stock(
    State(state): State<AppState>,
    Json(payload): Json<CreateStockRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;

    let stock = state
        .services
        .stocks
        .create_stock(payload)
        .await
        .map_err(map_service_error)?;

    info!(
        "Stock {} now holds {} of item {} on shelf {}",
        stock.id, stock.quantity, stock.item_id, stock.shelf_id
    );
    Ok(created_response(stock))
}

/// Set the quantity of a stock row
#[utoipa::path(
    put,
    path = "/api/stocks/{id}/quantity",
    params(("id" = i32, Path, description = "Stock ID")),
    request_body = UpdateStockQuantityRequest,
    responses(
        (status = 204, description = "Quantity replaced"),
        (status = 400, description = "Invalid quantity", body = ErrorResponse),
        (status = 404, description = "Stock not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Stocks"
)]
pub async fn update_stock_quantity(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateStockQuantityRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;
    let quantity = payload.quantity.ok_or_else(|| {
        map_service_error(ServiceError::ValidationError("quantity is required".into()))
    })?;

    state
        .services
        .stocks
        .update_quantity(id, quantity)
        .await
        .map_err(map_service_error)?;

    Ok(no_content_response())
}

#[utoipa::path(
    delete,
    path = "/api/stocks/{id}",
    params(("id" = i32, Path, description = "Stock ID")),
    responses(
        (status = 204, description = "Stock deleted"),
        (status = 404, description = "Stock not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Stocks"
)]
pub async fn delete_stock(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .services
        .stocks
        .delete_stock(id)
        .await
        .map_err(map_service_error)?;

    Ok(no_content_response())
}
