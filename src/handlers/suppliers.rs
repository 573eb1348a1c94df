use axum::{
    extract::{Json, Path, State},
    response::IntoResponse,
};
use tracing::info;

use super::common::{
    created_response, map_service_error, no_content_response, success_response, validate_input,
};
use crate::{
    dto::{SupplierDto, SupplierRequest},
    errors::{ApiError, ErrorResponse},
    handlers::AppState,
};

/// List suppliers with the items they supply
#[utoipa::path(
    get,
    path = "/api/suppliers",
    responses(
        (status = 200, description = "Suppliers listed", body = Vec<SupplierDto>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Suppliers"
)]
pub async fn list_suppliers(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let suppliers = state
        .services
        .suppliers
        .list_suppliers()
        .await
        .map_err(map_service_error)?;

    Ok(success_response(suppliers))
}

/// Get a supplier by ID
#[utoipa::path(
    get,
    path = "/api/suppliers/{id}",
    params(("id" = i32, Path, description = "Supplier ID")),
    responses(
        (status = 200, description = "Supplier fetched", body = SupplierDto),
        (status = 404, description = "Supplier not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Suppliers"
)]
pub async fn get_supplier(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let supplier = state
        .services
        .suppliers
        .get_supplier(id)
        .await
        .map_err(map_service_error)?;

    Ok(success_response(supplier))
}

/// Create a supplier
#[utoipa::path(
    post,
    path = "/api/suppliers",
    request_body = SupplierRequest,
    responses(
        (status = 201, description = "Supplier created", body = SupplierDto),
        (status = 400, description = "Invalid request", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Suppliers"
)]
pub async fn create_supplier(
    State(state): State<AppState>,
    Json(payload): Json<SupplierRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;

    let supplier = state
        .services
        .suppliers
        .create_supplier(payload)
        .await
        .map_err(map_service_error)?;

    info!("Supplier created: {}", supplier.id);
    Ok(created_response(supplier))
}

/// Replace a supplier's details
#[utoipa::path(
    put,
    path = "/api/suppliers/{id}",
    params(("id" = i32, Path, description = "Supplier ID")),
    request_body = SupplierRequest,
    responses(
        (status = 204, description = "Supplier updated"),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Supplier not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Suppliers"
)]
pub async fn update_supplier(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<SupplierRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;

    state
        .services
        .suppliers
        .update_supplier(id, payload)
        .await
        .map_err(map_service_error)?;

    Ok(no_content_response())
}

/// Delete a supplier that no item references
#[utoipa::path(
    delete,
    path = "/api/suppliers/{id}",
    params(("id" = i32, Path, description = "Supplier ID")),
    responses(
        (status = 204, description = "Supplier deleted"),
        (status = 404, description = "Supplier not found", body = ErrorResponse),
        (status = 409, description = "Supplier still has items", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Suppliers"
)]
pub async fn delete_supplier(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .services
        .suppliers
        .delete_supplier(id)
        .await
        .map_err(map_service_error)?;

    info!("Supplier deleted: {}", id);
    Ok(no_content_response())
}
