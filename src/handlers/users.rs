use axum::{
    extract::{Json, Path, State},
    response::IntoResponse,
};
use tracing::info;
use uuid::Uuid;

use super::common::{
    created_response, map_service_error, success_response, validate_input, MessageResponse,
};
use crate::{
    auth::AuthUser,
    dto::{CreateUserRequest, UpdateUserRequest, UserDto},
    errors::{ApiError, ErrorResponse},
    handlers::AppState,
};

#[utoipa::path(
    get,
    path = "/api/user",
    responses(
        (status = 200, description = "Users listed", body = Vec<UserDto>),
        (status = 403, description = "SuperAdmin role required", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn list_users(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let users = state
        .services
        .users
        .list_users()
        .await
        .map_err(map_service_error)?;

    Ok(success_response(users))
}

#[utoipa::path(
    get,
    path = "/api/user/{id}",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User fetched", body = UserDto),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state
        .services
        .users
        .get_user(id)
        .await
        .map_err(map_service_error)?;

    Ok(success_response(user))
}

/// Create an account with an explicit role
#[utoipa::path(
    post,
    path = "/api/user",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserDto),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 409, description = "Email or username already taken", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn create_user(
    State(state): State<AppState>,
    admin: AuthUser,
    Json(payload): Json<CreateUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;

    let user = state
        .services
        .users
        .create_user(payload)
        .await
        .map_err(map_service_error)?;

    info!(admin = %admin.user_id, user_id = %user.id, "Account created by administrator");
    Ok(created_response(user))
}

/// Update the fields present in the body
#[utoipa::path(
    put,
    path = "/api/user/{id}",
    params(("id" = Uuid, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = UserDto),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 409, description = "Email or username already taken", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;

    let user = state
        .services
        .users
        .update_user(id, payload)
        .await
        .map_err(map_service_error)?;

    Ok(success_response(user))
}

#[utoipa::path(
    delete,
    path = "/api/user/{id}",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn delete_user(
    State(state): State<AppState>,
    admin: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .services
        .users
        .delete_user(id)
        .await
        .map_err(map_service_error)?;

    info!(admin = %admin.user_id, user_id = %id, "Account deleted by administrator");
    Ok(success_response(MessageResponse::new(
        "User deleted successfully.",
    )))
}
