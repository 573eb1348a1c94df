use axum::{
    extract::{Json, State},
    response::IntoResponse,
};

use super::common::{map_service_error, success_response, validate_input};
use crate::{
    dto::{AuthResponse, LoginRequest, RegisterRequest},
    errors::{ApiError, ErrorResponse},
    handlers::AppState,
};

/// Register a new account with the default role and receive a token
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Account created", body = AuthResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 409, description = "Email or username already taken", body = ErrorResponse)
    ),
    tag = "Auth"
)]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;

    let response = state
        .services
        .users
        .register(payload)
        .await
        .map_err(map_service_error)?;

    Ok(success_response(response))
}

/// Exchange a username and password for a bearer token
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 401, description = "Invalid username or password", body = ErrorResponse)
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;

    let response = state
        .services
        .users
        .authenticate(payload)
        .await
        .map_err(map_service_error)?;

    Ok(success_response(response))
}
