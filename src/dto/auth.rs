use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::users::UserDto;

/// Body of `POST /api/auth/register`
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(email)]
    #[schema(example = "picker@example.com")]
    pub email: String,
    #[validate(length(min = 1))]
    #[schema(example = "picker01")]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Body of `POST /api/auth/login`
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Issued token together with the account it belongs to
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub expiration: DateTime<Utc>,
    pub user: UserDto,
    #[schema(example = "Login successful!")]
    pub message: String,
}
