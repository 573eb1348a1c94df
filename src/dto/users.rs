use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::auth::{user, UserRole};

fn validate_role(role: &str) -> Result<(), ValidationError> {
    UserRole::from_str(role).map(|_| ()).map_err(|_| {
        let mut err = ValidationError::new("role");
        err.message = Some(format!("Role must be one of: {}", UserRole::allowed_names()).into());
        err
    })
}

/// Body of `POST /api/user`
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 50))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6, max = 100))]
    pub password: String,
    #[validate(custom = "validate_role")]
    #[schema(example = "Manager")]
    pub role: String,
}

/// Body of `PUT /api/user/{id}`; absent fields are left untouched
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 50))]
    pub username: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 6, max = 100))]
    pub password: Option<String>,
    #[validate(custom = "validate_role")]
    pub role: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub role: Option<String>,
}

impl UserDto {
    pub fn from_model(user: user::Model, role: Option<String>) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(role: &str, password: &str) -> CreateUserRequest {
        CreateUserRequest {
            username: "shift.lead".into(),
            email: "lead@example.com".into(),
            password: password.into(),
            role: role.into(),
        }
    }

    #[test]
    fn unknown_role_lists_the_allowed_ones() {
        let errors = create("Intern", "secret1").validate().unwrap_err();
        let message = errors.field_errors()["role"][0]
            .message
            .clone()
            .unwrap_or_default();
        assert_eq!(message, "Role must be one of: Logistic, Manager, SuperAdmin");
    }

    #[test]
    fn short_password_is_rejected() {
        assert!(create("Manager", "12345").validate().is_err());
        assert!(create("Manager", "123456").validate().is_ok());
    }

    #[test]
    fn empty_update_is_valid() {
        assert!(UpdateUserRequest::default().validate().is_ok());
        let bad = UpdateUserRequest {
            role: Some("root".into()),
            ..Default::default()
        };
        assert!(bad.validate().is_err());
    }
}
