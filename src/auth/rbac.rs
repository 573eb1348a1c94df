/*!
 * # Role-Based Access Control (RBAC) Module
 *
 * Defines the three account roles and the permission set each one carries.
 */

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};
use tracing::warn;
use utoipa::ToSchema;

use super::permissions::{format_permission, is_permission_implied, Actions, Resources};

/// Account role stored in `user_roles.role_name`
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
    ToSchema,
)]
pub enum UserRole {
    Logistic,
    Manager,
    SuperAdmin,
}

impl UserRole {
    /// Role given to self-registered accounts
    pub const DEFAULT: UserRole = UserRole::Logistic;

    /// Comma separated role names, for validation messages
    pub fn allowed_names() -> String {
        UserRole::iter()
            .map(|role| role.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Role definition with associated permissions
#[derive(Debug, Clone)]
pub struct Role {
    pub name: String,
    pub description: String,
    pub permissions: Vec<String>,
}

// Define standard roles and their permissions
lazy_static! {
    pub static ref ROLES: HashMap<String, Role> = {
        let mut roles = HashMap::new();

        // Logistic: floor staff, read everything and move stock around
        let mut logistic_permissions: Vec<String> = Resources::INVENTORY
            .iter()
            .map(|resource| format_permission(resource, Actions::READ))
            .collect();
        logistic_permissions.push(format_permission(Resources::STOCKS, Actions::CREATE));
        logistic_permissions.push(format_permission(Resources::STOCKS, Actions::UPDATE));

        roles.insert(
            UserRole::Logistic.to_string(),
            Role {
                name: UserRole::Logistic.to_string(),
                description: "Warehouse staff: read inventory, record and adjust stock".to_string(),
                permissions: logistic_permissions,
            },
        );

        roles.insert(
            UserRole::Manager.to_string(),
            Role {
                name: UserRole::Manager.to_string(),
                description: "Full control over inventory resources".to_string(),
                permissions: Resources::INVENTORY
                    .iter()
                    .map(|resource| format_permission(resource, Actions::ALL))
                    .collect(),
            },
        );

        roles.insert(
            UserRole::SuperAdmin.to_string(),
            Role {
                name: UserRole::SuperAdmin.to_string(),
                description: "Administrator with full access, including user management".to_string(),
                permissions: vec![
                    Actions::ALL.to_string(),
                    format_permission(Resources::USERS, Actions::ALL),
                ],
            },
        );

        roles
    };
}

/// RBAC lookups over the static role table
#[derive(Clone, Debug, Default)]
pub struct RbacService;

impl RbacService {
    pub fn new() -> Self {
        Self
    }

    /// Get a role by name
    pub fn get_role(&self, role_name: &str) -> Option<&'static Role> {
        ROLES.get(role_name)
    }

    /// Get all permissions for a role
    pub fn get_role_permissions(&self, role_name: &str) -> Vec<String> {
        match ROLES.get(role_name) {
            Some(role) => role.permissions.clone(),
            None => {
                warn!("Role not found: {}", role_name);
                vec![]
            }
        }
    }

    /// Check if a specific permission matches a required permission
    pub fn check_permission(&self, user_permission: &str, required_permission: &str) -> bool {
        is_permission_implied(user_permission, required_permission)
    }

    /// Check a full grant list against a required permission
    pub fn has_permission(&self, granted: &[String], required_permission: &str) -> bool {
        granted
            .iter()
            .any(|perm| self.check_permission(perm, required_permission))
    }
}
