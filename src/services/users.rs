use chrono::Utc;
use sea_orm::{ActiveModelTrait, DbErr, Set, SqlErr, TransactionTrait};
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::{hash_password, user, verify_password, AuthService, UserRole},
    config::AppConfig,
    db::DbPool,
    dto::{
        AuthResponse, CreateUserRequest, LoginRequest, RegisterRequest, UpdateUserRequest,
        UserDto,
    },
    errors::ServiceError,
    repositories::UserRepository,
};

const EMAIL_TAKEN: &str = "User with this email already exists.";
const USERNAME_TAKEN: &str = "Username already taken.";
const INVALID_CREDENTIALS: &str = "Invalid username or password.";
const USER_NOT_FOUND: &str = "User not found.";

/// Accounts, credentials and role assignment
#[derive(Clone)]
pub struct UserService {
    db_pool: Arc<DbPool>,
    users: UserRepository,
    auth: Arc<AuthService>,
}

impl UserService {
    pub fn new(db_pool: Arc<DbPool>, auth: Arc<AuthService>) -> Self {
        Self {
            users: UserRepository::new(db_pool.clone()),
            db_pool,
            auth,
        }
    }

    /// Self-service sign up; new accounts get the default role
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn register(&self, request: RegisterRequest) -> Result<AuthResponse, ServiceError> {
        let user = self
            .create_account(
                &request.username,
                &request.email,
                &request.password,
                UserRole::DEFAULT,
            )
            .await?;

        info!(user_id = %user.id, "User registered");
        self.token_response(user, UserRole::DEFAULT, "User registered successfully!")
    }

    /// Verifies a username and password and issues a token
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn authenticate(&self, request: LoginRequest) -> Result<AuthResponse, ServiceError> {
        let Some(user) = self.users.find_by_username(&request.username).await? else {
            warn!("Login attempt for unknown user");
            return Err(ServiceError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        };

        if !verify_password(&request.password, &user.password_hash)? {
            warn!(user_id = %user.id, "Login attempt with wrong password");
            return Err(ServiceError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        let role = match self.users.role_of(user.id).await? {
            Some(name) => UserRole::from_str(&name).map_err(|_| {
                ServiceError::InternalError(format!("Unknown role '{}' stored for user", name))
            })?,
            None => {
                warn!(user_id = %user.id, "User has no role row, using the default role");
                UserRole::DEFAULT
            }
        };

        info!(user_id = %user.id, role = %role, "User logged in");
        self.token_response(user, role, "Login successful!")
    }

    #[instrument(skip(self))]
    pub async fn list_users(&self) -> Result<Vec<UserDto>, ServiceError> {
        let users = self.users.find_all_with_roles().await?;
        Ok(users
            .into_iter()
            .map(|(user, role)| UserDto::from_model(user, role))
            .collect())
    }

    #[instrument(skip(self))]
    pub async fn get_user(&self, id: Uuid) -> Result<UserDto, ServiceError> {
        let user = self.find_user(id).await?;
        let role = self.users.role_of(id).await?;
        Ok(UserDto::from_model(user, role))
    }

    /// Administrative account creation with an explicit role
    #[instrument(skip(self, request), fields(username = %request.username, role = %request.role))]
    pub async fn create_user(&self, request: CreateUserRequest) -> Result<UserDto, ServiceError> {
        let role = parse_role(&request.role)?;
        let user = self
            .create_account(&request.username, &request.email, &request.password, role)
            .await?;

        info!(user_id = %user.id, "User created");
        Ok(UserDto::from_model(user, Some(role.to_string())))
    }

    /// Applies the fields present in `request`
    #[instrument(skip(self, request))]
    pub async fn update_user(
        &self,
        id: Uuid,
        request: UpdateUserRequest,
    ) -> Result<UserDto, ServiceError> {
        let existing = self.find_user(id).await?;
        let role = request.role.as_deref().map(parse_role).transpose()?;

        if let Some(email) = request.email.as_deref() {
            if email != existing.email && self.users.find_by_email(email).await?.is_some() {
                return Err(ServiceError::Conflict("Email already in use.".to_string()));
            }
        }
        if let Some(username) = request.username.as_deref() {
            if username != existing.username
                && self.users.find_by_username(username).await?.is_some()
            {
                return Err(ServiceError::Conflict(USERNAME_TAKEN.to_string()));
            }
        }
        let password_hash = request.password.as_deref().map(hash_password).transpose()?;

        let txn = self.db_pool.begin().await?;

        let mut active: user::ActiveModel = existing.into();
        if let Some(username) = request.username {
            active.username = Set(username);
        }
        if let Some(email) = request.email {
            active.email = Set(email);
        }
        if let Some(hash) = password_hash {
            active.password_hash = Set(hash);
        }
        active.updated_at = Set(Utc::now());
        let updated = active.update(&txn).await.map_err(account_conflict)?;

        if let Some(role) = role {
            UserRepository::replace_role_with(&txn, id, role).await?;
        }
        txn.commit().await?;

        let role = self.users.role_of(id).await?;
        info!(user_id = %id, "User updated");
        Ok(UserDto::from_model(updated, role))
    }

    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: Uuid) -> Result<(), ServiceError> {
        let txn = self.db_pool.begin().await?;
        let deleted = UserRepository::delete_with_roles(&txn, id).await?;
        if deleted == 0 {
            return Err(ServiceError::NotFound(USER_NOT_FOUND.to_string()));
        }
        txn.commit().await?;

        info!(user_id = %id, "User deleted");
        Ok(())
    }

    /// Creates (or promotes) the configured administrator when no
    /// SuperAdmin account exists yet
    #[instrument(skip(self, config))]
    pub async fn ensure_super_admin(&self, config: &AppConfig) -> Result<(), ServiceError> {
        if self.users.any_with_role(UserRole::SuperAdmin).await? {
            debug!("SuperAdmin account present");
            return Ok(());
        }

        if let Some(existing) = self.users.find_by_email(&config.admin_email).await? {
            UserRepository::replace_role_with(&*self.db_pool, existing.id, UserRole::SuperAdmin)
                .await?;
            info!(user_id = %existing.id, "Promoted existing account to SuperAdmin");
            return Ok(());
        }

        let Some(password) = config.seed_admin_password() else {
            warn!("No SuperAdmin exists and APP__ADMIN_PASSWORD is not set; skipping seeding");
            return Ok(());
        };

        let user = self
            .create_account(
                &config.admin_username,
                &config.admin_email,
                &password,
                UserRole::SuperAdmin,
            )
            .await?;
        info!(user_id = %user.id, username = %user.username, "Seeded SuperAdmin account");
        Ok(())
    }

    async fn find_user(&self, id: Uuid) -> Result<user::Model, ServiceError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(USER_NOT_FOUND.to_string()))
    }

    async fn create_account(
        &self,
        username: &str,
        email: &str,
        password: &str,
        role: UserRole,
    ) -> Result<user::Model, ServiceError> {
        if self.users.find_by_email(email).await?.is_some() {
            return Err(ServiceError::Conflict(EMAIL_TAKEN.to_string()));
        }
        if self.users.find_by_username(username).await?.is_some() {
            return Err(ServiceError::Conflict(USERNAME_TAKEN.to_string()));
        }

        let password_hash = hash_password(password)?;

        let txn = self.db_pool.begin().await?;
        let user = UserRepository::create_with_role(&txn, username, email, password_hash, role)
            .await
            .map_err(account_conflict)?;
        txn.commit().await?;
        Ok(user)
    }

    fn token_response(
        &self,
        user: user::Model,
        role: UserRole,
        message: &str,
    ) -> Result<AuthResponse, ServiceError> {
        let issued = self.auth.issue_token(&user, role)?;
        Ok(AuthResponse {
            token: issued.token,
            expiration: issued.expiration,
            user: UserDto::from_model(user, Some(role.to_string())),
            message: message.to_string(),
        })
    }
}

fn parse_role(name: &str) -> Result<UserRole, ServiceError> {
    UserRole::from_str(name).map_err(|_| {
        ServiceError::ValidationError(format!(
            "Role '{}' does not exist. Allowed roles: {}",
            name,
            UserRole::allowed_names()
        ))
    })
}

/// Username or email taken by a concurrent request
fn account_conflict(err: DbErr) -> ServiceError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            ServiceError::Conflict("Username or email already in use.".to_string())
        }
        _ => ServiceError::DatabaseError(err),
    }
}
