use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, LoaderTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::{EntityRepository, Repository};
use crate::auth::{user, user_role, UserRole};

/// Repository for user accounts and their role rows
pub type UserRepository = EntityRepository<user::Entity>;

impl EntityRepository<user::Entity> {
    pub async fn find_by_username(&self, username: &str) -> Result<Option<user::Model>, DbErr> {
        user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(self.get_db())
            .await
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<user::Model>, DbErr> {
        user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(self.get_db())
            .await
    }

    /// Name of the user's role row, if any
    pub async fn role_of(&self, user_id: Uuid) -> Result<Option<String>, DbErr> {
        Ok(user_role::Entity::find()
            .filter(user_role::Column::UserId.eq(user_id))
            .order_by_asc(user_role::Column::CreatedAt)
            .one(self.get_db())
            .await?
            .map(|row| row.role_name))
    }

    /// All users ordered by username, each with their role name
    pub async fn find_all_with_roles(&self) -> Result<Vec<(user::Model, Option<String>)>, DbErr> {
        let users = user::Entity::find()
            .order_by_asc(user::Column::Username)
            .all(self.get_db())
            .await?;
        let roles = users.load_many(user_role::Entity, self.get_db()).await?;

        Ok(users
            .into_iter()
            .zip(roles)
            .map(|(user, roles)| {
                let role = roles
                    .into_iter()
                    .min_by_key(|row| row.created_at)
                    .map(|row| row.role_name);
                (user, role)
            })
            .collect())
    }

    /// Whether at least one account holds `role`
    pub async fn any_with_role(&self, role: UserRole) -> Result<bool, DbErr> {
        let count = user_role::Entity::find()
            .filter(user_role::Column::RoleName.eq(role.to_string()))
            .count(self.get_db())
            .await?;
        Ok(count > 0)
    }

    /// Insert a user and its single role row through `conn`
    pub async fn create_with_role<C: ConnectionTrait>(
        conn: &C,
        username: &str,
        email: &str,
        password_hash: String,
        role: UserRole,
    ) -> Result<user::Model, DbErr> {
        let now = Utc::now();
        let user = user::ActiveModel {
            id: Set(Uuid::new_v4()),
            username: Set(username.to_string()),
            email: Set(email.to_string()),
            password_hash: Set(password_hash),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(conn)
        .await?;

        Self::replace_role_with(conn, user.id, role).await?;
        Ok(user)
    }

    /// Drop every role row of the user and assign `role`
    pub async fn replace_role_with<C: ConnectionTrait>(
        conn: &C,
        user_id: Uuid,
        role: UserRole,
    ) -> Result<(), DbErr> {
        user_role::Entity::delete_many()
            .filter(user_role::Column::UserId.eq(user_id))
            .exec(conn)
            .await?;

        user_role::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            role_name: Set(role.to_string()),
            created_at: Set(Utc::now()),
        }
        .insert(conn)
        .await?;
        Ok(())
    }

    /// Remove the user's role rows and then the user; returns users deleted
    pub async fn delete_with_roles<C: ConnectionTrait>(
        conn: &C,
        user_id: Uuid,
    ) -> Result<u64, DbErr> {
        user_role::Entity::delete_many()
            .filter(user_role::Column::UserId.eq(user_id))
            .exec(conn)
            .await?;
        let result = user::Entity::delete_by_id(user_id).exec(conn).await?;
        Ok(result.rows_affected)
    }
}
