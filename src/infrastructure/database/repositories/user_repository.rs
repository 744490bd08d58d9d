//! SeaORM implementation of UserRepositoryInterface

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};
use tracing::debug;

use crate::domain::{CreateUserDto, DomainError, DomainResult, User, UserRepositoryInterface};
use crate::infrastructure::database::entities::user;

pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn user_model_to_domain(model: user::Model) -> User {
    User {
        id: model.id,
        username: model.username,
        email: model.email,
        first_name: model.first_name,
        last_name: model.last_name,
        password_hash: model.password_hash,
        is_staff: model.is_staff,
        is_active: model.is_active,
        date_joined: model.date_joined,
        last_login: model.last_login,
    }
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl UserRepositoryInterface for UserRepository {
    async fn create_user(&self, dto: CreateUserDto) -> DomainResult<User> {
        debug!(username = %dto.username, "Inserting user");

        let new_user = user::ActiveModel {
            username: Set(dto.username),
            email: Set(dto.email),
            first_name: Set(dto.first_name),
            last_name: Set(dto.last_name),
            password_hash: Set(dto.password_hash),
            is_staff: Set(dto.is_staff),
            is_active: Set(true),
            date_joined: Set(Utc::now()),
            last_login: Set(None),
            ..Default::default()
        };

        let model = new_user.insert(&self.db).await?;
        Ok(user_model_to_domain(model))
    }

    async fn get_user_by_username(&self, username: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await?;

        Ok(model.map(user_model_to_domain))
    }

    async fn get_user_by_id(&self, id: i32) -> DomainResult<Option<User>> {
        let model = user::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(user_model_to_domain))
    }

    async fn count_users(&self) -> DomainResult<u64> {
        Ok(user::Entity::find().count(&self.db).await?)
    }

    async fn touch_last_login(&self, id: i32) -> DomainResult<()> {
        let Some(existing) = user::Entity::find_by_id(id).one(&self.db).await? else {
            return Err(DomainError::not_found("User", "id", id));
        };

        let mut active: user::ActiveModel = existing.into();
        active.last_login = Set(Some(Utc::now()));
        active.update(&self.db).await?;

        Ok(())
    }
}
