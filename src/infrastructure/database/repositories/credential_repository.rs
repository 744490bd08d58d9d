//! SeaORM implementation of CredentialRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use crate::domain::{AuthToken, CredentialRepository, DomainResult, Session};
use crate::infrastructure::database::entities::{session, token};

pub struct SeaOrmCredentialRepository {
    db: DatabaseConnection,
}

impl SeaOrmCredentialRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn token_to_domain(m: token::Model) -> AuthToken {
    AuthToken {
        key: m.key,
        user_id: m.user_id,
        created: m.created,
    }
}

fn session_to_domain(m: session::Model) -> Session {
    Session {
        key_hash: m.key_hash,
        user_id: m.user_id,
        created_at: m.created_at,
        expires_at: m.expires_at,
    }
}

#[async_trait]
impl CredentialRepository for SeaOrmCredentialRepository {
    async fn find_token(&self, key: &str) -> DomainResult<Option<AuthToken>> {
        let model = token::Entity::find_by_id(key.to_string())
            .one(&self.db)
            .await?;
        Ok(model.map(token_to_domain))
    }

    async fn find_token_for_user(&self, user_id: i32) -> DomainResult<Option<AuthToken>> {
        let model = token::Entity::find()
            .filter(token::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?;
        Ok(model.map(token_to_domain))
    }

    async fn create_token(&self, user_id: i32, key: &str) -> DomainResult<AuthToken> {
        let model = token::ActiveModel {
            key: Set(key.to_string()),
            user_id: Set(user_id),
            created: Set(Utc::now()),
        };
        let model = model.insert(&self.db).await?;
        Ok(token_to_domain(model))
    }

    async fn create_session(&self, s: Session) -> DomainResult<()> {
        let model = session::ActiveModel {
            key_hash: Set(s.key_hash),
            user_id: Set(s.user_id),
            created_at: Set(s.created_at),
            expires_at: Set(s.expires_at),
        };
        model.insert(&self.db).await?;
        Ok(())
    }

    async fn find_session(&self, key_hash: &str) -> DomainResult<Option<Session>> {
        let model = session::Entity::find_by_id(key_hash.to_string())
            .one(&self.db)
            .await?;
        Ok(model.map(session_to_domain))
    }

    async fn delete_session(&self, key_hash: &str) -> DomainResult<bool> {
        let result = session::Entity::delete_by_id(key_hash.to_string())
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    async fn delete_expired_sessions(&self, now: DateTime<Utc>) -> DomainResult<u64> {
        let result = session::Entity::delete_many()
            .filter(session::Column::ExpiresAt.lte(now))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected)
    }
}
