//! SeaORM implementation of UserRepository

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use crate::auth::{generate_salt, hash_password};
use crate::domain::{Credentials, DomainError, UserRepository};
use crate::models::user::{ActiveModel, Column, Entity as UserEntity};
use crate::models::User;

/// SeaORM-based implementation of UserRepository
pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn create(&self, username: &str, password: &str) -> Result<User, DomainError> {
        let salt = generate_salt();
        let password_hash = hash_password(password, &salt);

        // No existence pre-check: the UNIQUE constraint decides, and its
        // violation maps to DuplicateUser. Two concurrent registrations of
        // the same name cannot both succeed.
        let user = ActiveModel {
            username: Set(username.to_string()),
            password_hash: Set(password_hash),
            salt: Set(salt),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        };

        let model = user.insert(&self.db).await?;
        Ok(User::from(model))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Credentials>, DomainError> {
        let user = UserEntity::find()
            .filter(Column::Username.eq(username))
            .one(&self.db)
            .await?;

        Ok(user.map(|u| Credentials {
            username: u.username,
            password_hash: u.password_hash,
            salt: u.salt,
        }))
    }
}
