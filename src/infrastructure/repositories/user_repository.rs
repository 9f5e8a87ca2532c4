//! SeaORM implementation of UserRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::{conflict_or_db, now};
use crate::domain::{DomainError, NewUser, UserCredentials, UserPatch, UserProfile, UserRepository};
use crate::models::user::{ActiveModel, Column, Entity as UserEntity, Model};

/// SeaORM-based implementation of UserRepository
pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl From<Model> for UserProfile {
    fn from(u: Model) -> Self {
        Self {
            id: u.id,
            username: u.username,
            email: u.email,
            role: u.role.parse().unwrap_or_default(),
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

const TAKEN: &str = "Username or email is already registered";

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<UserProfile>, DomainError> {
        let user = UserEntity::find_by_id(id).one(&self.db).await?;
        Ok(user.map(UserProfile::from))
    }

    async fn find_credentials(&self, email: &str) -> Result<Option<UserCredentials>, DomainError> {
        let user = UserEntity::find()
            .filter(Column::Email.eq(email.trim().to_lowercase()))
            .one(&self.db)
            .await?;

        Ok(user.map(|u| UserCredentials {
            password_hash: u.password_hash.clone(),
            profile: UserProfile::from(u),
        }))
    }

    async fn list(&self) -> Result<Vec<UserProfile>, DomainError> {
        let users = UserEntity::find()
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await?;
        Ok(users.into_iter().map(UserProfile::from).collect())
    }

    async fn create(&self, user: NewUser) -> Result<UserProfile, DomainError> {
        let now = now();

        let model = ActiveModel {
            username: Set(user.username),
            email: Set(user.email.trim().to_lowercase()),
            password_hash: Set(user.password_hash),
            role: Set(user.role.as_str().to_owned()),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };

        let saved = model
            .insert(&self.db)
            .await
            .map_err(|e| conflict_or_db(e, || TAKEN.to_string()))?;

        tracing::info!("Registered user {} ({})", saved.username, saved.id);
        Ok(UserProfile::from(saved))
    }

    async fn update(&self, id: i32, patch: UserPatch) -> Result<UserProfile, DomainError> {
        let existing = UserEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(DomainError::NotFound("User"))?;

        let mut active: ActiveModel = existing.into();
        if let Some(username) = patch.username {
            active.username = Set(username);
        }
        if let Some(email) = patch.email {
            active.email = Set(email.trim().to_lowercase());
        }
        if let Some(hash) = patch.password_hash {
            active.password_hash = Set(hash);
        }
        if let Some(role) = patch.role {
            active.role = Set(role.as_str().to_owned());
        }
        active.updated_at = Set(now());

        let saved = active
            .update(&self.db)
            .await
            .map_err(|e| conflict_or_db(e, || TAKEN.to_string()))?;
        Ok(UserProfile::from(saved))
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let result = UserEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound("User"));
        }

        Ok(())
    }
}
