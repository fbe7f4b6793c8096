//! User repository implementation.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, SqlErr,
};

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use crate::domain::{Entitlement, NewUser, User};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Head counts of non-admin accounts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CustomerCounts {
    pub total: u64,
    /// Accounts whose entitlement is open right now
    pub active: u64,
}

/// User repository trait for dependency injection.
///
/// Emails are passed already normalized.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Point lookup by primary key
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>>;

    /// Lookup by email address
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Insert a new account; a duplicate email yields `Conflict`
    async fn create(&self, user: NewUser) -> AppResult<User>;

    /// Replace the entitlement of an account
    async fn set_entitlement(&self, id: i32, entitlement: Entitlement) -> AppResult<User>;

    /// Non-admin accounts, newest first
    async fn list_customers(&self) -> AppResult<Vec<User>>;

    /// Count non-admin accounts, and those with open access at `now`
    async fn count_customers(&self, now: DateTime<Utc>) -> AppResult<CustomerCounts>;
}

/// Concrete implementation of UserRepository
pub struct UserStore {
    db: Arc<DatabaseConnection>,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(self.db.as_ref())
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn create(&self, new_user: NewUser) -> AppResult<User> {
        let active_model = ActiveModel {
            email: Set(new_user.email),
            password_hash: Set(new_user.password_hash),
            is_admin: Set(new_user.is_admin),
            has_access: Set(new_user.has_access),
            access_until: Set(None),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        let model = active_model.insert(self.db.as_ref()).await.map_err(|e| {
            // Lost a race with a concurrent registration of the same email
            if let Some(SqlErr::UniqueConstraintViolation(_)) = e.sql_err() {
                AppError::conflict("An account with this email")
            } else {
                AppError::from(e)
            }
        })?;
        Ok(User::from(model))
    }

    async fn set_entitlement(&self, id: i32, entitlement: Entitlement) -> AppResult<User> {
        let user = UserEntity::find_by_id(id)
            .one(self.db.as_ref())
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = user.into();
        active.has_access = Set(entitlement.has_access);
        active.access_until = Set(entitlement.access_until);

        let model = active.update(self.db.as_ref()).await.map_err(AppError::from)?;
        Ok(User::from(model))
    }

    async fn list_customers(&self) -> AppResult<Vec<User>> {
        let models = UserEntity::find()
            .filter(user::Column::IsAdmin.eq(false))
            .order_by_desc(user::Column::CreatedAt)
            .order_by_desc(user::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(User::from).collect())
    }

    async fn count_customers(&self, now: DateTime<Utc>) -> AppResult<CustomerCounts> {
        let total = UserEntity::find()
            .filter(user::Column::IsAdmin.eq(false))
            .count(self.db.as_ref())
            .await?;

        let active = UserEntity::find()
            .filter(user::Column::IsAdmin.eq(false))
            .filter(user::Column::HasAccess.eq(true))
            .filter(
                Condition::any()
                    .add(user::Column::AccessUntil.is_null())
                    .add(user::Column::AccessUntil.gte(now)),
            )
            .count(self.db.as_ref())
            .await?;

        Ok(CustomerCounts { total, active })
    }
}
