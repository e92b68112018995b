//! User repository: the persistence seam behind the HTTP routes.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set, SqlErr,
};

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use common::{AppError, AppResult, OptionExt};
use domain::{CreateUser, Password, UpdateUser, User, UserId};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

const ENTITY: &str = "User";

/// User repository trait for dependency injection.
///
/// Lookups report a missing row as `AppError::NotFound`.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Store a new user; the store assigns the id and hashes the password
    async fn create(&self, input: CreateUser) -> AppResult<User>;

    /// List every user, ordered by id
    async fn get_all(&self) -> AppResult<Vec<User>>;

    /// Find a user by its unique username
    async fn get_by_username(&self, username: &str) -> AppResult<User>;

    /// Find a user by id
    async fn get_one(&self, id: UserId) -> AppResult<User>;

    /// Replace the profile fields of a user
    async fn update(&self, id: UserId, changes: UpdateUser) -> AppResult<User>;

    /// Permanently delete a user
    async fn delete(&self, id: UserId) -> AppResult<()>;
}

/// PostgreSQL implementation of `UserRepository`
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn create(&self, input: CreateUser) -> AppResult<User> {
        let password = Password::new(&input.password)?;
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: NotSet,
            username: Set(input.username),
            password_hash: Set(password.into_string()),
            first_name: Set(input.first_name),
            last_name: Set(input.last_name),
            email: Set(input.email),
            picture: Set(input.picture),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await.map_err(map_write_error)?;
        tracing::info!(user_id = model.id, username = %model.username, "Created user");

        Ok(User::from(model))
    }

    async fn get_all(&self) -> AppResult<Vec<User>> {
        let models = UserEntity::find()
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(User::from).collect())
    }

    async fn get_by_username(&self, username: &str) -> AppResult<User> {
        let model = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(AppError::from)?
            .ok_or_not_found(ENTITY)?;

        Ok(User::from(model))
    }

    async fn get_one(&self, id: UserId) -> AppResult<User> {
        let model = UserEntity::find_by_id(to_key(id)?)
            .one(&self.db)
            .await
            .map_err(AppError::from)?
            .ok_or_not_found(ENTITY)?;

        Ok(User::from(model))
    }

    async fn update(&self, id: UserId, changes: UpdateUser) -> AppResult<User> {
        let model = UserEntity::find_by_id(to_key(id)?)
            .one(&self.db)
            .await?
            .ok_or_not_found(ENTITY)?;

        let mut active: ActiveModel = model.into();
        active.first_name = Set(changes.first_name);
        active.last_name = Set(changes.last_name);
        active.email = Set(changes.email);
        active.picture = Set(changes.picture);
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(User::from(model))
    }

    async fn delete(&self, id: UserId) -> AppResult<()> {
        let result = UserEntity::delete_by_id(to_key(id)?)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found(ENTITY));
        }

        tracing::info!(user_id = id, "Deleted user");
        Ok(())
    }
}

/// Convert a public id into the `BIGINT` key. Ids past `i64::MAX` cannot be stored.
fn to_key(id: UserId) -> AppResult<i64> {
    i64::try_from(id).map_err(|_| AppError::not_found(ENTITY))
}

/// Map a failed insert, surfacing username collisions as a conflict.
fn map_write_error(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::conflict("Username"),
        _ => AppError::from(err),
    }
}
