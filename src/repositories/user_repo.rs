//! User repository for async database operations.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::AppError;
use crate::models::{NewUser, User};

/// Storage for signed-up users.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts a user. A reused `id` or `clerk_id` yields `AppError::Duplicate`.
    async fn create(&self, new_user: NewUser) -> Result<User, AppError>;

    /// Finds a user by the identity provider subject.
    async fn find_by_clerk_id(&self, clerk: &str) -> Result<Option<User>, AppError>;

    /// Lists every user, oldest first.
    async fn list_all(&self) -> Result<Vec<User>, AppError>;
}

/// PostgreSQL-backed [`UserRepository`].
///
/// Since `AsyncDbPool` (bb8::Pool) internally uses `Arc`, cloning is cheap.
#[derive(Clone)]
pub struct PgUserRepository {
    pool: AsyncDbPool,
}

impl PgUserRepository {
    /// Creates a new PgUserRepository with the given connection pool.
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        use crate::schema::users::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::insert_into(users)
            .values(&new_user)
            .returning(User::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    async fn find_by_clerk_id(&self, clerk: &str) -> Result<Option<User>, AppError> {
        use crate::schema::users::dsl::*;
        let mut conn = self.pool.get().await?;

        users
            .filter(clerk_id.eq(clerk))
            .select(User::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    async fn list_all(&self) -> Result<Vec<User>, AppError> {
        use crate::schema::users::dsl::*;
        let mut conn = self.pool.get().await?;

        users
            .order(created_at.asc())
            .select(User::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }
}
