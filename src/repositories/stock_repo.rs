//! Followed-stock repository.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::AppError;
use crate::models::{NewStock, Stock};

#[async_trait]
pub trait StockRepository: Send + Sync {
    /// Inserts a followed stock. The owning user must already exist.
    async fn create(&self, new_stock: NewStock) -> Result<Stock, AppError>;

    /// Stocks followed by the user with primary key `owner`, in insertion order.
    async fn list_by_user(&self, owner: &str) -> Result<Vec<Stock>, AppError>;
}

#[derive(Clone)]
pub struct PgStockRepository {
    pool: AsyncDbPool,
}

impl PgStockRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StockRepository for PgStockRepository {
    async fn create(&self, new_stock: NewStock) -> Result<Stock, AppError> {
        use crate::schema::stocks::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::insert_into(stocks)
            .values(&new_stock)
            .returning(Stock::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    async fn list_by_user(&self, owner: &str) -> Result<Vec<Stock>, AppError> {
        use crate::schema::stocks::dsl::*;
        let mut conn = self.pool.get().await?;

        stocks
            .filter(user_id.eq(owner))
            .order(id.asc())
            .select(Stock::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }
}
