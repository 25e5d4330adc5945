//! Repository layer for data access operations.
//!
//! Each repository is a trait with a PostgreSQL implementation and an
//! in-memory one sharing the same constraint semantics.

pub mod memory;
mod stock_repo;
mod user_repo;

pub use memory::MemoryStore;
pub use stock_repo::{PgStockRepository, StockRepository};
pub use user_repo::{PgUserRepository, UserRepository};

use std::sync::Arc;

use crate::db::AsyncDbPool;

/// Aggregates all repositories for convenient access.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub stocks: Arc<dyn StockRepository>,
}

impl Repositories {
    /// Creates PostgreSQL repositories sharing one pool.
    pub fn new(pool: AsyncDbPool) -> Self {
        Self {
            users: Arc::new(PgUserRepository::new(pool.clone())),
            stocks: Arc::new(PgStockRepository::new(pool)),
        }
    }

    /// Creates repositories backed by a single [`MemoryStore`].
    pub fn from_store(store: Arc<MemoryStore>) -> Self {
        Self {
            users: store.clone(),
            stocks: store,
        }
    }
}
