//! In-process store implementing both repository traits.
//!
//! Mirrors the table constraints of the PostgreSQL schema: unique user id and
//! clerk id, and a foreign key from stocks to users. Used by the router and
//! service tests.

use std::sync::Mutex;

use async_trait::async_trait;
use jiff_diesel::ToDiesel;

use crate::error::AppError;
use crate::models::{NewStock, NewUser, Stock, User};
use crate::repositories::{StockRepository, UserRepository};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    stocks: Vec<Stock>,
    next_stock_id: i32,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_tables<T>(&self, f: impl FnOnce(&mut Tables) -> Result<T, AppError>) -> Result<T, AppError> {
        let mut guard = self.tables.lock().map_err(|_| AppError::Internal {
            source: anyhow::anyhow!("memory store lock poisoned"),
        })?;
        f(&mut *guard)
    }

    /// Number of stored stock rows across all users.
    pub fn stock_count(&self) -> usize {
        self.tables.lock().map(|t| t.stocks.len()).unwrap_or(0)
    }
}

fn duplicate(field: &str, value: &str) -> AppError {
    AppError::Duplicate {
        entity: "users".to_string(),
        field: field.to_string(),
        value: value.to_string(),
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        self.with_tables(|t| {
            if t.users.iter().any(|u| u.id == new_user.id) {
                return Err(duplicate("id", &new_user.id));
            }
            if t.users.iter().any(|u| u.clerk_id == new_user.clerk_id) {
                return Err(duplicate("clerk_id", &new_user.clerk_id));
            }
            let user = User {
                id: new_user.id,
                clerk_id: new_user.clerk_id,
                email: new_user.email,
                created_at: jiff::Timestamp::now().to_diesel(),
            };
            t.users.push(user.clone());
            Ok(user)
        })
    }

    async fn find_by_clerk_id(&self, clerk: &str) -> Result<Option<User>, AppError> {
        self.with_tables(|t| Ok(t.users.iter().find(|u| u.clerk_id == clerk).cloned()))
    }

    async fn list_all(&self) -> Result<Vec<User>, AppError> {
        self.with_tables(|t| Ok(t.users.clone()))
    }
}

#[async_trait]
impl StockRepository for MemoryStore {
    async fn create(&self, new_stock: NewStock) -> Result<Stock, AppError> {
        self.with_tables(|t| {
            if !t.users.iter().any(|u| u.id == new_stock.user_id) {
                return Err(AppError::Validation {
                    field: "user_id".to_string(),
                    reason: format!(
                        "Invalid reference from stocks with value '{}'",
                        new_stock.user_id
                    ),
                });
            }
            t.next_stock_id += 1;
            let stock = Stock {
                id: t.next_stock_id,
                company_name: new_stock.company_name,
                ticker: new_stock.ticker,
                logo_url: new_stock.logo_url,
                user_id: new_stock.user_id,
                created_at: jiff::Timestamp::now().to_diesel(),
            };
            t.stocks.push(stock.clone());
            Ok(stock)
        })
    }

    async fn list_by_user(&self, owner: &str) -> Result<Vec<Stock>, AppError> {
        self.with_tables(|t| {
            Ok(t.stocks.iter().filter(|s| s.user_id == owner).cloned().collect())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(id: &str, clerk: &str) -> NewUser {
        NewUser {
            id: id.into(),
            clerk_id: clerk.into(),
            email: format!("{id}@example.com"),
        }
    }

    fn new_stock(owner: &str, ticker: &str) -> NewStock {
        NewStock {
            company_name: format!("{ticker} Inc."),
            ticker: ticker.into(),
            logo_url: format!("https://logo.example/{ticker}.png"),
            user_id: owner.into(),
        }
    }

    #[tokio::test]
    async fn test_duplicate_clerk_id_is_rejected() {
        let store = MemoryStore::new();
        UserRepository::create(&store, new_user("u1", "clerk_1")).await.unwrap();
        let err = UserRepository::create(&store, new_user("u2", "clerk_1"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Duplicate { ref field, .. } if field == "clerk_id"));
    }

    #[tokio::test]
    async fn test_stock_requires_existing_user() {
        let store = MemoryStore::new();
        let err = StockRepository::create(&store, new_stock("ghost", "AAPL"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
        assert_eq!(store.stock_count(), 0);
    }

    #[tokio::test]
    async fn test_stocks_are_listed_per_user_in_insertion_order() {
        let store = MemoryStore::new();
        UserRepository::create(&store, new_user("u1", "c1")).await.unwrap();
        UserRepository::create(&store, new_user("u2", "c2")).await.unwrap();
        StockRepository::create(&store, new_stock("u1", "AAPL")).await.unwrap();
        StockRepository::create(&store, new_stock("u2", "MSFT")).await.unwrap();
        StockRepository::create(&store, new_stock("u1", "NVDA")).await.unwrap();

        let tickers: Vec<String> = store
            .list_by_user("u1")
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.ticker)
            .collect();
        assert_eq!(tickers, vec!["AAPL", "NVDA"]);
    }

    #[tokio::test]
    async fn test_find_by_clerk_id() {
        let store = MemoryStore::new();
        UserRepository::create(&store, new_user("u1", "c1")).await.unwrap();
        assert_eq!(store.find_by_clerk_id("c1").await.unwrap().unwrap().id, "u1");
        assert!(store.find_by_clerk_id("c9").await.unwrap().is_none());
    }
}
