//! Watchlist of the authenticated user.

use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::models::{NewStock, Stock, User};
use crate::repositories::{StockRepository, UserRepository};

/// A stock to follow, before it is attached to a user.
#[derive(Debug, Clone)]
pub struct FollowRequest {
    pub company_name: String,
    pub ticker: String,
    pub logo_url: String,
}

#[derive(Clone)]
pub struct FollowedStockService {
    users: Arc<dyn UserRepository>,
    stocks: Arc<dyn StockRepository>,
}

impl FollowedStockService {
    pub fn new(users: Arc<dyn UserRepository>, stocks: Arc<dyn StockRepository>) -> Self {
        Self { users, stocks }
    }

    async fn resolve_user(&self, clerk_id: &str) -> AppResult<User> {
        self.users
            .find_by_clerk_id(clerk_id)
            .await?
            .ok_or_else(|| AppError::not_found("user", "clerk_id", clerk_id))
    }

    /// Stocks followed by the user behind `clerk_id`.
    pub async fn list(&self, clerk_id: &str) -> AppResult<Vec<Stock>> {
        let user = self.resolve_user(clerk_id).await?;
        self.stocks.list_by_user(&user.id).await
    }

    /// Adds a followed stock. The user is resolved first, so an unknown
    /// clerk id inserts nothing.
    pub async fn follow(&self, clerk_id: &str, request: FollowRequest) -> AppResult<Stock> {
        let user = self.resolve_user(clerk_id).await?;
        let stock = self
            .stocks
            .create(NewStock {
                company_name: request.company_name,
                ticker: request.ticker,
                logo_url: request.logo_url,
                user_id: user.id,
            })
            .await?;
        tracing::info!(stock_id = stock.id, ticker = %stock.ticker, user_id = %stock.user_id, "Stock followed");
        Ok(stock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewUser;
    use crate::repositories::MemoryStore;

    fn request(ticker: &str) -> FollowRequest {
        FollowRequest {
            company_name: format!("{ticker} Corp"),
            ticker: ticker.into(),
            logo_url: format!("https://logo.example/{ticker}.png"),
        }
    }

    async fn service_with_user() -> (FollowedStockService, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        UserRepository::create(
            store.as_ref(),
            NewUser {
                id: "user_1".into(),
                clerk_id: "clerk_1".into(),
                email: "a@example.com".into(),
            },
        )
        .await
        .unwrap();
        (FollowedStockService::new(store.clone(), store.clone()), store)
    }

    #[tokio::test]
    async fn test_unknown_clerk_id_is_not_found_and_inserts_nothing() {
        let (service, store) = service_with_user().await;
        let err = service.follow("clerk_unknown", request("AAPL")).await.unwrap_err();

        match err {
            AppError::NotFound { entity, field, value } => {
                assert_eq!(entity, "user");
                assert_eq!(field, "clerk_id");
                assert_eq!(value, "clerk_unknown");
            }
            other => panic!("expected NotFound, got {:?}", other),
        }
        assert_eq!(store.stock_count(), 0);
    }

    #[tokio::test]
    async fn test_follow_then_list() {
        let (service, _) = service_with_user().await;
        let stock = service.follow("clerk_1", request("MSFT")).await.unwrap();
        assert_eq!(stock.user_id, "user_1");

        let listed = service.list("clerk_1").await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].ticker, "MSFT");
    }

    #[tokio::test]
    async fn test_list_for_unknown_user_is_not_found() {
        let (service, _) = service_with_user().await;
        assert!(matches!(
            service.list("nobody").await,
            Err(AppError::NotFound { .. })
        ));
    }
}
