//! Service layer for business logic operations.
//!
//! Services encapsulate business logic and coordinate between
//! repositories, market data providers and handlers.

pub mod company;
mod followed_stock_service;
mod price_history_service;
mod user_service;

pub use company::{CompanyService, CompanySnapshot};
pub use followed_stock_service::{FollowRequest, FollowedStockService};
pub use price_history_service::PriceHistoryService;
pub use user_service::UserService;

use std::sync::Arc;

use crate::external::MarketDataProvider;
use crate::repositories::Repositories;

/// Aggregates all services for convenient access.
///
/// Cloning is cheap: every service holds `Arc`s.
#[derive(Clone)]
pub struct Services {
    pub users: UserService,
    pub followed_stocks: FollowedStockService,
    pub companies: CompanyService,
    pub price_history: PriceHistoryService,
}

impl Services {
    pub fn new(repos: Repositories, provider: Arc<dyn MarketDataProvider>) -> Self {
        Self {
            users: UserService::new(repos.users.clone()),
            followed_stocks: FollowedStockService::new(repos.users, repos.stocks),
            companies: CompanyService::new(provider.clone()),
            price_history: PriceHistoryService::new(provider),
        }
    }
}
