//! Followed-stock DTOs.

use crate::models::Stock;
use crate::services::FollowRequest;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FollowStockRequest {
    #[validate(length(min = 1, message = "companyName must not be empty"))]
    #[schema(example = "Apple Inc.")]
    pub company_name: String,
    #[validate(length(min = 1, max = 12, message = "ticker must be between 1 and 12 characters"))]
    #[schema(example = "AAPL")]
    pub ticker: String,
    #[validate(length(min = 1, message = "logoUrl must not be empty"))]
    #[schema(example = "https://images.financialmodelingprep.com/symbol/AAPL.png")]
    pub logo_url: String,
}

impl From<FollowStockRequest> for FollowRequest {
    fn from(req: FollowStockRequest) -> Self {
        FollowRequest {
            company_name: req.company_name,
            ticker: req.ticker,
            logo_url: req.logo_url,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StockResponse {
    pub id: i32,
    pub company_name: String,
    pub ticker: String,
    pub logo_url: String,
    pub user_id: String,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: String,
}

impl From<Stock> for StockResponse {
    fn from(stock: Stock) -> Self {
        Self {
            id: stock.id,
            company_name: stock.company_name,
            ticker: stock.ticker,
            logo_url: stock.logo_url,
            user_id: stock.user_id,
            created_at: stock.created_at.to_jiff().to_string(),
        }
    }
}
