//! Data Transfer Objects for API requests and responses.
//!
//! DTOs are organized by domain:
//! - `user` - sign-up webhook and user listing
//! - `stock` - followed stocks
//! - `company` - company and price chart query parameters
//! - `health` - health check responses
//! - `error` - common error response

mod company;
mod error;
mod health;
mod stock;
mod user;

pub use company::HistoricalQuery;
pub use error::ErrorResponse;
pub use health::{ComponentHealth, HealthResponse, HealthStatus};
pub use stock::{FollowStockRequest, StockResponse};
pub use user::{SignUpRequest, UserResponse};
