//! Watchlist endpoints for the authenticated user.

use axum::{Json, extract::State, http::StatusCode, middleware};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::STOCK_TAG;
use crate::api::dto::{ErrorResponse, FollowStockRequest, StockResponse};
use crate::api::middleware::{AuthUser, auth_middleware};
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::ValidatedJson;

/// Creates the followed-stocks routes.
///
/// # Authentication
/// Every route sits behind [`auth_middleware`]; the token subject selects
/// the user.
pub fn followed_stock_routes(state: AppState) -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_followed_stocks, follow_stock))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// GET /user/followed-stocks - Stocks followed by the caller
#[utoipa::path(
    get,
    path = "/user/followed-stocks",
    tag = STOCK_TAG,
    responses(
        (status = 200, description = "Followed stocks", body = Vec<StockResponse>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "No user for the token subject", body = ErrorResponse)
    ),
    security(
        ("bearerAuth" = [])
    )
)]
async fn list_followed_stocks(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<Vec<StockResponse>>> {
    let stocks = state.services.followed_stocks.list(&auth_user.clerk_id).await?;
    Ok(Json(stocks.into_iter().map(StockResponse::from).collect()))
}

/// POST /user/followed-stocks - Follow a stock
#[utoipa::path(
    post,
    path = "/user/followed-stocks",
    tag = STOCK_TAG,
    request_body = FollowStockRequest,
    responses(
        (status = 201, description = "Stock followed", body = StockResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "No user for the token subject", body = ErrorResponse)
    ),
    security(
        ("bearerAuth" = [])
    )
)]
async fn follow_stock(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(req): ValidatedJson<FollowStockRequest>,
) -> AppResult<(StatusCode, Json<StockResponse>)> {
    let stock = state
        .services
        .followed_stocks
        .follow(&auth_user.clerk_id, req.into())
        .await?;
    Ok((StatusCode::CREATED, Json(StockResponse::from(stock))))
}
