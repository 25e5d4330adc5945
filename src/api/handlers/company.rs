//! Company snapshot and price chart handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::COMPANY_TAG;
use crate::api::dto::{ErrorResponse, HistoricalQuery};
use crate::charting::ChartData;
use crate::error::AppResult;
use crate::services::CompanySnapshot;
use crate::state::AppState;

pub fn company_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(get_company))
        .routes(routes!(get_price_chart))
}

/// GET /company/{ticker} - Aggregated company snapshot
///
/// Profile, valuation, statement charts and ownership in one payload.
#[utoipa::path(
    get,
    path = "/company/{ticker}",
    tag = COMPANY_TAG,
    params(
        ("ticker" = String, Path, description = "Ticker symbol, e.g. AAPL")
    ),
    responses(
        (status = 200, description = "Company snapshot", body = CompanySnapshot),
        (status = 400, description = "Invalid ticker", body = ErrorResponse),
        (status = 500, description = "Market data provider failure", body = ErrorResponse)
    )
)]
async fn get_company(
    State(state): State<AppState>,
    Path(ticker): Path<String>,
) -> AppResult<Json<CompanySnapshot>> {
    let snapshot = state.services.companies.snapshot(&ticker).await?;
    Ok(Json(snapshot))
}

/// GET /historical-price-chart/{ticker} - Closing prices as a line chart
#[utoipa::path(
    get,
    path = "/historical-price-chart/{ticker}",
    tag = COMPANY_TAG,
    params(
        ("ticker" = String, Path, description = "Ticker symbol, e.g. AAPL"),
        HistoricalQuery
    ),
    responses(
        (status = 200, description = "Price chart", body = ChartData),
        (status = 400, description = "Invalid ticker or timeframe", body = ErrorResponse),
        (status = 500, description = "Market data provider failure", body = ErrorResponse)
    )
)]
async fn get_price_chart(
    State(state): State<AppState>,
    Path(ticker): Path<String>,
    Query(query): Query<HistoricalQuery>,
) -> AppResult<Json<ChartData>> {
    let timeframe = query.timeframe()?;
    let chart = state.services.price_history.chart(&ticker, timeframe).await?;
    Ok(Json(chart))
}
