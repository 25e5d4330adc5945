//! Historical price chart.

use std::sync::Arc;

use jiff::civil::Date;

use crate::charting::{ChartData, ChartKind, Dataset, SeriesColor};
use crate::error::AppResult;
use crate::external::market::{MarketDataProvider, PricePoint, Timeframe};
use crate::services::company::normalize_ticker;

const CHART_TITLE: &str = "Price Chart";
const CHART_UNIT: &str = "USD";

#[derive(Clone)]
pub struct PriceHistoryService {
    provider: Arc<dyn MarketDataProvider>,
}

impl PriceHistoryService {
    pub fn new(provider: Arc<dyn MarketDataProvider>) -> Self {
        Self { provider }
    }

    /// Price chart for `timeframe` ending today (system time zone).
    pub async fn chart(&self, ticker: &str, timeframe: Timeframe) -> AppResult<ChartData> {
        self.chart_until(ticker, timeframe, jiff::Zoned::now().date())
            .await
    }

    pub async fn chart_until(
        &self,
        ticker: &str,
        timeframe: Timeframe,
        today: Date,
    ) -> AppResult<ChartData> {
        let ticker = normalize_ticker(ticker)?;
        tracing::debug!(ticker = %ticker, timeframe = %timeframe, "Fetching price history");

        let mut points = self
            .provider
            .price_history(&ticker, timeframe, today)
            .await
            .inspect_err(|e| {
                tracing::error!(ticker = %ticker, error = ?e, "Price history fetch failed");
            })?;
        points.sort_by(|a, b| a.date.cmp(&b.date));

        Ok(price_chart(points, timeframe))
    }
}

fn price_chart(points: Vec<PricePoint>, timeframe: Timeframe) -> ChartData {
    let (labels, closes): (Vec<String>, Vec<Option<f64>>) =
        points.into_iter().map(|p| (p.date, Some(p.close))).unzip();

    ChartData {
        labels,
        label: CHART_TITLE.to_string(),
        chart_type: ChartKind::Line,
        datasets: vec![Dataset {
            data: closes,
            label: timeframe.label().to_string(),
            color: SeriesColor::Blue,
        }],
        metric: CHART_UNIT.to_string(),
        stacked: Some(false),
        show_x_axis: Some(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_chart_serializes_flags() {
        let chart = price_chart(
            vec![PricePoint {
                date: "2024-01-02".into(),
                close: 1.0,
            }],
            Timeframe::OneYear,
        );
        let json = serde_json::to_value(&chart).unwrap();
        assert_eq!(json["chartType"], "line");
        assert_eq!(json["showXAxis"], false);
        assert_eq!(json["datasets"][0]["label"], "1 Year");
    }
}
