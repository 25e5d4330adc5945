mod common;

use axum::http::StatusCode;
use common::{TestApp, body_json, get};

#[tokio::test]
async fn company_snapshot_is_assembled_from_the_provider() {
    let app = TestApp::new();

    let response = app.send(get("/company/msft")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["company"]["ticker"], "MSFT");
    assert_eq!(body["company"]["name"], "Microsoft Corporation");
    assert_eq!(body["technicals"]["52weekHigh"], 468.35);
    assert_eq!(body["technicals"]["wallStreetTargetPrice"], 480.0);
    assert_eq!(body["growthMetrics"]["revenueGrowthYoY"], 25.0);
    assert_eq!(body["companyInformation"]["headquarters"], "Redmond, WA, US");
    assert!(!body["quarterly"].as_array().unwrap().is_empty());
    assert_eq!(
        body["quarterly"].as_array().unwrap().len(),
        body["yearly"].as_array().unwrap().len()
    );
    assert_eq!(
        body["ownership"]["institutionalOwners"][0]["name"],
        "Vanguard Group Inc"
    );
}

#[tokio::test]
async fn provider_failure_is_an_opaque_500() {
    let app = TestApp::failing_provider();

    let response = app.send(get("/company/MSFT")).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.headers().contains_key("x-request-id"));

    let body = body_json(response).await;
    assert_eq!(body["code"], "UPSTREAM_ERROR");
    assert!(!body["message"].as_str().unwrap().contains("429"));
    assert!(body["request_id"].is_string());
}

#[tokio::test]
async fn invalid_ticker_is_rejected() {
    let app = TestApp::new();
    let response = app.send(get("/company/not%20a%20ticker")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn price_chart_defaults_to_one_year() {
    let app = TestApp::new();

    let response = app.send(get("/historical-price-chart/MSFT")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["label"], "Price Chart");
    assert_eq!(body["chartType"], "line");
    assert_eq!(body["metric"], "USD");
    assert_eq!(body["stacked"], false);
    assert_eq!(body["showXAxis"], false);
    assert_eq!(body["datasets"][0]["label"], "1 Year");
    assert_eq!(body["datasets"][0]["data"], serde_json::json!([400.0, 420.0]));

    let labels = body["labels"].as_array().unwrap();
    assert!(labels[0].as_str().unwrap() < labels[1].as_str().unwrap());
}

#[tokio::test]
async fn price_chart_honours_timeframe() {
    let app = TestApp::new();
    let response = app
        .send(get("/historical-price-chart/MSFT?timeframe=ytd"))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["datasets"][0]["label"], "Year to Date");
}

#[tokio::test]
async fn unknown_timeframe_is_bad_request() {
    let app = TestApp::new();
    let response = app
        .send(get("/historical-price-chart/MSFT?timeframe=10y"))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["code"], "BAD_REQUEST");
    assert!(body["message"].as_str().unwrap().contains("10y"));
}
