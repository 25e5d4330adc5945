mod common;

use axum::http::StatusCode;
use common::{TestApp, body_json, get, get_with_token, post_json, token_for};
use serde_json::json;

const PATH: &str = "/user/followed-stocks";

fn apple() -> serde_json::Value {
    json!({
        "companyName": "Apple Inc.",
        "ticker": "AAPL",
        "logoUrl": "https://images.financialmodelingprep.com/symbol/AAPL.png"
    })
}

#[tokio::test]
async fn missing_token_is_unauthorized() {
    let app = TestApp::new();

    let response = app.send(get(PATH)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn garbage_token_is_unauthorized() {
    let app = TestApp::new();
    let response = app.send(get_with_token(PATH, "abc.def.ghi")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unknown_user_is_not_found() {
    let app = TestApp::new();
    let token = token_for("clerk_ghost");

    let response = app.send(get_with_token(PATH, &token)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

#[tokio::test]
async fn follow_for_unknown_user_inserts_nothing() {
    let app = TestApp::new();
    let token = token_for("clerk_ghost");

    let response = app.send(post_json(PATH, apple(), Some(&token))).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(app.store.stock_count(), 0);
}

#[tokio::test]
async fn follow_then_list() {
    let app = TestApp::new();
    app.seed_user("user_1", "clerk_1").await;
    let token = token_for("clerk_1");

    let response = app.send(post_json(PATH, apple(), Some(&token))).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["ticker"], "AAPL");
    assert_eq!(created["userId"], "user_1");

    let response = app.send(get_with_token(PATH, &token)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let listed = body_json(response).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["companyName"], "Apple Inc.");
}

#[tokio::test]
async fn stocks_are_scoped_to_the_caller() {
    let app = TestApp::new();
    app.seed_user("user_1", "clerk_1").await;
    app.seed_user("user_2", "clerk_2").await;

    app.send(post_json(PATH, apple(), Some(&token_for("clerk_1"))))
        .await;

    let listed = body_json(app.send(get_with_token(PATH, &token_for("clerk_2"))).await).await;
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn invalid_body_is_rejected_after_auth() {
    let app = TestApp::new();
    app.seed_user("user_1", "clerk_1").await;

    let response = app
        .send(post_json(
            PATH,
            json!({"companyName": "", "ticker": "AAPL", "logoUrl": "x"}),
            Some(&token_for("clerk_1")),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(app.store.stock_count(), 0);
}
