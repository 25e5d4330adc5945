mod common;

use axum::http::StatusCode;
use common::{TestApp, body_json, get, post_json};
use serde_json::json;

fn sign_up(id: &str, clerk_id: &str, email: &str) -> axum::http::Request<axum::body::Body> {
    post_json(
        "/users/user-signed-up",
        json!({"id": id, "clerkId": clerk_id, "email": email}),
        None,
    )
}

#[tokio::test]
async fn sign_up_creates_user() {
    let app = TestApp::new();

    let response = app
        .send(sign_up("user_1", "clerk_1", "ada@example.com"))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["id"], "user_1");
    assert_eq!(body["clerkId"], "clerk_1");
    assert_eq!(body["email"], "ada@example.com");
    assert!(body["createdAt"].is_string());

    let listed = body_json(app.send(get("/users")).await).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn duplicate_sign_up_is_conflict() {
    let app = TestApp::new();
    app.send(sign_up("user_1", "clerk_1", "ada@example.com"))
        .await;

    let response = app
        .send(sign_up("user_1", "clerk_1", "ada@example.com"))
        .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "DUPLICATE");
}

#[tokio::test]
async fn invalid_email_is_validation_error() {
    let app = TestApp::new();

    let response = app.send(sign_up("user_1", "clerk_1", "not-an-email")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
    assert!(body_json(app.send(get("/users")).await).await.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn missing_field_is_bad_request() {
    let app = TestApp::new();

    let response = app
        .send(post_json(
            "/users/user-signed-up",
            json!({"id": "user_1", "email": "ada@example.com"}),
            None,
        ))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn list_users_starts_empty() {
    let app = TestApp::new();
    let response = app.send(get("/users")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));
}
