//! User sign-up and listing handlers.

use axum::{Json, extract::State, http::StatusCode};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::USER_TAG;
use crate::api::dto::{ErrorResponse, SignUpRequest, UserResponse};
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::ValidatedJson;

/// Creates user-related routes.
///
/// Routes:
/// - GET /users                 - List all users
/// - POST /users/user-signed-up - Record a user created by the identity provider
pub fn user_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_users))
        .routes(routes!(user_signed_up))
}

/// GET /users - List all users
#[utoipa::path(
    get,
    path = "/users",
    tag = USER_TAG,
    responses(
        (status = 200, description = "All users, oldest first", body = Vec<UserResponse>)
    )
)]
async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<UserResponse>>> {
    let users = state.services.users.list_users().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// POST /users/user-signed-up - Sign-up webhook
#[utoipa::path(
    post,
    path = "/users/user-signed-up",
    tag = USER_TAG,
    request_body = SignUpRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 409, description = "User already exists", body = ErrorResponse)
    )
)]
async fn user_signed_up(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<SignUpRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let user = state.services.users.create_user(req.into_new_user()).await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}
