//! User routes
//!
//! Registration and login. Both are public.

use super::ApiJson;
use crate::error::ApiResult;
use crate::services::UserService;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use blog_shared::{AccessToken, LoginRequest, MessageResponse, RegisterRequest};

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

/// Register a new user
///
/// POST /users/register
async fn register(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    UserService::register(state.db(), state.passwords(), &req).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("User created successfully")),
    ))
}

/// Login with username and password
///
/// POST /users/login
async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> ApiResult<Json<AccessToken>> {
    let token = UserService::login(state.db(), state.jwt(), &req).await?;
    Ok(Json(token))
}
