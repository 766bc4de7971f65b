//! Post and comment routes
//!
//! Mounted behind the auth gate. Handlers that need the caller's identity
//! extract [`CurrentUser`], which the gate has already resolved.

use super::{ApiJson, ApiPath};
use crate::auth::CurrentUser;
use crate::error::ApiResult;
use crate::services::{CommentService, PostService};
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use blog_shared::{
    Comment, CommentCreatedResponse, CreateCommentRequest, CreatePostRequest, Post,
    PostActionResponse, UpdatePostRequest,
};

/// Create post routes
pub fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/posts", get(list_posts).post(create_post))
        .route("/posts/:post_id", get(get_post).put(update_post).delete(delete_post))
        .route("/posts/:post_id/comments", get(list_comments).post(create_comment))
}

/// POST /posts
async fn create_post(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiJson(req): ApiJson<CreatePostRequest>,
) -> ApiResult<(StatusCode, Json<PostActionResponse>)> {
    let post = PostService::create(state.db(), &user, &req).await?;
    Ok((
        StatusCode::CREATED,
        Json(PostActionResponse {
            message: "Post created successfully".to_string(),
            post_id: post.id,
        }),
    ))
}

/// GET /posts
async fn list_posts(State(state): State<AppState>) -> ApiResult<Json<Vec<Post>>> {
    Ok(Json(PostService::list(state.db()).await?))
}

/// GET /posts/:post_id
async fn get_post(
    State(state): State<AppState>,
    ApiPath(post_id): ApiPath<i64>,
) -> ApiResult<Json<Post>> {
    Ok(Json(PostService::get(state.db(), post_id).await?))
}

/// PUT /posts/:post_id - owner only, partial update
async fn update_post(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiPath(post_id): ApiPath<i64>,
    ApiJson(req): ApiJson<UpdatePostRequest>,
) -> ApiResult<Json<PostActionResponse>> {
    let post = PostService::update(state.db(), &user, post_id, req).await?;
    Ok(Json(PostActionResponse {
        message: "Post updated successfully".to_string(),
        post_id: post.id,
    }))
}

/// DELETE /posts/:post_id - owner only
async fn delete_post(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiPath(post_id): ApiPath<i64>,
) -> ApiResult<Json<PostActionResponse>> {
    let post_id = PostService::delete(state.db(), &user, post_id).await?;
    Ok(Json(PostActionResponse {
        message: "Post deleted successfully".to_string(),
        post_id,
    }))
}

/// POST /posts/:post_id/comments
async fn create_comment(
    State(state): State<AppState>,
    ApiPath(post_id): ApiPath<i64>,
    ApiJson(req): ApiJson<CreateCommentRequest>,
) -> ApiResult<(StatusCode, Json<CommentCreatedResponse>)> {
    let comment = CommentService::create(state.db(), post_id, &req).await?;
    Ok((
        StatusCode::CREATED,
        Json(CommentCreatedResponse {
            message: "Comment created successfully".to_string(),
            comment_id: comment.id,
        }),
    ))
}

/// GET /posts/:post_id/comments
async fn list_comments(
    State(state): State<AppState>,
    ApiPath(post_id): ApiPath<i64>,
) -> ApiResult<Json<Vec<Comment>>> {
    Ok(Json(CommentService::list(state.db(), post_id).await?))
}
