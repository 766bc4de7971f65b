//! Post service
//!
//! Any authenticated caller may read any post. Only the owner may change
//! or delete one, and the ownership check and the mutation run in the
//! same transaction.

use crate::auth::CurrentUser;
use crate::error::ApiError;
use crate::repositories::{PostRepository, UpdatePost};
use blog_shared::{CreatePostRequest, Post, UpdatePostRequest};
use sqlx::PgPool;
use tracing::{debug, info};

/// Post service
pub struct PostService;

impl PostService {
    /// Create a post owned by the current user
    pub async fn create(
        pool: &PgPool,
        user: &CurrentUser,
        req: &CreatePostRequest,
    ) -> Result<Post, ApiError> {
        req.validate()?;

        let mut tx = pool.begin().await?;
        let post = PostRepository::create(&mut *tx, user.id, &req.title, &req.content)
            .await
            .map_err(ApiError::Internal)?;
        tx.commit().await?;

        info!(post_id = post.id, author_id = user.id, "Post created");
        Ok(post)
    }

    /// List all posts
    pub async fn list(pool: &PgPool) -> Result<Vec<Post>, ApiError> {
        PostRepository::list_all(pool).await.map_err(ApiError::Internal)
    }

    /// Get a single post
    pub async fn get(pool: &PgPool, post_id: i64) -> Result<Post, ApiError> {
        PostRepository::find_by_id(pool, post_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(post_not_found)
    }

    /// Partially update a post
    ///
    /// Checks run in order: existence (404), ownership (403), then a
    /// non-empty update (400).
    pub async fn update(
        pool: &PgPool,
        user: &CurrentUser,
        post_id: i64,
        req: UpdatePostRequest,
    ) -> Result<Post, ApiError> {
        let mut tx = pool.begin().await?;

        let post = PostRepository::find_by_id(&mut *tx, post_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(post_not_found)?;

        ensure_owner(&post, user, "modify")?;

        if req.is_empty() {
            return Err(ApiError::Validation("No updates provided".to_string()));
        }
        req.validate()?;

        let updates = UpdatePost {
            title: req.title,
            content: req.content,
        };
        let post = PostRepository::update(&mut *tx, post_id, updates)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(post_not_found)?;

        tx.commit().await?;

        info!(post_id, author_id = user.id, "Post updated");
        Ok(post)
    }

    /// Delete a post and its comments
    pub async fn delete(pool: &PgPool, user: &CurrentUser, post_id: i64) -> Result<i64, ApiError> {
        let mut tx = pool.begin().await?;

        let post = PostRepository::find_by_id(&mut *tx, post_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(post_not_found)?;

        ensure_owner(&post, user, "delete")?;

        let deleted = PostRepository::delete(&mut *tx, post_id)
            .await
            .map_err(ApiError::Internal)?;
        if !deleted {
            return Err(post_not_found());
        }

        tx.commit().await?;

        info!(post_id, author_id = user.id, "Post deleted");
        Ok(post_id)
    }
}

pub(crate) fn post_not_found() -> ApiError {
    ApiError::NotFound("Post not found".to_string())
}

fn ensure_owner(post: &Post, user: &CurrentUser, action: &str) -> Result<(), ApiError> {
    if post.is_owned_by(user.id) {
        return Ok(());
    }
    debug!(post_id = post.id, user_id = user.id, action, "Ownership check failed");
    Err(ApiError::Forbidden(format!(
        "You are not authorized to {} this post",
        action
    )))
}
