//! Comment service
//!
//! Any authenticated caller may comment on any existing post. Comments do
//! not record who wrote them.

use crate::error::ApiError;
use crate::repositories::{CommentRepository, PostRepository};
use crate::services::post::post_not_found;
use blog_shared::{Comment, CreateCommentRequest};
use sqlx::PgPool;
use tracing::info;

/// Comment service
pub struct CommentService;

impl CommentService {
    /// Add a comment to an existing post
    pub async fn create(
        pool: &PgPool,
        post_id: i64,
        req: &CreateCommentRequest,
    ) -> Result<Comment, ApiError> {
        req.validate()?;

        let mut tx = pool.begin().await?;

        if !PostRepository::exists(&mut *tx, post_id)
            .await
            .map_err(ApiError::Internal)?
        {
            return Err(post_not_found());
        }

        let comment = CommentRepository::create(&mut *tx, post_id, &req.content)
            .await
            .map_err(ApiError::Internal)?;

        tx.commit().await?;

        info!(comment_id = comment.id, post_id, "Comment created");
        Ok(comment)
    }

    /// List the comments on an existing post
    pub async fn list(pool: &PgPool, post_id: i64) -> Result<Vec<Comment>, ApiError> {
        let mut conn = pool.acquire().await?;

        if !PostRepository::exists(&mut *conn, post_id)
            .await
            .map_err(ApiError::Internal)?
        {
            return Err(post_not_found());
        }

        CommentRepository::list_by_post(&mut *conn, post_id)
            .await
            .map_err(ApiError::Internal)
    }
}
