//! Comment repository for database operations

use anyhow::Result;
use blog_shared::Comment;
use chrono::{DateTime, Utc};
use sqlx::PgExecutor;

/// Comment record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CommentRecord {
    pub id: i64,
    pub post_id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<CommentRecord> for Comment {
    fn from(record: CommentRecord) -> Self {
        Self {
            id: record.id,
            post_id: record.post_id,
            content: record.content,
            created_at: record.created_at,
        }
    }
}

/// Comment repository
pub struct CommentRepository;

impl CommentRepository {
    /// Attach a comment to a post
    pub async fn create<'e, E>(executor: E, post_id: i64, content: &str) -> Result<Comment>
    where
        E: PgExecutor<'e>,
    {
        let record = sqlx::query_as::<_, CommentRecord>(
            r#"
            INSERT INTO comments (post_id, content)
            VALUES ($1, $2)
            RETURNING id, post_id, content, created_at
            "#,
        )
        .bind(post_id)
        .bind(content)
        .fetch_one(executor)
        .await?;

        Ok(record.into())
    }

    /// All comments on a post, in insertion order
    pub async fn list_by_post<'e, E>(executor: E, post_id: i64) -> Result<Vec<Comment>>
    where
        E: PgExecutor<'e>,
    {
        let records = sqlx::query_as::<_, CommentRecord>(
            r#"
            SELECT id, post_id, content, created_at
            FROM comments
            WHERE post_id = $1
            ORDER BY id
            "#,
        )
        .bind(post_id)
        .fetch_all(executor)
        .await?;

        Ok(records.into_iter().map(Into::into).collect())
    }
}
