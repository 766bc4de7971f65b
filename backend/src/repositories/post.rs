//! Post repository for database operations

use anyhow::Result;
use blog_shared::Post;
use chrono::{DateTime, Utc};
use sqlx::PgExecutor;

/// Post record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PostRecord {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub author_id: i64,
}

impl From<PostRecord> for Post {
    fn from(record: PostRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            content: record.content,
            created_at: record.created_at,
            author_id: record.author_id,
        }
    }
}

/// Input for updating a post; `None` leaves the column unchanged
#[derive(Debug, Clone, Default)]
pub struct UpdatePost {
    pub title: Option<String>,
    pub content: Option<String>,
}

/// Post repository
pub struct PostRepository;

impl PostRepository {
    /// Create a post owned by `author_id`
    pub async fn create<'e, E>(executor: E, author_id: i64, title: &str, content: &str) -> Result<Post>
    where
        E: PgExecutor<'e>,
    {
        let record = sqlx::query_as::<_, PostRecord>(
            r#"
            INSERT INTO posts (title, content, author_id)
            VALUES ($1, $2, $3)
            RETURNING id, title, content, created_at, author_id
            "#,
        )
        .bind(title)
        .bind(content)
        .bind(author_id)
        .fetch_one(executor)
        .await?;

        Ok(record.into())
    }

    /// List every post
    pub async fn list_all<'e, E>(executor: E) -> Result<Vec<Post>>
    where
        E: PgExecutor<'e>,
    {
        let records = sqlx::query_as::<_, PostRecord>(
            r#"
            SELECT id, title, content, created_at, author_id
            FROM posts
            ORDER BY id
            "#,
        )
        .fetch_all(executor)
        .await?;

        Ok(records.into_iter().map(Into::into).collect())
    }

    /// Get a post by ID
    pub async fn find_by_id<'e, E>(executor: E, id: i64) -> Result<Option<Post>>
    where
        E: PgExecutor<'e>,
    {
        let record = sqlx::query_as::<_, PostRecord>(
            r#"
            SELECT id, title, content, created_at, author_id
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(record.map(Into::into))
    }

    /// Whether a post exists
    pub async fn exists<'e, E>(executor: E, id: i64) -> Result<bool>
    where
        E: PgExecutor<'e>,
    {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM posts WHERE id = $1)
            "#,
        )
        .bind(id)
        .fetch_one(executor)
        .await?;

        Ok(exists)
    }

    /// Apply a partial update; `created_at` and `author_id` never change
    pub async fn update<'e, E>(executor: E, id: i64, updates: UpdatePost) -> Result<Option<Post>>
    where
        E: PgExecutor<'e>,
    {
        let record = sqlx::query_as::<_, PostRecord>(
            r#"
            UPDATE posts SET
                title = COALESCE($2, title),
                content = COALESCE($3, content)
            WHERE id = $1
            RETURNING id, title, content, created_at, author_id
            "#,
        )
        .bind(id)
        .bind(updates.title)
        .bind(updates.content)
        .fetch_optional(executor)
        .await?;

        Ok(record.map(Into::into))
    }

    /// Delete a post (its comments go with it). Returns whether a row was removed.
    pub async fn delete<'e, E>(executor: E, id: i64) -> Result<bool>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query(
            r#"
            DELETE FROM posts WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(executor)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
