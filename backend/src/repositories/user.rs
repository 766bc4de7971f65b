//! User repository for database operations

use anyhow::Result;
use blog_shared::User;
use sqlx::PgExecutor;

/// User record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRecord {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password: String,
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.id,
            username: record.username,
            email: record.email,
            password_hash: record.password,
        }
    }
}

/// User repository for database operations
pub struct UserRepository;

impl UserRepository {
    /// Insert a new user
    ///
    /// A duplicate email fails with a unique violation from the database.
    pub async fn create<'e, E>(
        executor: E,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User>
    where
        E: PgExecutor<'e>,
    {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            INSERT INTO users (username, email, password)
            VALUES ($1, $2, $3)
            RETURNING id, username, email, password
            "#,
        )
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .fetch_one(executor)
        .await?;

        Ok(user.into())
    }

    /// Find the first user with this username
    ///
    /// Usernames are not unique; the oldest account wins.
    pub async fn find_by_username<'e, E>(executor: E, username: &str) -> Result<Option<User>>
    where
        E: PgExecutor<'e>,
    {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, username, email, password
            FROM users
            WHERE username = $1
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(username)
        .fetch_optional(executor)
        .await?;

        Ok(user.map(Into::into))
    }
}
