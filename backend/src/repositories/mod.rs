//! Database repositories
//!
//! Provides data access layer for database operations. Every function takes
//! a generic executor so it runs equally on the pool or inside a
//! transaction opened by a service.

pub mod comment;
pub mod post;
pub mod user;

pub use comment::CommentRepository;
pub use post::{PostRepository, UpdatePost};
pub use user::UserRepository;

/// Whether an error came from a unique constraint violation
pub fn is_unique_violation(err: &anyhow::Error) -> bool {
    err.downcast_ref::<sqlx::Error>()
        .and_then(|e| e.as_database_error())
        .map(|e| e.is_unique_violation())
        .unwrap_or(false)
}
