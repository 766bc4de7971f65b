//! Business logic services
//!
//! Services encapsulate business logic and coordinate between
//! repositories and the auth core. Each operation that touches storage
//! runs in its own transaction, committed on success and rolled back
//! when dropped on any error path.

pub mod comment;
pub mod post;
pub mod user;

pub use comment::CommentService;
pub use post::PostService;
pub use user::UserService;
