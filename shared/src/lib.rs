//! Blog Shared Library
//!
//! Wire types, domain models and input validation shared between the
//! backend and any Rust client of the blog API.

pub mod errors;
pub mod models;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use errors::*;
pub use models::{Comment, Post, User};
pub use types::*;
pub use validation::ValidationError;
