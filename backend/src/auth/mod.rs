//! Authentication module
//!
//! Provides bcrypt password hashing, JWT session tokens, and the gate that
//! turns a bearer token into the current user.

mod jwt;
mod middleware;
mod password;

pub use jwt::{Claims, JwtService, TokenError};
pub use middleware::{authenticate, bearer_token, require_auth, CurrentUser};
pub use password::PasswordService;
