//! Error types for the blog application

use thiserror::Error;

/// Authentication error types
///
/// Internal reasons only. Every variant reaches the client as the same
/// generic authentication failure.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    #[error("Missing token")]
    MissingToken,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("Token has no subject")]
    MissingSubject,

    #[error("Unknown user")]
    UnknownUser,

    #[error("Incorrect password")]
    IncorrectPassword,
}

impl AuthError {
    /// Message shown to clients, identical for every reason
    pub fn client_message(&self) -> &'static str {
        match self {
            AuthError::UnknownUser | AuthError::IncorrectPassword => "Invalid username or password",
            _ => "Could not validate credentials",
        }
    }
}
