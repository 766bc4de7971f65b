//! Input validation functions
//!
//! Field-level checks for request bodies. Each check returns a
//! [`ValidationError`] naming the offending field.

use crate::types::{CreateCommentRequest, CreatePostRequest, LoginRequest, RegisterRequest, UpdatePostRequest};
use validator::ValidateEmail;

pub const MAX_USERNAME_LEN: usize = 150;
pub const MAX_TITLE_LEN: usize = 255;
/// bcrypt only consumes the first 72 bytes of its input
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Validation error with field context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }

    /// Format as user-friendly error message
    pub fn user_message(&self) -> String {
        format!("{}: {}", get_field_display_label(&self.field), self.message)
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.user_message())
    }
}

impl std::error::Error for ValidationError {}

/// Map field names to display labels
pub fn get_field_display_label(field_name: &str) -> &str {
    match field_name {
        "username" => "Username",
        "email" => "Email",
        "password" => "Password",
        "title" => "Title",
        "content" => "Content",
        _ => field_name,
    }
}

/// Validate a username
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username.trim().is_empty() {
        return Err(ValidationError::new("username", "cannot be empty"));
    }
    if username.chars().count() > MAX_USERNAME_LEN {
        return Err(ValidationError::new("username", "too long"));
    }
    Ok(())
}

/// Validate email format
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() {
        return Err(ValidationError::new("email", "cannot be empty"));
    }
    if !email.validate_email() {
        return Err(ValidationError::new("email", "invalid format"));
    }
    Ok(())
}

/// Validate a password
///
/// No strength policy is imposed; the password only has to be non-empty
/// and fit in bcrypt's input.
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::new("password", "cannot be empty"));
    }
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(ValidationError::new("password", "must be at most 72 bytes"));
    }
    Ok(())
}

/// Validate a post title
pub fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::new("title", "cannot be empty"));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(ValidationError::new("title", "too long"));
    }
    Ok(())
}

/// Validate post or comment text
pub fn validate_content(content: &str) -> Result<(), ValidationError> {
    if content.trim().is_empty() {
        return Err(ValidationError::new("content", "cannot be empty"));
    }
    Ok(())
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_username(&self.username)?;
        validate_email(&self.email)?;
        validate_password(&self.password)
    }
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.username.is_empty() {
            return Err(ValidationError::new("username", "cannot be empty"));
        }
        if self.password.is_empty() {
            return Err(ValidationError::new("password", "cannot be empty"));
        }
        Ok(())
    }
}

impl CreatePostRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_title(&self.title)?;
        validate_content(&self.content)
    }
}

impl UpdatePostRequest {
    /// Checks only the supplied fields; emptiness is decided by the caller
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(title) = &self.title {
            validate_title(title)?;
        }
        if let Some(content) = &self.content {
            validate_content(content)?;
        }
        Ok(())
    }
}

impl CreateCommentRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_content(&self.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case("a@x.com", true)]
    #[case("test@example.com", true)]
    #[case("user.name@domain.co.uk", true)]
    #[case("", false)]
    #[case("invalid", false)]
    #[case("spaces in@email.com", false)]
    fn test_validate_email(#[case] email: &str, #[case] valid: bool) {
        assert_eq!(validate_email(email).is_ok(), valid);
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("pw1").is_ok());
        assert!(validate_password("").is_err());
        assert!(validate_password(&"a".repeat(72)).is_ok());
        assert!(validate_password(&"a".repeat(73)).is_err());
    }

    #[test]
    fn test_validate_username() {
        assert!(validate_username("alice").is_ok());
        assert!(validate_username("   ").is_err());
        assert!(validate_username(&"u".repeat(151)).is_err());
    }

    #[test]
    fn test_register_request_reports_first_bad_field() {
        let req = RegisterRequest {
            username: "alice".to_string(),
            email: "nope".to_string(),
            password: "pw1".to_string(),
        };
        let err = req.validate().unwrap_err();
        assert_eq!(err.field, "email");
        assert_eq!(err.user_message(), "Email: invalid format");
    }

    #[test]
    fn test_update_request_validates_supplied_fields_only() {
        let req = UpdatePostRequest {
            title: Some("bye".to_string()),
            content: None,
        };
        assert!(req.validate().is_ok());

        let blank = UpdatePostRequest {
            title: Some("  ".to_string()),
            content: None,
        };
        assert_eq!(blank.validate().unwrap_err().field, "title");

        // An empty update is not a field error
        assert!(UpdatePostRequest::default().validate().is_ok());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_nonblank_titles_within_limit_are_valid(title in "[a-zA-Z0-9][a-zA-Z0-9 ]{0,254}") {
            prop_assert!(validate_title(&title).is_ok());
        }

        #[test]
        fn prop_whitespace_content_is_rejected(content in "[ \t\n]{0,20}") {
            prop_assert!(validate_content(&content).is_err());
        }
    }
}
