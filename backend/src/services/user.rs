//! User service for registration and login
//!
//! Password hashing and verification run on the blocking thread pool.

use crate::auth::{JwtService, PasswordService};
use crate::error::ApiError;
use crate::repositories::{is_unique_violation, UserRepository};
use blog_shared::{AccessToken, AuthError, LoginRequest, RegisterRequest, User};
use sqlx::PgPool;
use tracing::{debug, info};

/// User service for authentication operations
pub struct UserService;

impl UserService {
    /// Register a new user
    ///
    /// Only the email is unique. A second account with an existing username
    /// is accepted.
    pub async fn register(
        pool: &PgPool,
        hasher: &PasswordService,
        req: &RegisterRequest,
    ) -> Result<User, ApiError> {
        req.validate()?;

        let password_hash = hasher
            .hash_async(req.password.clone())
            .await
            .map_err(ApiError::Internal)?;

        let mut tx = pool.begin().await?;

        let user = match UserRepository::create(&mut *tx, &req.username, &req.email, &password_hash).await {
            Ok(user) => user,
            Err(e) if is_unique_violation(&e) => {
                debug!(username = %req.username, "Registration rejected: email already registered");
                return Err(ApiError::Conflict("Email already registered".to_string()));
            }
            Err(e) => return Err(ApiError::Internal(e)),
        };

        tx.commit().await?;

        info!(user_id = user.id, username = %user.username, "User registered");
        Ok(user)
    }

    /// Login with username and password
    ///
    /// Unknown username and wrong password are logged separately but both
    /// reach the client as the same authentication failure.
    pub async fn login(
        pool: &PgPool,
        jwt_service: &JwtService,
        req: &LoginRequest,
    ) -> Result<AccessToken, ApiError> {
        req.validate()?;

        let user = UserRepository::find_by_username(pool, &req.username)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| {
                debug!(username = %req.username, "Login failed: unknown user");
                AuthError::UnknownUser
            })?;

        let valid = PasswordService::verify_async(req.password.clone(), user.password_hash.clone())
            .await
            .map_err(ApiError::Internal)?;

        if !valid {
            debug!(user_id = user.id, "Login failed: incorrect password");
            return Err(AuthError::IncorrectPassword.into());
        }

        let lifetime = jwt_service.default_lifetime();
        let access_token = jwt_service
            .issue(&user.username, Some(lifetime))
            .map_err(ApiError::Internal)?;

        info!(user_id = user.id, "User logged in");
        Ok(AccessToken::bearer(access_token, lifetime.num_seconds()))
    }
}
