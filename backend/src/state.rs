//! Application state management
//!
//! This module provides the shared application state that is passed
//! to all request handlers via Axum's state extraction. The database pool
//! is injected here once and handed to every handler; there is no global
//! connection.

use crate::auth::{JwtService, PasswordService};
use crate::config::AppConfig;
use anyhow::Result;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use std::sync::Arc;

/// Shared application state
///
/// All fields are cheap to clone: `PgPool` and the JWT keys are internally
/// reference counted and the config sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Pre-initialized JWT service with cached keys
    pub jwt: JwtService,
    /// bcrypt hasher with the configured cost
    pub passwords: PasswordService,
}

impl AppState {
    /// Create a new application state
    ///
    /// Fails if the configuration does not pass [`AppConfig::validate`].
    pub fn new(db: PgPool, config: AppConfig) -> Result<Self> {
        config.validate()?;
        let jwt = JwtService::new(
            config.jwt.secret.expose_secret(),
            config.jwt.algorithm()?,
            config.jwt.access_token_lifetime(),
        );
        let passwords = PasswordService::new(config.auth.bcrypt_cost);

        Ok(Self {
            db,
            config: Arc::new(config),
            jwt,
            passwords,
        })
    }

    /// Get a reference to the database pool
    #[inline]
    pub fn db(&self) -> &PgPool {
        &self.db
    }

    /// Get a reference to the configuration
    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get a reference to the JWT service
    #[inline]
    pub fn jwt(&self) -> &JwtService {
        &self.jwt
    }

    /// Get a reference to the password hasher
    #[inline]
    pub fn passwords(&self) -> &PasswordService {
        &self.passwords
    }
}
