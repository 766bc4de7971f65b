//! Configuration management for the blog backend
//!
//! Configuration is loaded hierarchically:
//! 1. Default values (in code)
//! 2. TOML config files (config/development.toml or config/production.toml)
//! 3. Environment variables (prefix: BLOG__)

use anyhow::{Context, Result};
use jsonwebtoken::Algorithm;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize, Serializer};
use sqlx::postgres::PgConnectOptions;
use std::env;
use std::str::FromStr;

/// Secret used by the default (development) configuration
pub const DEVELOPMENT_JWT_SECRET: &str = "development-secret-change-in-production";

/// Cost range accepted by bcrypt
pub const BCRYPT_COST_RANGE: std::ops::RangeInclusive<u32> = 4..=31;

/// Token lifetimes from one minute up to one year
pub const TOKEN_LIFETIME_MINUTES_RANGE: std::ops::RangeInclusive<i64> = 1..=60 * 24 * 365;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub request_timeout_secs: u64,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    #[serde(serialize_with = "expose")]
    pub password: SecretString,
    pub name: String,
    pub max_connections: u32,
}

/// JWT configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    #[serde(serialize_with = "expose")]
    pub secret: SecretString,
    /// HMAC algorithm name: HS256, HS384 or HS512
    pub algorithm: String,
    pub access_token_expire_minutes: i64,
}

/// Password hashing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    pub bcrypt_cost: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

// Only used to feed the defaults back into the `config` builder.
fn expose<S: Serializer>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(secret.expose_secret())
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8000,
                request_timeout_secs: 30,
            },
            database: DatabaseConfig {
                host: "localhost".to_string(),
                port: 5432,
                user: "postgres".to_string(),
                password: SecretString::new("postgres".to_string()),
                name: "blog_db".to_string(),
                max_connections: 10,
            },
            jwt: JwtConfig {
                secret: SecretString::new(DEVELOPMENT_JWT_SECRET.to_string()),
                algorithm: "HS256".to_string(),
                access_token_expire_minutes: 30,
            },
            auth: AuthConfig::default(),
        }
    }
}

impl DatabaseConfig {
    /// Build connection options from the individual parameters
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(self.password.expose_secret())
            .database(&self.name)
            .application_name("blog-backend")
    }
}

impl JwtConfig {
    /// Parse the configured signing algorithm
    ///
    /// The signing key is a shared secret, so only the HMAC family is accepted.
    pub fn algorithm(&self) -> Result<Algorithm> {
        let algorithm = Algorithm::from_str(&self.algorithm)
            .with_context(|| format!("Unknown JWT algorithm '{}'", self.algorithm))?;
        match algorithm {
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => Ok(algorithm),
            other => anyhow::bail!("JWT algorithm {:?} needs an asymmetric key; use HS256, HS384 or HS512", other),
        }
    }

    /// Default token lifetime
    pub fn access_token_lifetime(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.access_token_expire_minutes)
    }
}

impl AppConfig {
    /// Load configuration from files and environment
    ///
    /// Loading order (later sources override earlier):
    /// 1. Default values
    /// 2. Config file based on RUST_ENV (development.toml or production.toml)
    /// 3. Environment variables with BLOG__ prefix
    pub fn load() -> Result<Self> {
        let env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
        let config_file = format!("config/{}.toml", env);

        let config = config::Config::builder()
            // Start with defaults
            .add_source(config::Config::try_from(&AppConfig::default())?)
            // Load from environment-specific config file
            .add_source(config::File::with_name(&config_file).required(false))
            // e.g., BLOG__JWT__SECRET sets jwt.secret
            .add_source(config::Environment::with_prefix("BLOG").separator("__"))
            .build()?;

        let config: AppConfig = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would only fail later, per request
    pub fn validate(&self) -> Result<()> {
        self.jwt.algorithm()?;

        if !TOKEN_LIFETIME_MINUTES_RANGE.contains(&self.jwt.access_token_expire_minutes) {
            anyhow::bail!(
                "jwt.access_token_expire_minutes must be within {}..={}, got {}",
                TOKEN_LIFETIME_MINUTES_RANGE.start(),
                TOKEN_LIFETIME_MINUTES_RANGE.end(),
                self.jwt.access_token_expire_minutes
            );
        }
        if !BCRYPT_COST_RANGE.contains(&self.auth.bcrypt_cost) {
            anyhow::bail!(
                "auth.bcrypt_cost must be within {}..={}, got {}",
                BCRYPT_COST_RANGE.start(),
                BCRYPT_COST_RANGE.end(),
                self.auth.bcrypt_cost
            );
        }
        Ok(())
    }

    /// Check if running in production mode
    pub fn is_production() -> bool {
        env::var("RUST_ENV")
            .map(|v| v == "production")
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.database.name, "blog_db");
        assert_eq!(config.jwt.access_token_expire_minutes, 30);
        assert_eq!(config.auth.bcrypt_cost, bcrypt::DEFAULT_COST);
    }

    #[test]
    fn test_is_production() {
        // Default should be false (development)
        assert!(!AppConfig::is_production());
    }

    #[rstest]
    #[case("HS256", Algorithm::HS256)]
    #[case("HS384", Algorithm::HS384)]
    #[case("HS512", Algorithm::HS512)]
    fn test_hmac_algorithms_accepted(#[case] name: &str, #[case] expected: Algorithm) {
        let mut jwt = AppConfig::default().jwt;
        jwt.algorithm = name.to_string();
        assert_eq!(jwt.algorithm().unwrap(), expected);
    }

    #[rstest]
    #[case("RS256")]
    #[case("ES256")]
    #[case("none")]
    #[case("hs256x")]
    fn test_non_hmac_algorithms_rejected(#[case] name: &str) {
        let mut jwt = AppConfig::default().jwt;
        jwt.algorithm = name.to_string();
        assert!(jwt.algorithm().is_err());
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[rstest]
    #[case(0)]
    #[case(-30)]
    #[case(60 * 24 * 365 + 1)]
    #[case(i64::MAX)]
    fn test_out_of_range_token_lifetime_rejected(#[case] minutes: i64) {
        let mut config = AppConfig::default();
        config.jwt.access_token_expire_minutes = minutes;
        assert!(config.validate().is_err());
    }

    #[rstest]
    #[case(0)]
    #[case(3)]
    #[case(32)]
    fn test_out_of_range_bcrypt_cost_rejected(#[case] cost: u32) {
        let mut config = AppConfig::default();
        config.auth.bcrypt_cost = cost;
        assert!(config.validate().is_err());
    }

    #[rstest]
    #[case(4)]
    #[case(31)]
    fn test_bcrypt_cost_bounds_accepted(#[case] cost: u32) {
        let mut config = AppConfig::default();
        config.auth.bcrypt_cost = cost;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_secrets_hidden_from_debug() {
        let config = AppConfig::default();
        let debug = format!("{:?}", config);
        assert!(!debug.contains(DEVELOPMENT_JWT_SECRET));
    }

    #[test]
    fn test_defaults_round_trip_through_builder() {
        let built = config::Config::builder()
            .add_source(config::Config::try_from(&AppConfig::default()).unwrap())
            .build()
            .unwrap();
        let config: AppConfig = built.try_deserialize().unwrap();
        assert_eq!(config.jwt.secret.expose_secret(), DEVELOPMENT_JWT_SECRET);
        assert_eq!(config.database.port, 5432);
    }
}
