//! Application configuration management

use std::env;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// SQLite database path
    pub database_path: String,

    /// JWT secret for token signing and verification
    pub jwt_secret: String,

    /// Bearer token lifetime in seconds
    pub token_lifetime: i64,

    /// Bcrypt cost factor for password hashing
    pub bcrypt_cost: u32,

    /// Password assigned to accounts created without an explicit one
    pub initial_user_password: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let database_path = env::var("DATABASE_PATH")
            .or_else(|_| env::var("DATABASE_URL"))
            .unwrap_or_else(|_| "./data/alexandria.db".to_string());

        // JWT_SECRET should be set explicitly in production
        let jwt_secret =
            env::var("JWT_SECRET").unwrap_or_else(|_| "change-me-in-production".to_string());

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "4000".to_string())
                .parse()
                .context("Invalid PORT")?,

            database_path,

            jwt_secret,

            token_lifetime: env::var("TOKEN_LIFETIME")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(7 * 24 * 60 * 60),

            bcrypt_cost: env::var("BCRYPT_COST")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(bcrypt::DEFAULT_COST),

            initial_user_password: env::var("INITIAL_USER_PASSWORD")
                .unwrap_or_else(|_| "change-me".to_string()),
        })
    }
}
