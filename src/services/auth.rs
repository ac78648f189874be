//! Authentication service for user credentials and bearer tokens
//!
//! Provides:
//! - Password hashing with bcrypt
//! - Token generation and validation (HS256, username + user id claims)
//! - Per-request identity derivation from a presented token

use bcrypt::{hash, verify};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::db::{Database, UserRecord};
use crate::graphql::auth::CurrentUser;

/// Claims embedded in issued bearer tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// User ID (subject)
    pub sub: String,
    /// Username
    pub username: String,
    /// Expiration timestamp
    pub exp: i64,
    /// Issued at timestamp
    pub iat: i64,
}

/// Authentication failures, classified for the resolvers.
///
/// Unknown usernames and wrong passwords collapse into the same variant so
/// callers cannot enumerate accounts.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("wrong credentials")]
    InvalidCredentials,
    #[error("invalid authentication token")]
    InvalidToken,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Auth service configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// JWT signing secret
    pub jwt_secret: String,
    /// Token lifetime in seconds
    pub token_lifetime: i64,
    /// Bcrypt cost factor
    pub bcrypt_cost: u32,
    /// Password assigned to accounts created without an explicit one
    pub initial_password: String,
}

impl From<&crate::config::Config> for AuthConfig {
    fn from(config: &crate::config::Config) -> Self {
        Self {
            jwt_secret: config.jwt_secret.clone(),
            token_lifetime: config.token_lifetime,
            bcrypt_cost: config.bcrypt_cost,
            initial_password: config.initial_user_password.clone(),
        }
    }
}

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    db: Database,
    config: AuthConfig,
}

impl AuthService {
    pub fn new(db: Database, config: AuthConfig) -> Self {
        Self { db, config }
    }

    /// Password used for accounts created without an explicit one
    pub fn initial_password(&self) -> &str {
        &self.config.initial_password
    }

    /// Hash a password with bcrypt
    pub fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        hash(password, self.config.bcrypt_cost)
            .map_err(|e| AuthError::Internal(anyhow::anyhow!("Failed to hash password: {}", e)))
    }

    /// Verify a password against a stored hash
    fn verify_password(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        verify(password, hash)
            .map_err(|e| AuthError::Internal(anyhow::anyhow!("Failed to verify password: {}", e)))
    }

    /// Login with username and password, returning a signed bearer token.
    ///
    /// Unknown username and wrong password are indistinguishable to the caller.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, AuthError> {
        let user = self
            .db
            .users()
            .get_by_username(username)
            .await
            .map_err(AuthError::Internal)?
            .ok_or(AuthError::InvalidCredentials)?;

        if !self.verify_password(password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        self.issue_token(&user)
    }

    /// Generate a signed token embedding the user's id and username
    pub fn issue_token(&self, user: &UserRecord) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = TokenClaims {
            sub: user.id.clone(),
            username: user.username.clone(),
            exp: (now + Duration::seconds(self.config.token_lifetime)).timestamp(),
            iat: now.timestamp(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret.as_bytes()),
        )
        .map_err(|e| AuthError::Internal(anyhow::anyhow!("Failed to create token: {}", e)))
    }

    /// Verify a token's signature and expiry and return its claims
    pub fn verify_token(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.validate_aud = false;

        let token_data = decode::<TokenClaims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret.as_bytes()),
            &validation,
        )
        .map_err(|_| AuthError::InvalidToken)?;

        Ok(token_data.claims)
    }

    /// Derive the request identity from a presented bearer token.
    ///
    /// A verified token whose user no longer exists yields `None`; a stale
    /// or rotated token never surfaces a stale user. An unverifiable token is
    /// an error and the request carrying it must be rejected outright.
    pub async fn authenticate(&self, token: &str) -> Result<Option<CurrentUser>, AuthError> {
        let claims = self.verify_token(token)?;

        let user = self
            .db
            .users()
            .get_by_id(&claims.sub)
            .await
            .map_err(AuthError::Internal)?;

        Ok(user.map(|u| CurrentUser {
            id: u.id,
            username: u.username,
            favorite_genre: u.favorite_genre,
        }))
    }
}
