//! Domain service for authentication.
//!
//! Handles login (password check + token issuance) and logout (token removal).

use thiserror::Error;

use crate::api::types::{LoginResponse, LogoutResponse};
use crate::services::token::Claims;

pub const TOKEN_TYPE: &str = "bearer";
pub const LOGOUT_SUCCESS: &str = "Successfully logged out.";
pub const LOGOUT_INVALID_TOKEN: &str = "Invalid token.";

/// Errors specific to authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("User not found")]
    UserNotFound,

    #[error("Incorrect password")]
    InvalidCredentials,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Invalid token: {0}")]
    Token(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for AuthError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        Self::Token(err.to_string())
    }
}

/// Domain service trait for authentication.
#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Verifies credentials and issues an access token.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::UserNotFound`] for an unknown email and
    /// [`AuthError::InvalidCredentials`] when the password does not match.
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, AuthError>;

    /// Deletes the stored key for `token`. An unknown token is answered with
    /// a message, not an error, so repeated logouts are harmless.
    async fn logout(&self, token: &str) -> Result<LogoutResponse, AuthError>;

    /// Verifies signature and expiry of a token and returns its claims.
    fn decode_token(&self, token: &str) -> Result<Claims, AuthError>;
}
