/*
 * Responsibility
 * - アプリ共通の AppError 定義
 * - 認証失敗の分類 (AuthError) と wire 上の code/message
 * - IntoResponse 実装 (HTTP status / JSON error body)
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::middleware::auth::CredentialSource;
use crate::repos::error::RepoError;

/// Body written for every error response: `{"error": <code>, "message": <text>}`.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: &'static str,
    pub message: String,
}

/// Why an authentication attempt stopped.
///
/// Every kind is terminal for the current attempt. Structural, signature and
/// temporal failures all collapse into `InvalidToken`.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("credential missing from {0}")]
    MissingCredential(CredentialSource),
    #[error("credential is not a bearer token")]
    MalformedCredential,
    #[error("token failed verification")]
    InvalidToken,
    #[error("token claims failed validation: {0}")]
    InvalidClaims(&'static str),
    #[error("user {0} not found")]
    UserNotFound(i64),
    #[error("user {0} is inactive")]
    InactiveAccount(i64),
    #[error("user store failure")]
    Store(#[from] RepoError),
}

impl AuthError {
    /// Machine-readable code sent in the `error` field.
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::MissingCredential(CredentialSource::Header) => {
                "Authorization header required"
            }
            AuthError::MissingCredential(CredentialSource::Query) => "Token required",
            AuthError::MalformedCredential => "Invalid token format",
            AuthError::InvalidToken => "Invalid token",
            AuthError::InvalidClaims(_) => "Invalid token claims",
            AuthError::UserNotFound(_) => "User not found",
            AuthError::InactiveAccount(_) => "User inactive",
            AuthError::Store(_) => "Internal server error",
        }
    }

    /// Human-readable text sent in the `message` field.
    pub fn message(&self) -> &'static str {
        match self {
            AuthError::MissingCredential(CredentialSource::Header) => {
                "request must carry an Authorization header"
            }
            AuthError::MissingCredential(CredentialSource::Query) => {
                "connection URL must carry a token query parameter"
            }
            AuthError::MalformedCredential => "Authorization header must use the Bearer scheme",
            AuthError::InvalidToken => "token is invalid or expired",
            AuthError::InvalidClaims(_) => "token claims are not usable",
            AuthError::UserNotFound(_) => "token subject does not match any user",
            AuthError::InactiveAccount(_) => "user account is deactivated",
            AuthError::Store(_) => "internal server error",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::UNAUTHORIZED,
        }
    }

    /// Short label for logs. Carries no credential material.
    pub fn kind(&self) -> &'static str {
        match self {
            AuthError::MissingCredential(_) => "missing_credential",
            AuthError::MalformedCredential => "malformed_credential",
            AuthError::InvalidToken => "invalid_token",
            AuthError::InvalidClaims(_) => "invalid_claims",
            AuthError::UserNotFound(_) => "user_not_found",
            AuthError::InactiveAccount(_) => "inactive_account",
            AuthError::Store(_) => "store_failure",
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("internal server error")]
    Internal,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            AppError::Auth(err) => (err.status(), err.code(), err.message().to_string()),
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error",
                "internal server error".into(),
            ),
        };

        (status, Json(ErrorResponse { error, message })).into_response()
    }
}
