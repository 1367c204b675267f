//! Where a credential comes from and what happens when authentication fails.
//!
//! The three gate modes differ only in these two axes:
//!
//! | mode        | source                     | on failure        |
//! |-------------|----------------------------|-------------------|
//! | `Required`  | `Authorization: Bearer ..` | 401, stop         |
//! | `Optional`  | `Authorization: Bearer ..` | continue, no user |
//! | `WebSocket` | `?token=..`                | 401, no upgrade   |

use std::borrow::Cow;
use std::fmt;

use axum::http::{HeaderMap, Uri, header};

use crate::error::AuthError;

pub const BEARER_PREFIX: &str = "Bearer ";
pub const TOKEN_QUERY_PARAM: &str = "token";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    /// `Authorization: Bearer <token>`
    Header,
    /// `token=<token>` on the connection URL
    Query,
}

impl fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialSource::Header => write!(f, "authorization header"),
            CredentialSource::Query => write!(f, "token query parameter"),
        }
    }
}

impl CredentialSource {
    /// Pull the raw token string out of the request.
    pub fn extract<'a>(
        &self,
        headers: &'a HeaderMap,
        uri: &'a Uri,
    ) -> Result<Cow<'a, str>, AuthError> {
        match self {
            CredentialSource::Header => bearer_from_headers(headers).map(Cow::Borrowed),
            CredentialSource::Query => token_from_query(uri),
        }
    }
}

fn bearer_from_headers(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingCredential(CredentialSource::Header))?;

    // Present but not visible ASCII: cannot be a bearer token.
    let value = value.to_str().map_err(|_| AuthError::MalformedCredential)?;

    value
        .strip_prefix(BEARER_PREFIX)
        .ok_or(AuthError::MalformedCredential)
}

fn token_from_query(uri: &Uri) -> Result<Cow<'_, str>, AuthError> {
    let query = uri.query().unwrap_or_default();

    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == TOKEN_QUERY_PARAM)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
        .ok_or(AuthError::MissingCredential(CredentialSource::Query))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Answer 401 and do not run the downstream handler.
    Reject,
    /// Run the downstream handler without an identity.
    Continue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Required,
    Optional,
    WebSocket,
}

impl AuthMode {
    pub fn source(&self) -> CredentialSource {
        match self {
            AuthMode::Required | AuthMode::Optional => CredentialSource::Header,
            AuthMode::WebSocket => CredentialSource::Query,
        }
    }

    pub fn policy(&self) -> FailurePolicy {
        match self {
            AuthMode::Required | AuthMode::WebSocket => FailurePolicy::Reject,
            AuthMode::Optional => FailurePolicy::Continue,
        }
    }
}
