//! Inbound diagnostic trace (enabled with `AUTH_TRACE`).
//!
//! Records what arrived, never the credential itself: header names without
//! values, the path without the query string, and for the credential only
//! its length plus a short SHA-256 fingerprint for correlating log lines.

use axum::{body::Body, http::Request};
use sha2::{Digest, Sha256};

use super::credentials::CredentialSource;

/// Hex of the first 4 bytes of SHA-256(credential).
pub fn fingerprint(credential: &str) -> String {
    Sha256::digest(credential.as_bytes())
        .iter()
        .take(4)
        .map(|b| format!("{:02x}", b))
        .collect()
}

pub fn log_inbound(req: &Request<Body>, source: CredentialSource) {
    let header_names: Vec<&str> = req.headers().keys().map(|name| name.as_str()).collect();

    match source.extract(req.headers(), req.uri()) {
        Ok(credential) => tracing::debug!(
            method = %req.method(),
            path = %req.uri().path(),
            headers = ?header_names,
            %source,
            credential_len = credential.len(),
            credential_fp = %fingerprint(&credential),
            "inbound auth request"
        ),
        Err(err) => tracing::debug!(
            method = %req.method(),
            path = %req.uri().path(),
            headers = ?header_names,
            %source,
            credential = err.kind(),
            "inbound auth request"
        ),
    }
}
