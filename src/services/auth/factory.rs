/// Factory: build `TokenVerifier` from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::services::auth::{TokenPolicy, TokenVerifier};

pub fn build_token_verifier(config: &Config) -> Arc<TokenVerifier> {
    let policy = TokenPolicy {
        leeway_seconds: config.access_token_leeway_seconds,
        issuer: config.auth_issuer.clone(),
        audience: config.auth_audience.clone(),
    };

    Arc::new(TokenVerifier::new(&config.jwt_secret, policy))
}
