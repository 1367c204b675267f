//! HS256 access-token verification.
//!
//! Pure and synchronous: one call takes a token string and the injected
//! secret and either yields usable claims or an `AuthError`. Nothing is
//! cached between calls.

use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::Deserialize;

use crate::error::AuthError;

/// `sub` may arrive as a JSON string (`"42"`) or a JSON integer (`42`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum SubjectId {
    Number(i64),
    Text(String),
}

impl SubjectId {
    /// Resolve to an internal user id. `None` if not a positive integer.
    pub fn user_id(&self) -> Option<i64> {
        let id = match self {
            SubjectId::Number(n) => *n,
            SubjectId::Text(s) => s.trim().parse::<i64>().ok()?,
        };
        (id > 0).then_some(id)
    }
}

/// Access token (JWT) claims.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AccessTokenClaims {
    pub sub: SubjectId,
    pub exp: u64,

    #[serde(default)]
    pub iat: Option<u64>,
    #[serde(default)]
    pub nbf: Option<u64>,
    #[serde(default)]
    pub iss: Option<String>,
    #[serde(default)]
    pub jti: Option<String>,
}

impl AccessTokenClaims {
    /// Claim-level validity, re-checked after the library accepted the token.
    ///
    /// Returns the name of the first claim that makes the token unusable.
    pub fn check(&self) -> Result<i64, &'static str> {
        if self.exp == 0 {
            return Err("exp");
        }
        if let Some(iat) = self.iat
            && iat > self.exp
        {
            return Err("iat");
        }
        self.sub.user_id().ok_or("sub")
    }
}

/// Claims that passed signature, temporal and claim-level checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedAccessToken {
    pub user_id: i64,
    pub claims: AccessTokenClaims,
}

/// Optional knobs on top of signature + `exp`.
#[derive(Debug, Clone, Default)]
pub struct TokenPolicy {
    pub leeway_seconds: u64,
    pub issuer: Option<String>,
    pub audience: Option<String>,
}

/// HMAC-SHA256 token verifier.
///
/// Key material is not printable via Debug.
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("TokenVerifier")
            .field("validation", &self.validation)
            .finish_non_exhaustive()
    }
}

impl TokenVerifier {
    pub fn new(secret: &[u8], policy: TokenPolicy) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = policy.leeway_seconds;
        validation.validate_exp = true;
        validation.validate_nbf = true;
        // `sub` is enforced by deserialization so numeric subjects still parse
        validation.set_required_spec_claims(&["exp"]);

        if let Some(issuer) = &policy.issuer {
            validation.set_issuer(&[issuer]);
        }
        match &policy.audience {
            Some(audience) => validation.set_audience(&[audience]),
            None => validation.validate_aud = false,
        }

        Self {
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Decode and verify. Every library failure (structure, algorithm,
    /// signature, expiry, not-before, issuer, audience) maps to `InvalidToken`.
    pub fn decode(&self, token: &str) -> Result<AccessTokenClaims, AuthError> {
        jsonwebtoken::decode::<AccessTokenClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|err| {
                tracing::debug!(reason = ?err.kind(), "token rejected by verifier");
                AuthError::InvalidToken
            })
    }

    /// Decode, then re-check claim validity independently of the library.
    pub fn verify(&self, token: &str) -> Result<VerifiedAccessToken, AuthError> {
        let claims = self.decode(token)?;
        let user_id = claims.check().map_err(AuthError::InvalidClaims)?;
        Ok(VerifiedAccessToken { user_id, claims })
    }
}
