//! access token 検証 → AuthCtx を extensions に入れる
//!
//! One routine serves all three gates: extract (header or query) → verify
//! (signature, expiry, claims) → resolve (user exists and is active) → bind.
//! `AuthMode` decides where the token is read from and whether a failure
//! answers 401 or lets the request through without an identity.

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderMap, Request, Uri},
    middleware::{self, Next},
    response::{IntoResponse, Response},
};

use super::credentials::{AuthMode, CredentialSource, FailurePolicy};
use super::trace;
use crate::api::v1::extractors::AuthCtx;
use crate::error::{AppError, AuthError};
use crate::services::auth::resolve_identity;
use crate::state::AppState;

/// 指定した mode の認証 gate を router 配下の route に掛ける。
///
/// `route_layer` なので、マッチしない path は認証前に 404 になる。
///
/// 例：
/// ```ignore
/// let me = Router::new().route("/me", get(me));
/// let me = middleware::auth::apply(me, state.clone(), AuthMode::Required);
/// ```
pub fn apply(router: Router<AppState>, state: AppState, mode: AuthMode) -> Router<AppState> {
    // axum 0.8 の from_fn は State extractor を受け取れないため、`from_fn_with_state` で明示的に state を渡す
    match mode {
        AuthMode::Required => {
            router.route_layer(middleware::from_fn_with_state(state, require_auth))
        }
        AuthMode::Optional => {
            router.route_layer(middleware::from_fn_with_state(state, optional_auth))
        }
        AuthMode::WebSocket => {
            router.route_layer(middleware::from_fn_with_state(state, websocket_auth))
        }
    }
}

/// Extract, verify and resolve. Shared by every mode.
pub async fn authenticate(
    state: &AppState,
    source: CredentialSource,
    headers: &HeaderMap,
    uri: &Uri,
) -> Result<AuthCtx, AuthError> {
    let token = source.extract(headers, uri)?;
    let verified = state.auth.verify(&token)?;
    let user = resolve_identity(state.users.as_ref(), verified.user_id).await?;

    Ok(AuthCtx::new(user))
}

/// middleware → extractor への受け渡し
pub fn bind(req: &mut Request<Body>, ctx: AuthCtx) {
    req.extensions_mut().insert(ctx);
}

pub async fn require_auth(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    gate(state, AuthMode::Required, req, next).await
}

pub async fn optional_auth(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    gate(state, AuthMode::Optional, req, next).await
}

/// Runs before the upgrade handler: a rejection here answers 401 and the
/// connection is never switched.
pub async fn websocket_auth(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    gate(state, AuthMode::WebSocket, req, next).await
}

async fn gate(state: AppState, mode: AuthMode, req: Request<Body>, next: Next) -> Response {
    if state.auth_trace {
        trace::log_inbound(&req, mode.source());
    }

    // Borrow only the head across the store lookup; the body stays untouched.
    let (parts, body) = req.into_parts();
    let result = authenticate(&state, mode.source(), &parts.headers, &parts.uri).await;
    let mut req = Request::from_parts(parts, body);

    match (result, mode.policy()) {
        (Ok(ctx), _) => {
            tracing::debug!(user_id = ctx.user_id(), ?mode, "request authenticated");
            bind(&mut req, ctx);
            next.run(req).await
        }
        (Err(err), FailurePolicy::Reject) => {
            tracing::warn!(
                ?mode,
                kind = err.kind(),
                error = %err,
                path = %req.uri().path(),
                "authentication rejected"
            );
            AppError::from(err).into_response()
        }
        (Err(err), FailurePolicy::Continue) => {
            tracing::debug!(
                ?mode,
                kind = err.kind(),
                "continuing without identity"
            );
            // Never let an identity from elsewhere leak into an unauthenticated request.
            req.extensions_mut().remove::<AuthCtx>();
            next.run(req).await
        }
    }
}
