use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use super::AuthCtx;
use crate::error::AppError;

/// Handler で、 AuthCtx を受け取るための extractor
/// required / websocket gate が AuthCtx を request.extensions() に insert 済みである前提
/// 見つからない場合は route の配線ミスなので 500 を返す（client の責任ではない）
pub struct AuthCtxExtractor(pub AuthCtx);

impl<S> FromRequestParts<S> for AuthCtxExtractor
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthCtx>()
            .cloned()
            .map(AuthCtxExtractor)
            .ok_or_else(|| {
                tracing::error!(
                    path = %parts.uri.path(),
                    "AuthCtx missing: route is not behind a required gate"
                );
                AppError::Internal
            })
    }
}

/// optional gate の後ろで使う extractor。匿名なら `None`。
pub struct MaybeAuthCtx(pub Option<AuthCtx>);

impl<S> FromRequestParts<S> for MaybeAuthCtx
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeAuthCtx(parts.extensions.get::<AuthCtx>().cloned()))
    }
}
