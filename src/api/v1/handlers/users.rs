/*
 * Responsibility
 * - GET /me: required gate の後ろ。AuthCtx をそのまま返す
 * - GET /greeting: optional gate の後ろ。匿名でも 200
 */
use axum::Json;

use crate::api::v1::{
    dto::users::{GreetingResponse, UserResponse},
    extractors::{AuthCtxExtractor, MaybeAuthCtx},
};

pub async fn me(AuthCtxExtractor(ctx): AuthCtxExtractor) -> Json<UserResponse> {
    Json(UserResponse::from(ctx))
}

pub async fn greeting(MaybeAuthCtx(ctx): MaybeAuthCtx) -> Json<GreetingResponse> {
    let res = match ctx {
        Some(ctx) => GreetingResponse {
            message: format!("Welcome back, {}!", ctx.user().display_name),
            authenticated: true,
            user_id: Some(ctx.user_id()),
        },
        None => GreetingResponse {
            message: "Welcome, guest!".to_string(),
            authenticated: false,
            user_id: None,
        },
    };

    Json(res)
}
