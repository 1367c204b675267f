/*
 * Responsibility
 * - 認証済み user の response DTO
 * - is_active は gate を通った時点で常に true なので返さない
 */
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::api::v1::extractors::AuthCtx;

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub display_name: String,
    pub created_at: DateTime<Utc>,
}

impl From<AuthCtx> for UserResponse {
    fn from(ctx: AuthCtx) -> Self {
        let user = ctx.into_user();
        Self {
            id: user.id,
            email: user.email,
            display_name: user.display_name,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GreetingResponse {
    pub message: String,
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
}
