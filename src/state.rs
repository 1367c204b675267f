/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - users: UserStore, auth: TokenVerifier, auth_trace: 診断ログの有無
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 * - リクエストをまたいで変更される状態は持たない
 */
use std::sync::Arc;

use crate::services::{auth::TokenVerifier, users::UserStore};

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub auth: Arc<TokenVerifier>,
    pub auth_trace: bool,
}

impl AppState {
    pub fn new(users: Arc<dyn UserStore>, auth: Arc<TokenVerifier>) -> Self {
        Self {
            users,
            auth,
            auth_trace: false,
        }
    }

    pub fn with_auth_trace(mut self, enabled: bool) -> Self {
        self.auth_trace = enabled;
        self
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("users", &self.users.backend_name())
            .field("auth", &self.auth)
            .field("auth_trace", &self.auth_trace)
            .finish()
    }
}
