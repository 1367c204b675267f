/*
 * Responsibility
 * - Handler から見える「認証済みコンテキスト」の型
 * - middleware が検証して request extensions に格納し、handler はこの型だけを受け取る
 *
 * Notes
 * - extensions は型で引くので、文字列キーの取り違えは起きない
 * - request/connection の寿命を超えて保持しない
 */
use crate::repos::user_repo::User;

/// 認証済みのリクエストに付与されるコンテキスト
///
/// - `user` は store から読んだ時点の user (is_active == true)
/// - `user_id` は `user.id` と常に一致する (構築は `new` のみ)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthCtx {
    user: User,
    user_id: i64,
}

impl AuthCtx {
    pub fn new(user: User) -> Self {
        Self {
            user_id: user.id,
            user,
        }
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    pub fn into_user(self) -> User {
        self.user
    }
}
