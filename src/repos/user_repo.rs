/*
 * Responsibility
 * - users テーブル向け SQLx 操作 (認証では id による参照のみ)
 * - PgPool を受け取り、見つからない場合は None を返す
 * - DB エラーは RepoError に変換して返す
 */
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool};

use crate::repos::error::RepoError;

/// A persisted user as read by the gate. Owned and mutated elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub display_name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

pub async fn get(db: &PgPool, user_id: i64) -> Result<Option<User>, RepoError> {
    let row = sqlx::query_as::<_, User>(
        r#"
        SELECT id, email, display_name, is_active, created_at
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(db)
    .await?;

    Ok(row)
}
