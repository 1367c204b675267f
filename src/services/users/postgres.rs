use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::repos::{error::RepoError, user_repo, user_repo::User};
use crate::services::users::store::UserStore;

/// Postgres-backed user store (`users` table).
#[derive(Clone, Debug)]
pub struct PgUserStore {
    db: PgPool,
}

impl PgUserStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    // Connect a pool; fails when the database cannot be reached at startup.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, RepoError> {
        let db = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        Ok(Self::new(db))
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, RepoError> {
        user_repo::get(&self.db, id).await
    }
}
