use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::repos::{error::RepoError, user_repo::User};
use crate::services::users::store::UserStore;

/// In-process user store. Used by tests and local runs without a database.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<i64, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, user: User) {
        self.users.write().await.insert(user.id, user);
    }

    /// Returns false when the user does not exist.
    pub async fn set_active(&self, id: i64, is_active: bool) -> bool {
        match self.users.write().await.get_mut(&id) {
            Some(user) => {
                user.is_active = is_active;
                true
            }
            None => false,
        }
    }

    pub async fn remove(&self, id: i64) -> Option<User> {
        self.users.write().await.remove(&id)
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, RepoError> {
        Ok(self.users.read().await.get(&id).cloned())
    }
}
