use async_trait::async_trait;

use crate::repos::error::RepoError;
use crate::repos::user_repo::User;

/// Lookup-by-id collaborator used by the gate.
///
/// Implementations must tolerate concurrent calls from many request tasks.
/// Callers may drop the returned future at any time (client gone, request
/// deadline hit); implementations must not rely on running to completion.
#[async_trait]
pub trait UserStore: Send + Sync {
    // Returns the store backend name (for logging).
    fn backend_name(&self) -> &'static str;

    // `Ok(None)` when no user has this id.
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, RepoError>;
}
