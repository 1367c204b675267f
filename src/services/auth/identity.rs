//! Subject → user resolution.
//!
//! No cache: every authentication hits the store so that a deactivation or
//! deletion takes effect on the very next request.

use crate::error::AuthError;
use crate::repos::user_repo::User;
use crate::services::users::UserStore;

pub async fn resolve_identity(store: &dyn UserStore, user_id: i64) -> Result<User, AuthError> {
    let user = store
        .find_by_id(user_id)
        .await
        .map_err(|err| {
            tracing::error!(error = ?err, backend = store.backend_name(), "user lookup failed");
            AuthError::Store(err)
        })?
        .ok_or(AuthError::UserNotFound(user_id))?;

    if !user.is_active {
        return Err(AuthError::InactiveAccount(user_id));
    }

    Ok(user)
}
