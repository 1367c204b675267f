/*!
 * Bearer authentication gate
 *
 * Responsibility:
 * - token の取り出し (header / query) → 検証 → user 解決 → AuthCtx を extensions へ
 * - 失敗時の扱いは mode ごと (401 で打ち切り / 匿名のまま続行)
 *
 * Public API:
 * - apply / require_auth / optional_auth / websocket_auth
 * - authenticate / bind
 * - AuthMode, CredentialSource, FailurePolicy
 */
mod access;
mod credentials;
mod trace;

pub use access::{apply, authenticate, bind, optional_auth, require_auth, websocket_auth};
pub use credentials::{AuthMode, BEARER_PREFIX, CredentialSource, FailurePolicy, TOKEN_QUERY_PARAM};
