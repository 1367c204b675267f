/*
 * Responsibility
 * - middleware の公開インターフェース (re-export)
 * - auth::apply(...), http::apply(...), cors::apply(...) など
 */
pub mod auth;
pub mod cors;
pub mod http;
pub mod security_headers;
