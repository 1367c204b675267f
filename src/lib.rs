//! Bearer-token authentication gate for an axum service.
//!
//! Three gates share one verify → resolve → bind routine:
//! - required: `Authorization: Bearer <jwt>`, 401 on any failure
//! - optional: same header, anonymous on any failure
//! - websocket: `?token=<jwt>` on the upgrade request, 401 on any failure

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod repos;
pub mod services;
pub mod state;

pub use api::v1::extractors::AuthCtx;
pub use error::{AppError, AuthError};
pub use middleware::auth::AuthMode;
pub use state::AppState;
