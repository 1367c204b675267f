/*
 * Responsibility
 * - tracing / panic hook の初期化
 * - Config読み込み → 依存生成 (UserStore, TokenVerifier) → Router 組み立て
 * - Middleware の適用 (HTTP/CORS/security headers。認証 gate は routes 側)
 * - axum::serve() で起動
 */
use std::{panic, process, sync::Arc, time::Duration};

use anyhow::Result;
use axum::Router;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    api,
    config::Config,
    middleware,
    services::{auth::build_token_verifier, users::PgUserStore},
    state::AppState,
};

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,bearer_gate=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        tracing::error!(?info, "panic");

        // Development: crash the whole process so we notice immediately.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;
    init_panic_hook(!config.app_env.is_production());

    tracing::info!(?config, "starting bearer gate");

    let state = build_state(&config).await?;
    let app = build_app(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, "listening");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn build_state(config: &Config) -> Result<AppState> {
    let users =
        PgUserStore::connect(&config.database_url, config.database_max_connections).await?;
    let auth = build_token_verifier(config);

    Ok(AppState::new(Arc::new(users), auth).with_auth_trace(config.auth_trace))
}

/// API routes with the auth gates installed, state attached, no outer layers.
pub fn router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", api::v1::routes(state.clone()))
        .with_state(state)
}

/// `router` plus the process-wide HTTP, CORS and security-header layers.
pub fn build_app(state: AppState, config: &Config) -> Router {
    let app = router(state);
    let app = middleware::security_headers::apply(app);
    let app = middleware::cors::apply(app, config);
    middleware::http::apply(app, Duration::from_secs(config.request_timeout_seconds))
}
