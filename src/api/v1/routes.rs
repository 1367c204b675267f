/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - route ごとに gate の mode を決める
 *   - /health: なし
 *   - /me: Required (Authorization: Bearer)
 *   - /greeting: Optional (Authorization: Bearer, 失敗しても続行)
 *   - /ws: WebSocket (?token=)
 */
use axum::{Router, routing::get};

use crate::middleware::auth::{self, AuthMode};
use crate::state::AppState;

use crate::api::v1::handlers::{
    health::health,
    users::{greeting, me},
    ws::ws_handler,
};

pub fn routes(state: AppState) -> Router<AppState> {
    let public = Router::new().route("/health", get(health));

    let protected = auth::apply(
        Router::new().route("/me", get(me)),
        state.clone(),
        AuthMode::Required,
    );

    let personalized = auth::apply(
        Router::new().route("/greeting", get(greeting)),
        state.clone(),
        AuthMode::Optional,
    );

    let realtime = auth::apply(
        Router::new().route("/ws", get(ws_handler)),
        state,
        AuthMode::WebSocket,
    );

    public.merge(protected).merge(personalized).merge(realtime)
}
