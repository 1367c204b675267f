/*
 * Responsibility
 * - GET /ws (WebSocket, websocket gate の後ろ)
 * - gate が ?token= を検証済み。ここに来た時点で AuthCtx は必ずある
 * - 接続後は connected を送り、text frame を echo する
 */
use axum::{
    extract::ws::{Message, WebSocket, WebSocketUpgrade, rejection::WebSocketUpgradeRejection},
    response::{IntoResponse, Response},
};
use futures::{SinkExt, StreamExt};
use serde::Serialize;

use crate::api::v1::extractors::AuthCtxExtractor;

/// Messages sent from server to client.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Connection established for this user
    Connected { user_id: i64, display_name: String },
    /// Echo of a client text frame
    Echo { text: String },
}

pub async fn ws_handler(
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    ws: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
) -> Response {
    let ws = match ws {
        Ok(ws) => ws,
        Err(rejection) => return rejection.into_response(),
    };

    let user_id = ctx.user_id();
    let hello = ServerMessage::Connected {
        user_id,
        display_name: ctx.into_user().display_name,
    };

    ws.on_upgrade(move |socket| handle_socket(socket, user_id, hello))
}

async fn handle_socket(socket: WebSocket, user_id: i64, hello: ServerMessage) {
    let (mut sender, mut receiver) = socket.split();

    if send_json(&mut sender, &hello).await.is_err() {
        return;
    }
    tracing::info!(user_id, "websocket connected");

    while let Some(Ok(msg)) = receiver.next().await {
        match msg {
            Message::Text(text) => {
                let echo = ServerMessage::Echo {
                    text: text.as_str().to_owned(),
                };
                if send_json(&mut sender, &echo).await.is_err() {
                    break;
                }
            }
            Message::Close(_) => break,
            _ => {}
        }
    }

    tracing::info!(user_id, "websocket disconnected");
}

async fn send_json<S>(sender: &mut S, msg: &ServerMessage) -> Result<(), ()>
where
    S: futures::Sink<Message> + Unpin,
{
    let json = serde_json::to_string(msg).map_err(|_| ())?;
    sender.send(Message::Text(json.into())).await.map_err(|_| ())
}
