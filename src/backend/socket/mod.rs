//! WebSocket Echo Endpoint
//!
//! `WS /ws/{user_id}` answers every text frame with
//! `"Message received: <text>"`. It is unauthenticated and independent of
//! the chat workflow; live chat traffic goes through the real-time gateway.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Path,
    },
    response::Response,
};

/// Reply sent for an incoming text frame
pub fn echo_reply(text: &str) -> String {
    format!("Message received: {}", text)
}

/// Upgrade handler (GET /ws/{user_id})
pub async fn websocket_handler(ws: WebSocketUpgrade, Path(user_id): Path<String>) -> Response {
    ws.on_upgrade(move |socket| echo(socket, user_id))
}

async fn echo(mut socket: WebSocket, user_id: String) {
    tracing::debug!("WebSocket connected for user {}", user_id);

    while let Some(frame) = socket.recv().await {
        match frame {
            Ok(Message::Text(text)) => {
                let reply = echo_reply(text.as_str());
                if socket.send(Message::Text(reply.into())).await.is_err() {
                    break;
                }
            }
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(e) => {
                tracing::debug!("WebSocket error for user {}: {}", user_id, e);
                break;
            }
        }
    }

    tracing::info!("WebSocket disconnected for user {}", user_id);
}
