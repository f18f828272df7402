use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};

use crate::features::sync::Broadcaster;

/// GET /ws: upgrade to the sync WebSocket
#[utoipa::path(
    get,
    path = "/ws",
    responses(
        (status = 101, description = "Switching protocols to WebSocket")
    ),
    tag = "sync"
)]
pub async fn ws_upgrade(
    State(broadcaster): State<Arc<Broadcaster>>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, broadcaster))
}

async fn handle_socket(socket: WebSocket, broadcaster: Arc<Broadcaster>) {
    let (id, mut rx) = broadcaster.subscribe();
    tracing::info!(
        subscriber_id = id,
        total = broadcaster.subscriber_count(),
        "Sync client connected"
    );

    let (mut ws_sink, mut ws_stream) = socket.split();

    loop {
        tokio::select! {
            queued = rx.recv() => {
                let Some(msg) = queued else { break };
                let json = match serde_json::to_string(&msg) {
                    Ok(json) => json,
                    Err(e) => {
                        tracing::error!(subscriber_id = id, "Failed to encode sync message: {}", e);
                        continue;
                    }
                };
                if ws_sink.send(Message::Text(json.into())).await.is_err() {
                    break;
                }
            }
            incoming = ws_stream.next() => {
                match incoming {
                    // Clients only listen; anything they send is ignored.
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                    Some(Ok(_)) => {}
                }
            }
        }
    }

    broadcaster.unsubscribe(id);
    tracing::info!(
        subscriber_id = id,
        total = broadcaster.subscriber_count(),
        "Sync client disconnected"
    );
}
