//! WebSocket Comment Stream Handler
//!
//! Streams newly created comments on a post to connected clients. Each
//! connection holds one hub subscription, released on every exit path so a
//! gone client never lingers in the registry.

use axum::{
    extract::{
        ws::{Message, WebSocket},
        Path, State, WebSocketUpgrade,
    },
    response::Response,
};
use futures::{SinkExt, StreamExt};

use crate::startup::AppState;

/// WebSocket upgrade handler for `/ws/posts/{post_id}/comments`
pub async fn ws_comments_handler(
    ws: WebSocketUpgrade,
    Path(post_id): Path<String>,
    State(state): State<AppState>,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, post_id, state))
}

/// Drive one subscriber connection until the client or the hub goes away.
async fn handle_socket(socket: WebSocket, post_id: String, state: AppState) {
    let (handle, mut rx) = state.hub.subscribe(&post_id);

    tracing::debug!(post_id = %post_id, "comment subscriber connected");

    let (mut sender, mut receiver) = socket.split();

    loop {
        tokio::select! {
            comment = rx.recv() => {
                match comment {
                    Some(comment) => {
                        let text = match serde_json::to_string(&comment) {
                            Ok(text) => text,
                            Err(e) => {
                                tracing::error!(error = %e, "failed to serialize comment");
                                continue;
                            }
                        };
                        if sender.send(Message::Text(text.into())).await.is_err() {
                            break;
                        }
                    }
                    // Channel closed: the hub shut down
                    None => {
                        let _ = sender.send(Message::Close(None)).await;
                        break;
                    }
                }
            }

            msg = receiver.next() => {
                match msg {
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                    // Ping/pong are answered by axum; client text is ignored
                    _ => {}
                }
            }
        }
    }

    state.hub.unsubscribe(&handle);

    tracing::debug!(post_id = %handle.post_id(), "comment subscriber disconnected");
}
