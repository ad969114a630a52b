use crate::models::ChatEvent;
use crate::state::ChatAppState;
use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};

/// WebSocket handler for real-time transcript and lifecycle events
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<ChatAppState>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: ChatAppState) {
    let (mut sender, mut receiver) = socket.split();

    // Subscribe before the initial snapshot so no event is missed in between.
    let mut events = state.event_bus.subscribe();

    // Send an initial stats snapshot; the client fetches the transcript over
    // the REST endpoint and only receives deltas here.
    let initial = ChatEvent::StatsUpdate(state.metrics.snapshot(state.transcript.len()));
    if let Ok(msg) = serde_json::to_string(&initial) {
        let _ = sender.send(Message::Text(msg)).await;
    }

    // Event forwarding task
    let send_task = tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            match serde_json::to_string(&event) {
                Ok(msg) => {
                    if sender.send(Message::Text(msg)).await.is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::error!("Failed to serialize event: {}", e);
                }
            }
        }
    });

    // Receive task (handle client close/pings)
    let recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            match msg {
                Message::Close(_) => break,
                Message::Ping(data) => {
                    // Pong is handled automatically by axum
                    tracing::trace!("Received ping: {:?}", data);
                }
                Message::Text(text) => {
                    tracing::trace!("Received message: {}", text);
                }
                _ => {}
            }
        }
    });

    // Wait for either task to complete
    tokio::select! {
        _ = send_task => {
            tracing::debug!("Send task completed");
        }
        _ = recv_task => {
            tracing::debug!("Receive task completed");
        }
    }
}
