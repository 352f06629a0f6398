use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use chrono::Utc;
use futures::SinkExt;
use futures::StreamExt;
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::order::OrderEvent;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct WsQuery {
    /// Restricts the stream to one order's lifecycle. Without it the client
    /// sees every status event.
    pub order_id: Option<Uuid>,
}

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Query(query): Query<WsQuery>,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state, query.order_id))
}

fn event_matches(watched: Option<Uuid>, event: &OrderEvent) -> bool {
    match watched {
        Some(order_id) => order_id == event.order_id,
        None => true,
    }
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, watched: Option<Uuid>) {
    let (mut sender, mut receiver) = socket.split();
    let mut rx = state.order_events_tx.subscribe();

    info!(order_id = ?watched, "websocket client connected");

    // A client watching one order gets its current status immediately, so a
    // connection made mid-lifecycle does not sit silent until the next
    // transition.
    if let Some(order_id) = watched {
        let snapshot = state.orders.get(&order_id).map(|order| OrderEvent {
            order_id,
            status: order.status,
            at: Utc::now(),
        });

        if let Some(event) = snapshot {
            match serde_json::to_string(&event) {
                Ok(json) => {
                    if sender.send(Message::Text(json.into())).await.is_err() {
                        return;
                    }
                }
                Err(err) => warn!(error = %err, "failed to serialize status snapshot for ws"),
            }
        }
    }

    let send_task = tokio::spawn(async move {
        while let Ok(event) = rx.recv().await {
            if !event_matches(watched, &event) {
                continue;
            }

            let json = match serde_json::to_string(&event) {
                Ok(json) => json,
                Err(err) => {
                    warn!(error = %err, "failed to serialize order event for ws");
                    continue;
                }
            };

            if sender.send(Message::Text(json.into())).await.is_err() {
                break;
            }
        }
    });

    let recv_task = tokio::spawn(async move {
        while let Some(Ok(_msg)) = receiver.next().await {}
    });

    tokio::select! {
        _ = send_task => {},
        _ = recv_task => {},
    }

    info!("websocket client disconnected");
}
