//! WebSocket connection handlers.
//!
//! One connection is one rider. The handler owns the rider's
//! `RideSessionCoordinator` for as long as the socket is open.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, StreamExt},
};
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionIdFactory, RideError, RideRequest},
    infrastructure::dto::websocket::ClientCommand,
    ui::state::AppState,
    usecase::RideSessionCoordinator,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Drains the connection's outbound channel into the WebSocket sink.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            if sender.send(Message::Text(frame.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let connection_id = ConnectionIdFactory::generate();
    let (tx, rx) = mpsc::unbounded_channel();

    match state
        .connect_rider_usecase
        .execute(connection_id.clone(), tx)
        .await
    {
        Ok(connected_at) => {
            tracing::info!(
                "Rider '{}' connected at {}",
                connection_id,
                connected_at.value()
            );
        }
        Err(e) => {
            tracing::warn!("Rejecting connection '{}': {}", connection_id, e);
            return;
        }
    }

    let coordinator = Arc::new(state.ride_session_factory.create(connection_id.clone()));
    let (sender, mut receiver) = socket.split();

    let coordinator_for_recv = coordinator.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error: {}", e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    tracing::debug!("Received text: {}", text.as_str());
                    handle_command(&coordinator_for_recv, text.as_str()).await;
                }
                Message::Ping(_) => {
                    tracing::debug!("Received ping");
                }
                Message::Close(_) => {
                    tracing::info!(
                        "Rider '{}' requested close",
                        coordinator_for_recv.connection_id()
                    );
                    break;
                }
                _ => {}
            }
        }
    });

    let mut send_task = pusher_loop(rx, sender);

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    // 切断時はセッションを破棄する（配車は継続しない）
    coordinator.shutdown().await;

    match state
        .disconnect_rider_usecase
        .execute(&connection_id)
        .await
    {
        Ok(()) => tracing::info!("Rider '{}' disconnected", connection_id),
        Err(e) => tracing::warn!("Failed to disconnect '{}': {}", connection_id, e),
    }
}

async fn handle_command(coordinator: &RideSessionCoordinator, text: &str) {
    let command = match serde_json::from_str::<ClientCommand>(text) {
        Ok(command) => command,
        Err(e) => {
            coordinator
                .report_error(&RideError::InvalidCommand(e.to_string()))
                .await;
            return;
        }
    };

    match command {
        ClientCommand::RequestRide(payload) => match RideRequest::try_from(payload) {
            // rejection is already reported to the rider by the coordinator
            Ok(request) => {
                let _ = coordinator.request_ride(request).await;
            }
            Err(e) => coordinator.report_error(&RideError::from(e)).await,
        },
        ClientCommand::CancelRide => {
            coordinator.cancel_ride().await;
        }
    }
}
