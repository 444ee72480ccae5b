//! WebSocket implementation of `RideEventPusher`.
//!
//! The socket itself is owned by the UI layer (`ui::handler::websocket`).
//! This pusher only keeps the `UnboundedSender` of each connection and turns
//! domain events into JSON frames.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    domain::{ConnectionId, EventPushError, PusherChannel, RideEvent, RideEventPusher},
    infrastructure::dto::websocket::ServerEvent,
};

/// WebSocket-backed event pusher.
///
/// Key: connection id, value: outbound frame channel of that connection.
pub struct WebSocketRideEventPusher {
    connections: Arc<Mutex<HashMap<ConnectionId, PusherChannel>>>,
}

impl WebSocketRideEventPusher {
    pub fn new(connections: Arc<Mutex<HashMap<ConnectionId, PusherChannel>>>) -> Self {
        Self { connections }
    }
}

impl Default for WebSocketRideEventPusher {
    fn default() -> Self {
        Self::new(Arc::new(Mutex::new(HashMap::new())))
    }
}

#[async_trait]
impl RideEventPusher for WebSocketRideEventPusher {
    async fn register_connection(&self, connection_id: ConnectionId, sender: PusherChannel) {
        let mut connections = self.connections.lock().await;
        tracing::debug!("Connection '{}' registered to event pusher", connection_id);
        connections.insert(connection_id, sender);
    }

    async fn unregister_connection(&self, connection_id: &ConnectionId) {
        let mut connections = self.connections.lock().await;
        connections.remove(connection_id);
        tracing::debug!("Connection '{}' unregistered from event pusher", connection_id);
    }

    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        event: RideEvent,
    ) -> Result<(), EventPushError> {
        let name = event.name();
        let frame = serde_json::to_string(&ServerEvent::from(event))
            .map_err(|e| EventPushError::PushFailed(e.to_string()))?;

        let connections = self.connections.lock().await;
        let sender = connections
            .get(connection_id)
            .ok_or_else(|| EventPushError::ConnectionNotFound(connection_id.to_string()))?;
        sender
            .send(frame)
            .map_err(|e| EventPushError::PushFailed(e.to_string()))?;

        tracing::trace!("Pushed '{}' to connection '{}'", name, connection_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Coordinate, RideStatus};
    use tokio::sync::mpsc;

    fn connection_id(value: &str) -> ConnectionId {
        ConnectionId::new(value.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_push_to_success() {
        // テスト項目: 登録済みの接続にイベントが JSON で送信される
        // given (前提条件):
        let pusher = WebSocketRideEventPusher::default();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let id = connection_id("conn-1");
        pusher.register_connection(id.clone(), tx).await;

        // when (操作):
        let result = pusher
            .push_to(&id, RideEvent::RideStatus(RideStatus::Ongoing))
            .await;

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(
            rx.recv().await,
            Some(r#"{"type":"rideStatus","payload":"ongoing"}"#.to_string())
        );
    }

    #[tokio::test]
    async fn test_push_to_unknown_connection() {
        // テスト項目: 未登録の接続への送信は ConnectionNotFound になる
        // given (前提条件):
        let pusher = WebSocketRideEventPusher::default();

        // when (操作):
        let result = pusher
            .push_to(
                &connection_id("ghost"),
                RideEvent::DriverLocation(Coordinate::new(1.0, 2.0).unwrap()),
            )
            .await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(EventPushError::ConnectionNotFound("ghost".to_string()))
        );
    }

    #[tokio::test]
    async fn test_push_to_closed_channel() {
        // テスト項目: 受信側が閉じた接続への送信は PushFailed になる
        // given (前提条件):
        let pusher = WebSocketRideEventPusher::default();
        let (tx, rx) = mpsc::unbounded_channel();
        let id = connection_id("conn-1");
        pusher.register_connection(id.clone(), tx).await;
        drop(rx);

        // when (操作):
        let result = pusher
            .push_to(&id, RideEvent::RideStatus(RideStatus::Idle))
            .await;

        // then (期待する結果):
        assert!(matches!(result, Err(EventPushError::PushFailed(_))));
    }

    #[tokio::test]
    async fn test_unregistered_connection_no_longer_receives() {
        // テスト項目: 登録解除後の接続には送信されない
        // given (前提条件):
        let pusher = WebSocketRideEventPusher::default();
        let (tx, _rx) = mpsc::unbounded_channel();
        let id = connection_id("conn-1");
        pusher.register_connection(id.clone(), tx).await;

        // when (操作):
        pusher.unregister_connection(&id).await;
        let result = pusher
            .push_to(&id, RideEvent::RideStatus(RideStatus::Idle))
            .await;

        // then (期待する結果):
        assert!(matches!(result, Err(EventPushError::ConnectionNotFound(_))));
    }

    #[tokio::test]
    async fn test_connections_are_isolated() {
        // テスト項目: イベントは指定した接続にのみ届く
        // given (前提条件):
        let pusher = WebSocketRideEventPusher::default();
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, mut rx2) = mpsc::unbounded_channel();
        pusher.register_connection(connection_id("a"), tx1).await;
        pusher.register_connection(connection_id("b"), tx2).await;

        // when (操作):
        pusher
            .push_to(&connection_id("a"), RideEvent::RideStatus(RideStatus::Completed))
            .await
            .unwrap();

        // then (期待する結果):
        assert!(rx1.try_recv().is_ok());
        assert!(rx2.try_recv().is_err());
    }
}
