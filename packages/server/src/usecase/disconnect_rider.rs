//! UseCase: ライダー切断処理

use std::sync::Arc;

use crate::domain::{ConnectionId, ConnectionRegistry, RideEventPusher};

use super::error::DisconnectError;

/// ライダー切断のユースケース
pub struct DisconnectRiderUseCase {
    registry: Arc<dyn ConnectionRegistry>,
    event_pusher: Arc<dyn RideEventPusher>,
}

impl DisconnectRiderUseCase {
    pub fn new(
        registry: Arc<dyn ConnectionRegistry>,
        event_pusher: Arc<dyn RideEventPusher>,
    ) -> Self {
        Self {
            registry,
            event_pusher,
        }
    }

    /// 切断を実行する
    ///
    /// 送信チャンネルはレジストリの結果に関わらず登録解除する。
    pub async fn execute(&self, connection_id: &ConnectionId) -> Result<(), DisconnectError> {
        self.event_pusher.unregister_connection(connection_id).await;
        self.registry.unregister(connection_id).await?;
        tracing::debug!(
            "Unregistered '{}' ({} open connections)",
            connection_id,
            self.registry.count().await
        );
        Ok(())
    }
}
