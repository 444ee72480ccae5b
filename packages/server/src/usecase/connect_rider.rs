//! UseCase: ライダー接続処理
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規接続の登録（レジストリ + イベント送信チャンネル）
//! - 異常系：同じ接続 ID での二重登録

use std::sync::Arc;

use ridelink_shared::time::Clock;

use crate::domain::{
    Connection, ConnectionId, ConnectionRegistry, PusherChannel, RideEventPusher, Timestamp,
};

use super::error::ConnectError;

/// ライダー接続のユースケース
pub struct ConnectRiderUseCase {
    /// ConnectionRegistry（接続一覧、メトリクス・ログ用途のみ）
    registry: Arc<dyn ConnectionRegistry>,
    /// RideEventPusher（イベント通知の抽象化）
    event_pusher: Arc<dyn RideEventPusher>,
    clock: Arc<dyn Clock>,
}

impl ConnectRiderUseCase {
    pub fn new(
        registry: Arc<dyn ConnectionRegistry>,
        event_pusher: Arc<dyn RideEventPusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            registry,
            event_pusher,
            clock,
        }
    }

    /// 接続を登録する
    ///
    /// # Returns
    ///
    /// * `Ok(Timestamp)` - 接続時刻
    /// * `Err(ConnectError)` - 既に登録済みの接続 ID
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        sender: PusherChannel,
    ) -> Result<Timestamp, ConnectError> {
        let connected_at = Timestamp::new(self.clock.now_millis());

        // 1. Registry に追加（重複はここで弾かれる）
        self.registry
            .register(Connection::new(connection_id.clone(), connected_at))
            .await?;
        tracing::debug!(
            "Registered '{}' ({} open connections)",
            connection_id,
            self.registry.count().await
        );

        // 2. EventPusher に送信チャンネルを登録
        self.event_pusher
            .register_connection(connection_id, sender)
            .await;

        Ok(connected_at)
    }
}
