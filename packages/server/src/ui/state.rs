//! Shared application state.

use std::sync::Arc;

use crate::usecase::{
    ConnectRiderUseCase, DisconnectRiderUseCase, ListConnectionsUseCase, RideSessionFactory,
};

pub struct AppState {
    /// ConnectRiderUseCase（接続登録のユースケース）
    pub connect_rider_usecase: Arc<ConnectRiderUseCase>,
    /// DisconnectRiderUseCase（切断のユースケース）
    pub disconnect_rider_usecase: Arc<DisconnectRiderUseCase>,
    /// ListConnectionsUseCase（接続一覧取得のユースケース）
    pub list_connections_usecase: Arc<ListConnectionsUseCase>,
    /// 接続ごとの配車セッションを生成する
    pub ride_session_factory: Arc<RideSessionFactory>,
}
