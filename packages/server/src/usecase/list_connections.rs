//! UseCase: 接続一覧取得

use std::sync::Arc;

use crate::domain::{Connection, ConnectionRegistry};

/// 接続一覧取得のユースケース（`GET /api/connections`）
pub struct ListConnectionsUseCase {
    registry: Arc<dyn ConnectionRegistry>,
}

impl ListConnectionsUseCase {
    pub fn new(registry: Arc<dyn ConnectionRegistry>) -> Self {
        Self { registry }
    }

    /// 接続時刻の古い順
    pub async fn execute(&self) -> Vec<Connection> {
        let mut connections = self.registry.list().await;
        connections.sort_by_key(|c| c.connected_at);
        connections
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ConnectionId, Timestamp};
    use crate::infrastructure::repository::InMemoryConnectionRegistry;

    #[tokio::test]
    async fn test_list_connections_sorted_by_connected_at() {
        // テスト項目: 接続一覧が接続時刻順に返される
        // given (前提条件):
        let registry = Arc::new(InMemoryConnectionRegistry::new());
        for (id, at) in [("late", 3000), ("early", 1000), ("middle", 2000)] {
            registry
                .register(Connection::new(
                    ConnectionId::new(id.to_string()).unwrap(),
                    Timestamp::new(at),
                ))
                .await
                .unwrap();
        }
        let usecase = ListConnectionsUseCase::new(registry);

        // when (操作):
        let connections = usecase.execute().await;

        // then (期待する結果):
        let ids: Vec<&str> = connections.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["early", "middle", "late"]);
    }
}
