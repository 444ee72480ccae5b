//! In-memory connection registry.
//!
//! Keeps connections in insertion order in a `Vec`; the number of open
//! connections of a demo server is small enough for linear lookups.

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{Connection, ConnectionId, ConnectionRegistry, RepositoryError};

#[derive(Default)]
pub struct InMemoryConnectionRegistry {
    connections: Mutex<Vec<Connection>>,
}

impl InMemoryConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConnectionRegistry for InMemoryConnectionRegistry {
    async fn register(&self, connection: Connection) -> Result<(), RepositoryError> {
        let mut connections = self.connections.lock().await;
        if connections.iter().any(|c| c.id == connection.id) {
            return Err(RepositoryError::DuplicateConnection(
                connection.id.into_string(),
            ));
        }
        connections.push(connection);
        Ok(())
    }

    async fn unregister(&self, connection_id: &ConnectionId) -> Result<(), RepositoryError> {
        let mut connections = self.connections.lock().await;
        let index = connections
            .iter()
            .position(|c| &c.id == connection_id)
            .ok_or_else(|| RepositoryError::ConnectionNotFound(connection_id.to_string()))?;
        connections.remove(index);
        Ok(())
    }

    async fn list(&self) -> Vec<Connection> {
        self.connections.lock().await.clone()
    }

    async fn count(&self) -> usize {
        self.connections.lock().await.len()
    }
}
