//! Connection registry trait.
//!
//! The registry only records which connections are open, for logging and
//! the operational HTTP endpoints. Ride state is never stored here: each
//! session is owned by its connection handler.

use async_trait::async_trait;

use super::{entity::Connection, error::RepositoryError, value_object::ConnectionId};

#[async_trait]
pub trait ConnectionRegistry: Send + Sync {
    /// Record a newly opened connection
    async fn register(&self, connection: Connection) -> Result<(), RepositoryError>;

    /// Forget a closed connection
    async fn unregister(&self, connection_id: &ConnectionId) -> Result<(), RepositoryError>;

    /// All open connections, oldest first
    async fn list(&self) -> Vec<Connection>;

    /// Number of open connections
    async fn count(&self) -> usize;
}
