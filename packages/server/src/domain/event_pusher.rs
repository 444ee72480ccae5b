//! Event pusher trait.
//!
//! The use cases push domain events through this interface; the concrete
//! transport (WebSocket) lives in the infrastructure layer.

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{error::EventPushError, event::RideEvent, value_object::ConnectionId};

/// Outbound channel of one connection, carrying serialized frames.
pub type PusherChannel = mpsc::UnboundedSender<String>;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RideEventPusher: Send + Sync {
    /// Register the outbound channel of a connection
    async fn register_connection(&self, connection_id: ConnectionId, sender: PusherChannel);

    /// Drop the outbound channel of a connection
    async fn unregister_connection(&self, connection_id: &ConnectionId);

    /// Push one event to one connection
    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        event: RideEvent,
    ) -> Result<(), EventPushError>;
}
