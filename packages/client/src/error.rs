//! Error types for the rider client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClientError {
    /// A ride was requested before both pickup and drop were chosen
    #[error("Select pickup and drop first")]
    MissingLocations,

    /// The typed command could not be understood
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    /// The server URL is not a WebSocket URL
    #[error("Invalid server URL '{0}' (expected ws:// or wss://)")]
    InvalidUrl(String),

    /// Connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),
}
