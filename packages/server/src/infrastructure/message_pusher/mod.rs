//! Event push implementations.
//!
//! - `websocket`: pushes serialized events into the per-connection channel
//!   drained by the WebSocket writer task

pub mod websocket;

pub use websocket::WebSocketRideEventPusher;
