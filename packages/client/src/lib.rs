//! Rider client for the simulated ride dispatch server.
//!
//! Keeps the booking state, estimates route and fare locally and talks to
//! the server over WebSocket.

pub mod booking;
pub mod error;
pub mod fare;
pub mod route;

mod domain;
mod formatter;
mod runner;
mod session;
mod ui;

pub use runner::run_client;
