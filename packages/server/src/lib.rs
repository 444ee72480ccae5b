//! Simulated ride dispatch server.
//!
//! A rider connects over WebSocket and requests a ride; the server fabricates
//! a nearby driver, animates it towards the pickup and then the drop point,
//! and reports every step and phase change back to the rider.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
