//! Shared utilities for the Ridelink server and client.

pub mod logger;
pub mod time;
