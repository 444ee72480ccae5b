//! In-memory implementations.

mod connection;

pub use connection::InMemoryConnectionRegistry;
