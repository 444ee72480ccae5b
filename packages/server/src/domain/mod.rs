//! Domain layer: ride state machine, value objects and the interfaces the
//! use cases depend on.
//!
//! Nothing in this module touches sockets or timers. The timed parts of the
//! ride live in the use case layer and call into the pure transitions here.

pub mod entity;
pub mod error;
pub mod event;
pub mod event_pusher;
pub mod factory;
pub mod motion;
pub mod random;
pub mod repository;
pub mod value_object;

pub use entity::{Connection, DriverRecord, RideRequest, RideSession, RideStatus};
pub use error::{DomainError, EventPushError, RepositoryError, RideError};
pub use event::RideEvent;
pub use event_pusher::{PusherChannel, RideEventPusher};
#[cfg(test)]
pub use event_pusher::MockRideEventPusher;
pub use factory::{ConnectionIdFactory, DriverFactory, DriverProfile, MAX_JITTER_DEGREES};
pub use motion::{DEFAULT_STEP_DELAY, DEFAULT_STEPS, MotionConfig, MotionPlan};
pub use random::RandomSource;
pub use repository::ConnectionRegistry;
pub use value_object::{ConnectionId, Coordinate, DriverId, Timestamp};
