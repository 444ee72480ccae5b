//! UseCase layer: connection bookkeeping and the per-connection ride flow.

pub mod connect_rider;
pub mod disconnect_rider;
pub mod error;
pub mod list_connections;
pub mod motion;
pub mod ride_session;

pub use connect_rider::ConnectRiderUseCase;
pub use disconnect_rider::DisconnectRiderUseCase;
pub use error::{ConnectError, DisconnectError};
pub use list_connections::ListConnectionsUseCase;
pub use motion::{MotionHandle, MotionOutcome, MotionRun, MotionSink};
pub use ride_session::{RandomSourceFactory, RideSessionCoordinator, RideSessionFactory};
