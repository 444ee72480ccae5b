//! Events the coordinator emits towards the rider.

use super::{
    entity::{DriverRecord, RideStatus},
    error::RideError,
    value_object::Coordinate,
};

/// Server-to-client ride event.
#[derive(Debug, Clone, PartialEq)]
pub enum RideEvent {
    DriverAssigned(DriverRecord),
    DriverLocation(Coordinate),
    RideStatus(RideStatus),
    RideError { code: String, message: String },
}

impl RideEvent {
    /// Wire name of the event.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::DriverAssigned(_) => "driverAssigned",
            Self::DriverLocation(_) => "driverLocation",
            Self::RideStatus(_) => "rideStatus",
            Self::RideError { .. } => "rideError",
        }
    }
}

impl From<&RideError> for RideEvent {
    fn from(err: &RideError) -> Self {
        Self::RideError {
            code: err.code().to_string(),
            message: err.to_string(),
        }
    }
}
