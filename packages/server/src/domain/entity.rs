//! Entities: the ride session state machine and the records it owns.

use std::{fmt, str::FromStr};

use super::{
    error::{DomainError, RideError},
    value_object::{ConnectionId, Coordinate, DriverId, Timestamp},
};

/// Ride lifecycle status.
///
/// ```text
/// idle -> requested -> driver_assigned -> driver_arriving -> ongoing -> completed
///            \_______________\_________________\_______________\____-> idle (cancel)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RideStatus {
    #[default]
    Idle,
    Requested,
    DriverAssigned,
    DriverArriving,
    Ongoing,
    Completed,
}

impl RideStatus {
    pub const ALL: [RideStatus; 6] = [
        RideStatus::Idle,
        RideStatus::Requested,
        RideStatus::DriverAssigned,
        RideStatus::DriverArriving,
        RideStatus::Ongoing,
        RideStatus::Completed,
    ];

    /// Wire name of the status.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Requested => "requested",
            Self::DriverAssigned => "driver_assigned",
            Self::DriverArriving => "driver_arriving",
            Self::Ongoing => "ongoing",
            Self::Completed => "completed",
        }
    }

    /// A ride is in flight and can be cancelled.
    pub const fn is_active(&self) -> bool {
        matches!(
            self,
            Self::Requested | Self::DriverAssigned | Self::DriverArriving | Self::Ongoing
        )
    }

    /// The single status a running ride may move to next, if any.
    const fn next(&self) -> Option<RideStatus> {
        match self {
            Self::DriverAssigned => Some(Self::DriverArriving),
            Self::DriverArriving => Some(Self::Ongoing),
            Self::Ongoing => Some(Self::Completed),
            _ => None,
        }
    }
}

impl fmt::Display for RideStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RideStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| DomainError::UnknownRideStatus(s.to_string()))
    }
}

/// Pickup/drop pair submitted by the rider. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct RideRequest {
    pub pickup: Coordinate,
    pub drop: Coordinate,
    /// Client-computed route distance, if the client had one
    pub distance_km: Option<f64>,
}

impl RideRequest {
    pub fn new(pickup: Coordinate, drop: Coordinate, distance_km: Option<f64>) -> Self {
        Self {
            pickup,
            drop,
            distance_km,
        }
    }
}

/// Fabricated driver assigned to a ride.
#[derive(Debug, Clone, PartialEq)]
pub struct DriverRecord {
    pub id: DriverId,
    pub name: String,
    pub car: String,
    pub photo: String,
    pub position: Coordinate,
}

/// An open WebSocket connection, as seen by the registry.
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    pub id: ConnectionId,
    pub connected_at: Timestamp,
}

impl Connection {
    pub fn new(id: ConnectionId, connected_at: Timestamp) -> Self {
        Self { id, connected_at }
    }
}

/// Per-connection ride state.
///
/// Every ride gets a fresh generation number. Timed work captures the
/// generation it was started under and every mutation it asks for is
/// checked against the current one, so work belonging to a cancelled ride
/// can never touch the session again.
#[derive(Debug, Default)]
pub struct RideSession {
    status: RideStatus,
    driver: Option<DriverRecord>,
    request: Option<RideRequest>,
    generation: u64,
}

impl RideSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> RideStatus {
        self.status
    }

    pub fn driver(&self) -> Option<&DriverRecord> {
        self.driver.as_ref()
    }

    pub fn request(&self) -> Option<&RideRequest> {
        self.request.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    /// Accept a ride request: `idle | completed -> requested`.
    ///
    /// # Errors
    ///
    /// `RideError::RideAlreadyInProgress` when a ride is active. The session
    /// is left untouched in that case.
    pub fn accept_request(&mut self, request: RideRequest) -> Result<(), RideError> {
        if self.status.is_active() {
            return Err(RideError::RideAlreadyInProgress(self.status));
        }
        self.driver = None;
        self.request = Some(request);
        self.status = RideStatus::Requested;
        Ok(())
    }

    /// Attach the fabricated driver: `requested -> driver_assigned`.
    ///
    /// Returns the generation the ride now runs under, or `None` if the
    /// session is not waiting for a driver.
    pub fn assign_driver(&mut self, driver: DriverRecord) -> Option<u64> {
        if self.status != RideStatus::Requested {
            return None;
        }
        self.generation += 1;
        self.driver = Some(driver);
        self.status = RideStatus::DriverAssigned;
        Some(self.generation)
    }

    /// Move a running ride to `next`.
    ///
    /// Only the forward transitions `driver_assigned -> driver_arriving ->
    /// ongoing -> completed` are accepted, and only for the current
    /// generation.
    pub fn advance(&mut self, generation: u64, next: RideStatus) -> bool {
        if !self.is_current(generation) || self.status.next() != Some(next) {
            return false;
        }
        self.status = next;
        true
    }

    /// Update the driver position for the current generation.
    pub fn move_driver(&mut self, generation: u64, position: Coordinate) -> bool {
        if !self.is_current(generation) || !self.status.is_active() {
            return false;
        }
        match self.driver.as_mut() {
            Some(driver) => {
                driver.position = position;
                true
            }
            None => false,
        }
    }

    /// Cancel the ride (or acknowledge a completed one) and return to idle.
    ///
    /// Returns the status the session was in.
    pub fn cancel(&mut self) -> RideStatus {
        let previous = self.status;
        self.revoke();
        self.driver = None;
        self.request = None;
        self.status = RideStatus::Idle;
        previous
    }

    /// Invalidate all outstanding timed work without changing the status.
    pub fn revoke(&mut self) {
        self.generation += 1;
    }
}
