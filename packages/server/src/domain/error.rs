//! Domain-level error types.

use thiserror::Error;

use super::entity::RideStatus;

/// Validation errors raised while constructing value objects.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// Latitude/longitude outside the valid range or not finite
    #[error("invalid coordinate: lat={lat}, lng={lng}")]
    InvalidCoordinate { lat: f64, lng: f64 },

    /// Identifier is empty or whitespace only
    #[error("{0} must not be empty")]
    EmptyIdentifier(&'static str),

    /// Status string outside the known set
    #[error("unknown ride status: '{0}'")]
    UnknownRideStatus(String),
}

/// Errors raised by the ride state machine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RideError {
    /// A ride is already running on this connection
    #[error("ride already in progress (status: {0})")]
    RideAlreadyInProgress(RideStatus),

    /// The command payload could not be understood
    #[error("invalid command: {0}")]
    InvalidCommand(String),

    /// The command carried an out-of-range coordinate
    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(String),
}

impl RideError {
    /// Returns the machine-readable error code sent to clients.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::RideAlreadyInProgress(_) => "ride_already_in_progress",
            Self::InvalidCommand(_) => "invalid_command",
            Self::InvalidCoordinate(_) => "invalid_coordinate",
        }
    }
}

impl From<DomainError> for RideError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidCoordinate { .. } => Self::InvalidCoordinate(err.to_string()),
            other => Self::InvalidCommand(other.to_string()),
        }
    }
}

/// Errors raised while pushing events to a connection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventPushError {
    /// No outbound channel is registered for the connection
    #[error("connection '{0}' not found")]
    ConnectionNotFound(String),

    /// The outbound channel is closed
    #[error("failed to push event: {0}")]
    PushFailed(String),
}

/// Errors raised by the connection registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("connection '{0}' is already registered")]
    DuplicateConnection(String),

    #[error("connection '{0}' not found")]
    ConnectionNotFound(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ride_error_codes() {
        // テスト項目: RideError ごとに固定のエラーコードが返される
        // given (前提条件):
        let already = RideError::RideAlreadyInProgress(RideStatus::Ongoing);
        let invalid = RideError::InvalidCommand("bad json".to_string());
        let coordinate = RideError::InvalidCoordinate("lat=91".to_string());

        // when (操作):
        let codes = [already.code(), invalid.code(), coordinate.code()];

        // then (期待する結果):
        assert_eq!(
            codes,
            ["ride_already_in_progress", "invalid_command", "invalid_coordinate"]
        );
        assert_eq!(
            already.to_string(),
            "ride already in progress (status: ongoing)"
        );
    }

    #[test]
    fn test_domain_error_converts_to_ride_error() {
        // テスト項目: 座標エラーは invalid_coordinate、それ以外は invalid_command に変換される
        // given (前提条件):
        let coordinate_err = DomainError::InvalidCoordinate {
            lat: 91.0,
            lng: 0.0,
        };
        let status_err = DomainError::UnknownRideStatus("teleporting".to_string());

        // when (操作):
        let from_coordinate: RideError = coordinate_err.into();
        let from_status: RideError = status_err.into();

        // then (期待する結果):
        assert_eq!(from_coordinate.code(), "invalid_coordinate");
        assert_eq!(from_status.code(), "invalid_command");
    }
}
