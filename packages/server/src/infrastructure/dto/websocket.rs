//! WebSocket event DTOs.
//!
//! Every frame is a JSON text frame of the form
//! `{"type": "<event>", "payload": <payload>}`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordinateDto {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RideRequestDto {
    pub pickup: CoordinateDto,
    pub drop: CoordinateDto,
    #[serde(default)]
    pub distance_km: Option<f64>,
}

/// Driver record as sent on assignment; position is flattened into `lat`/`lng`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverDto {
    pub id: String,
    pub name: String,
    pub car: String,
    pub photo: String,
    #[serde(flatten)]
    pub position: CoordinateDto,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RideErrorDto {
    pub code: String,
    pub message: String,
}

/// client → server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum ClientCommand {
    RequestRide(RideRequestDto),
    CancelRide,
}

/// server → client
///
/// `rideStatus` carries a plain string so that clients can tolerate statuses
/// they do not know yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum ServerEvent {
    DriverAssigned(DriverDto),
    DriverLocation(CoordinateDto),
    RideStatus(String),
    RideError(RideErrorDto),
}
