//! Conversion logic between DTOs and domain entities.

use crate::domain::{Coordinate, DomainError, DriverRecord, RideEvent, RideRequest};
use crate::infrastructure::dto::websocket as dto;

// ========================================
// DTO → Domain Entity
// ========================================

impl TryFrom<dto::CoordinateDto> for Coordinate {
    type Error = DomainError;

    fn try_from(dto: dto::CoordinateDto) -> Result<Self, Self::Error> {
        Coordinate::new(dto.lat, dto.lng)
    }
}

impl TryFrom<dto::RideRequestDto> for RideRequest {
    type Error = DomainError;

    fn try_from(dto: dto::RideRequestDto) -> Result<Self, Self::Error> {
        Ok(RideRequest::new(
            dto.pickup.try_into()?,
            dto.drop.try_into()?,
            dto.distance_km,
        ))
    }
}

// ========================================
// Domain Entity → DTO
// ========================================

impl From<Coordinate> for dto::CoordinateDto {
    fn from(model: Coordinate) -> Self {
        Self {
            lat: model.lat(),
            lng: model.lng(),
        }
    }
}

impl From<RideRequest> for dto::RideRequestDto {
    fn from(model: RideRequest) -> Self {
        Self {
            pickup: model.pickup.into(),
            drop: model.drop.into(),
            distance_km: model.distance_km,
        }
    }
}

impl From<DriverRecord> for dto::DriverDto {
    fn from(model: DriverRecord) -> Self {
        Self {
            id: model.id.into_string(),
            name: model.name,
            car: model.car,
            photo: model.photo,
            position: model.position.into(),
        }
    }
}

impl From<RideEvent> for dto::ServerEvent {
    fn from(event: RideEvent) -> Self {
        match event {
            RideEvent::DriverAssigned(driver) => Self::DriverAssigned(driver.into()),
            RideEvent::DriverLocation(position) => Self::DriverLocation(position.into()),
            RideEvent::RideStatus(status) => Self::RideStatus(status.as_str().to_string()),
            RideEvent::RideError { code, message } => {
                Self::RideError(dto::RideErrorDto { code, message })
            }
        }
    }
}
