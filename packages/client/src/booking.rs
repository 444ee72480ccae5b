//! Rider-side booking state.
//!
//! A plain reducer: user actions and server events go in, the new state and
//! any payload to send come out. Nothing here touches the network.

use std::str::FromStr;

use ridelink_server::{
    domain::{Coordinate, RideStatus},
    infrastructure::dto::websocket::{
        CoordinateDto, DriverDto, RideErrorDto, RideRequestDto, ServerEvent,
    },
};

use crate::{
    error::ClientError,
    fare::FareSchedule,
    route::{RouteError, RouteInfo},
};

/// What applying a server event did to the state.
#[derive(Debug, Clone, PartialEq)]
pub enum EventOutcome {
    Updated,
    /// Unknown status or unusable payload; state unchanged
    Ignored,
    /// Server refused a command; state unchanged, shown to the rider
    Rejected(RideErrorDto),
}

#[derive(Debug, Clone, Default)]
pub struct BookingState {
    status: RideStatus,
    driver: Option<DriverDto>,
    driver_location: Option<Coordinate>,
    pickup: Option<Coordinate>,
    drop: Option<Coordinate>,
    route: Option<RouteInfo>,
    fare_schedule: FareSchedule,
}

impl BookingState {
    pub fn new(fare_schedule: FareSchedule) -> Self {
        Self {
            fare_schedule,
            ..Self::default()
        }
    }

    pub fn status(&self) -> RideStatus {
        self.status
    }

    pub fn driver(&self) -> Option<&DriverDto> {
        self.driver.as_ref()
    }

    pub fn driver_location(&self) -> Option<Coordinate> {
        self.driver_location
    }

    pub fn pickup(&self) -> Option<Coordinate> {
        self.pickup
    }

    pub fn drop_point(&self) -> Option<Coordinate> {
        self.drop
    }

    pub fn route(&self) -> Option<&RouteInfo> {
        self.route.as_ref()
    }

    pub fn set_pickup(&mut self, pickup: Coordinate) {
        self.pickup = Some(pickup);
        self.route = None;
    }

    pub fn set_drop(&mut self, drop: Coordinate) {
        self.drop = Some(drop);
        self.route = None;
    }

    /// Endpoints of the route that has to be (re)computed, if any.
    pub fn needs_route(&self) -> Option<(Coordinate, Coordinate)> {
        match (self.pickup, self.drop, &self.route) {
            (Some(pickup), Some(drop), None) => Some((pickup, drop)),
            _ => None,
        }
    }

    /// Store the result of a route lookup for `pickup -> drop`.
    ///
    /// A result for endpoints that changed in the meantime is discarded. A
    /// failed lookup leaves no route, so no fare is shown.
    pub fn apply_route(
        &mut self,
        pickup: Coordinate,
        drop: Coordinate,
        result: Result<RouteInfo, RouteError>,
    ) {
        if self.pickup != Some(pickup) || self.drop != Some(drop) {
            tracing::debug!("Discarding route for outdated endpoints");
            return;
        }
        match result {
            Ok(route) => self.route = Some(route),
            Err(e) => {
                tracing::warn!("Route lookup failed: {}", e);
                self.route = None;
            }
        }
    }

    /// Build the `requestRide` payload and mark the ride as requested.
    ///
    /// # Errors
    ///
    /// `ClientError::MissingLocations` when pickup or drop is unset; nothing
    /// should be sent in that case.
    pub fn request_ride(&mut self) -> Result<RideRequestDto, ClientError> {
        let (Some(pickup), Some(drop)) = (self.pickup, self.drop) else {
            return Err(ClientError::MissingLocations);
        };
        // an active ride stays as is; the server answers with rideError
        if !self.status.is_active() {
            self.status = RideStatus::Requested;
        }
        Ok(RideRequestDto {
            pickup: pickup.into(),
            drop: drop.into(),
            distance_km: self.distance_km(),
        })
    }

    /// Local part of a cancellation; the caller sends `cancelRide`.
    ///
    /// Pickup, drop and the route stay so the same trip can be booked again.
    pub fn cancel_ride(&mut self) {
        self.reset_ride();
    }

    /// The server drops the session with the connection, so the ride is gone.
    pub fn connection_lost(&mut self) {
        self.reset_ride();
    }

    pub fn apply_event(&mut self, event: ServerEvent) -> EventOutcome {
        match event {
            ServerEvent::DriverAssigned(driver) => {
                self.driver = Some(driver);
                self.driver_location = None;
                self.status = RideStatus::DriverAssigned;
                EventOutcome::Updated
            }
            ServerEvent::DriverLocation(position) => match to_coordinate(position) {
                Some(position) => {
                    self.driver_location = Some(position);
                    EventOutcome::Updated
                }
                None => EventOutcome::Ignored,
            },
            ServerEvent::RideStatus(status) => match RideStatus::from_str(&status) {
                Ok(RideStatus::Idle) => {
                    self.reset_ride();
                    EventOutcome::Updated
                }
                Ok(status) => {
                    self.status = status;
                    EventOutcome::Updated
                }
                Err(e) => {
                    tracing::warn!("Ignoring ride status: {}", e);
                    EventOutcome::Ignored
                }
            },
            ServerEvent::RideError(error) => {
                tracing::warn!("Server rejected command: {} ({})", error.message, error.code);
                EventOutcome::Rejected(error)
            }
        }
    }

    pub fn distance_km(&self) -> Option<f64> {
        self.route.as_ref().map(|r| r.distance_km)
    }

    pub fn eta_min(&self) -> Option<f64> {
        self.route.as_ref().map(|r| r.duration_min)
    }

    pub fn fare_estimate(&self) -> Option<u32> {
        self.fare_schedule
            .estimate(self.distance_km(), self.eta_min())
    }

    fn reset_ride(&mut self) {
        self.status = RideStatus::Idle;
        self.driver = None;
        self.driver_location = None;
    }
}

fn to_coordinate(dto: CoordinateDto) -> Option<Coordinate> {
    match Coordinate::try_from(dto) {
        Ok(coordinate) => Some(coordinate),
        Err(e) => {
            tracing::warn!("Ignoring driver location: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coordinate(lat: f64, lng: f64) -> Coordinate {
        Coordinate::new(lat, lng).unwrap()
    }

    fn route() -> RouteInfo {
        RouteInfo {
            path: vec![coordinate(12.9, 77.6), coordinate(12.95, 77.65)],
            distance_km: 7.8,
            duration_min: 19.0,
        }
    }

    fn driver() -> DriverDto {
        DriverDto {
            id: "driver_42".to_string(),
            name: "Ravi".to_string(),
            car: "Swift Dzire - KA01AB1234".to_string(),
            photo: "/driver-placeholder.png".to_string(),
            position: CoordinateDto {
                lat: 12.905,
                lng: 77.595,
            },
        }
    }

    fn booked_state() -> BookingState {
        let mut state = BookingState::default();
        state.set_pickup(coordinate(12.9, 77.6));
        state.set_drop(coordinate(12.95, 77.65));
        state.apply_route(coordinate(12.9, 77.6), coordinate(12.95, 77.65), Ok(route()));
        state
    }

    #[test]
    fn test_request_without_locations_is_rejected() {
        // テスト項目: 乗車地点・降車地点が未設定ならリクエストは作られない
        // given (前提条件):
        let mut state = BookingState::default();
        state.set_pickup(coordinate(12.9, 77.6));

        // when (操作):
        let result = state.request_ride();

        // then (期待する結果):
        assert_eq!(result, Err(ClientError::MissingLocations));
        assert_eq!(state.status(), RideStatus::Idle);
    }

    #[test]
    fn test_request_carries_route_distance() {
        // テスト項目: リクエストには経路の距離が含まれ、状態は requested になる
        // given (前提条件):
        let mut state = booked_state();

        // when (操作):
        let payload = state.request_ride().unwrap();

        // then (期待する結果):
        assert_eq!(payload.distance_km, Some(7.8));
        assert_eq!(payload.pickup, CoordinateDto { lat: 12.9, lng: 77.6 });
        assert_eq!(state.status(), RideStatus::Requested);
    }

    #[test]
    fn test_request_during_active_ride_keeps_status() {
        // テスト項目: 配車中の再リクエストでは状態が requested に戻らない
        // given (前提条件):
        let mut state = booked_state();
        state.request_ride().unwrap();
        state.apply_event(ServerEvent::RideStatus("ongoing".to_string()));

        // when (操作):
        let result = state.request_ride();

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(state.status(), RideStatus::Ongoing);
    }

    #[test]
    fn test_request_without_route_sends_null_distance() {
        // テスト項目: 経路が無い場合は distanceKm が null になる
        // given (前提条件):
        let mut state = BookingState::default();
        state.set_pickup(coordinate(12.9, 77.6));
        state.set_drop(coordinate(12.95, 77.65));

        // when (操作):
        let payload = state.request_ride().unwrap();

        // then (期待する結果):
        assert_eq!(payload.distance_km, None);
    }

    #[test]
    fn test_route_needed_when_both_locations_set() {
        // テスト項目: 両地点が揃うと経路の再計算が必要になり、地点変更で経路は破棄される
        // given (前提条件):
        let mut state = booked_state();
        assert_eq!(state.needs_route(), None);

        // when (操作):
        state.set_drop(coordinate(13.0, 77.7));

        // then (期待する結果):
        assert_eq!(
            state.needs_route(),
            Some((coordinate(12.9, 77.6), coordinate(13.0, 77.7)))
        );
        assert_eq!(state.fare_estimate(), None);
    }

    #[test]
    fn test_outdated_route_is_discarded() {
        // テスト項目: 古い地点の経路結果は反映されない
        // given (前提条件):
        let mut state = BookingState::default();
        state.set_pickup(coordinate(12.9, 77.6));
        state.set_drop(coordinate(13.0, 77.7));

        // when (操作):
        state.apply_route(coordinate(12.9, 77.6), coordinate(12.95, 77.65), Ok(route()));

        // then (期待する結果):
        assert!(state.route().is_none());
    }

    #[test]
    fn test_failed_route_clears_fare() {
        // テスト項目: 経路取得に失敗すると経路・運賃は表示されない
        // given (前提条件):
        let mut state = booked_state();
        state.set_pickup(coordinate(12.9, 77.6));

        // when (操作):
        state.apply_route(
            coordinate(12.9, 77.6),
            coordinate(12.95, 77.65),
            Err(RouteError::Unavailable("offline".to_string())),
        );

        // then (期待する結果):
        assert!(state.route().is_none());
        assert_eq!(state.fare_estimate(), None);
    }

    #[test]
    fn test_derived_values_from_route() {
        // テスト項目: 経路から距離・到着時間・運賃が得られる
        // given (前提条件):
        let state = booked_state();

        // when (操作):
        let (distance, eta, fare) = (state.distance_km(), state.eta_min(), state.fare_estimate());

        // then (期待する結果):
        assert_eq!(distance, Some(7.8));
        assert_eq!(eta, Some(19.0));
        assert_eq!(fare, Some(122));
    }

    #[test]
    fn test_driver_assigned_replaces_driver() {
        // テスト項目: driverAssigned でドライバー情報が置き換わり、位置はクリアされる
        // given (前提条件):
        let mut state = booked_state();
        state.request_ride().unwrap();
        state.apply_event(ServerEvent::DriverLocation(CoordinateDto { lat: 1.0, lng: 1.0 }));

        // when (操作):
        let outcome = state.apply_event(ServerEvent::DriverAssigned(driver()));

        // then (期待する結果):
        assert_eq!(outcome, EventOutcome::Updated);
        assert_eq!(state.driver(), Some(&driver()));
        assert_eq!(state.driver_location(), None);
        assert_eq!(state.status(), RideStatus::DriverAssigned);
    }

    #[test]
    fn test_driver_location_replaces_position() {
        // テスト項目: driverLocation で位置が置き換わる
        // given (前提条件):
        let mut state = booked_state();
        state.apply_event(ServerEvent::DriverAssigned(driver()));

        // when (操作):
        state.apply_event(ServerEvent::DriverLocation(CoordinateDto {
            lat: 12.91,
            lng: 77.61,
        }));

        // then (期待する結果):
        assert_eq!(state.driver_location(), Some(coordinate(12.91, 77.61)));
        assert_eq!(state.status(), RideStatus::DriverAssigned);
    }

    #[test]
    fn test_known_status_is_applied() {
        // テスト項目: 既知の rideStatus は状態に反映される
        // given (前提条件):
        let mut state = booked_state();
        state.apply_event(ServerEvent::DriverAssigned(driver()));

        // when (操作):
        let outcome = state.apply_event(ServerEvent::RideStatus("ongoing".to_string()));

        // then (期待する結果):
        assert_eq!(outcome, EventOutcome::Updated);
        assert_eq!(state.status(), RideStatus::Ongoing);
    }

    #[test]
    fn test_unknown_status_is_ignored() {
        // テスト項目: 未知の rideStatus では状態が変わらない
        // given (前提条件):
        let mut state = booked_state();
        state.apply_event(ServerEvent::DriverAssigned(driver()));

        // when (操作):
        let outcome = state.apply_event(ServerEvent::RideStatus("teleporting".to_string()));

        // then (期待する結果):
        assert_eq!(outcome, EventOutcome::Ignored);
        assert_eq!(state.status(), RideStatus::DriverAssigned);
        assert_eq!(state.driver(), Some(&driver()));
    }

    #[test]
    fn test_idle_status_clears_driver() {
        // テスト項目: rideStatus(idle) でドライバー情報がクリアされる
        // given (前提条件):
        let mut state = booked_state();
        state.apply_event(ServerEvent::DriverAssigned(driver()));

        // when (操作):
        state.apply_event(ServerEvent::RideStatus("idle".to_string()));

        // then (期待する結果):
        assert_eq!(state.status(), RideStatus::Idle);
        assert!(state.driver().is_none());
        assert!(state.route().is_some());
    }

    #[test]
    fn test_ride_error_leaves_state_unchanged() {
        // テスト項目: rideError は状態を変えずに呼び出し元へ返される
        // given (前提条件):
        let mut state = booked_state();
        state.apply_event(ServerEvent::DriverAssigned(driver()));
        let error = RideErrorDto {
            code: "ride_already_in_progress".to_string(),
            message: "ride already in progress (status: driver_assigned)".to_string(),
        };

        // when (操作):
        let outcome = state.apply_event(ServerEvent::RideError(error.clone()));

        // then (期待する結果):
        assert_eq!(outcome, EventOutcome::Rejected(error));
        assert_eq!(state.status(), RideStatus::DriverAssigned);
    }

    #[test]
    fn test_cancel_clears_driver_and_keeps_route() {
        // テスト項目: キャンセルで idle に戻りドライバーはクリアされるが、経路と運賃は残る
        // given (前提条件):
        let mut state = booked_state();
        let fare = state.fare_estimate();
        state.request_ride().unwrap();
        state.apply_event(ServerEvent::DriverAssigned(driver()));

        // when (操作):
        state.cancel_ride();

        // then (期待する結果):
        assert_eq!(state.status(), RideStatus::Idle);
        assert!(state.driver().is_none());
        assert!(state.driver_location().is_none());
        assert!(state.route().is_some());
        assert_eq!(state.needs_route(), None);
        assert_eq!(state.fare_estimate(), fare);
        assert_eq!(state.pickup(), Some(coordinate(12.9, 77.6)));
    }

    #[test]
    fn test_rebook_after_cancel_carries_distance() {
        // テスト項目: キャンセル後の再リクエストにも経路の距離が含まれる
        // given (前提条件):
        let mut state = booked_state();
        state.request_ride().unwrap();
        state.cancel_ride();

        // when (操作):
        let payload = state.request_ride().unwrap();

        // then (期待する結果):
        assert_eq!(payload.distance_km, Some(7.8));
        assert!(state.fare_estimate().is_some());
        assert_eq!(state.status(), RideStatus::Requested);
    }

    #[test]
    fn test_connection_lost_resets_ride() {
        // テスト項目: 接続断は暗黙のキャンセルとして扱われる
        // given (前提条件):
        let mut state = booked_state();
        state.apply_event(ServerEvent::DriverAssigned(driver()));
        state.apply_event(ServerEvent::RideStatus("ongoing".to_string()));

        // when (操作):
        state.connection_lost();

        // then (期待する結果):
        assert_eq!(state.status(), RideStatus::Idle);
        assert!(state.driver().is_none());
        assert!(state.driver_location().is_none());
    }
}
