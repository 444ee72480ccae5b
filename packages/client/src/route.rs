//! Route lookup between pickup and drop.
//!
//! The rider client only needs distance, duration and a path to draw; any
//! mapping service can sit behind `GeoRouteProvider`. The built-in provider
//! draws a great-circle straight line and assumes an average city speed.

use async_trait::async_trait;
use ridelink_server::domain::{Coordinate, MotionPlan};
use thiserror::Error;

const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Points drawn between origin and destination by the straight-line provider.
const STRAIGHT_LINE_SEGMENTS: u32 = 20;

/// Route between two points, replaced wholesale on each lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteInfo {
    pub path: Vec<Coordinate>,
    /// Rounded to 0.1 km
    pub distance_km: f64,
    /// Rounded to whole minutes
    pub duration_min: f64,
}

impl RouteInfo {
    /// Apply the display rounding to raw route totals.
    pub fn from_totals(path: Vec<Coordinate>, meters: f64, seconds: f64) -> Self {
        Self {
            path,
            distance_km: (meters / 1000.0 * 10.0).round() / 10.0,
            duration_min: (seconds / 60.0).round(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RouteError {
    #[error("route provider unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait GeoRouteProvider: Send + Sync {
    async fn route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<RouteInfo, RouteError>;
}

/// Great-circle distance at a constant average speed.
#[derive(Debug, Clone, Copy)]
pub struct StraightLineRouteProvider {
    average_speed_kmh: f64,
}

impl StraightLineRouteProvider {
    pub const DEFAULT_SPEED_KMH: f64 = 25.0;

    pub fn new(average_speed_kmh: f64) -> Self {
        Self { average_speed_kmh }
    }
}

impl Default for StraightLineRouteProvider {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SPEED_KMH)
    }
}

#[async_trait]
impl GeoRouteProvider for StraightLineRouteProvider {
    async fn route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<RouteInfo, RouteError> {
        if !(self.average_speed_kmh.is_finite() && self.average_speed_kmh > 0.0) {
            return Err(RouteError::Unavailable(format!(
                "average speed must be positive, got {}",
                self.average_speed_kmh
            )));
        }

        let meters = haversine_meters(&origin, &destination);
        let seconds = meters / 1000.0 / self.average_speed_kmh * 3600.0;
        let path = std::iter::once(origin)
            .chain(MotionPlan::new(origin, destination, STRAIGHT_LINE_SEGMENTS))
            .collect();

        Ok(RouteInfo::from_totals(path, meters, seconds))
    }
}

fn haversine_meters(from: &Coordinate, to: &Coordinate) -> f64 {
    let (lat1, lat2) = (from.lat().to_radians(), to.lat().to_radians());
    let d_lat = lat2 - lat1;
    let d_lng = (to.lng() - from.lng()).to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_METERS * a.sqrt().asin()
}
