//! Value objects.
//!
//! Value objects are immutable and validated on construction, so the rest of
//! the domain never has to re-check them.

use std::fmt;

use super::error::DomainError;

/// A WGS84 position in decimal degrees.
///
/// Invariant: `lat ∈ [-90, 90]`, `lng ∈ [-180, 180]`, both finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    lat: f64,
    lng: f64,
}

impl Coordinate {
    pub const MAX_LAT: f64 = 90.0;
    pub const MAX_LNG: f64 = 180.0;

    /// Create a validated coordinate.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCoordinate` when either component is not
    /// finite or lies outside its range.
    pub fn new(lat: f64, lng: f64) -> Result<Self, DomainError> {
        let valid = lat.is_finite()
            && lng.is_finite()
            && lat.abs() <= Self::MAX_LAT
            && lng.abs() <= Self::MAX_LNG;
        if !valid {
            return Err(DomainError::InvalidCoordinate { lat, lng });
        }
        Ok(Self { lat, lng })
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }

    /// Linear interpolation towards `to`; `fraction` is clamped to `[0, 1]`.
    ///
    /// A convex combination of two valid coordinates is valid, so no
    /// re-validation is needed.
    pub fn lerp(&self, to: &Coordinate, fraction: f64) -> Coordinate {
        let t = fraction.clamp(0.0, 1.0);
        Coordinate {
            lat: self.lat + t * (to.lat - self.lat),
            lng: self.lng + t * (to.lng - self.lng),
        }
    }

    /// Shift by the given deltas, clamping the result into the valid range.
    pub fn offset(&self, delta_lat: f64, delta_lng: f64) -> Coordinate {
        Coordinate {
            lat: (self.lat + delta_lat).clamp(-Self::MAX_LAT, Self::MAX_LAT),
            lng: (self.lng + delta_lng).clamp(-Self::MAX_LNG, Self::MAX_LNG),
        }
    }

    /// Planar distance in degrees.
    ///
    /// Only meant for comparing positions along a single interpolated leg.
    pub fn degree_distance(&self, other: &Coordinate) -> f64 {
        (self.lat - other.lat).hypot(self.lng - other.lng)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lng)
    }
}

/// Identifier of one WebSocket connection (and thus one ride session).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConnectionId(pub(super) String);

impl ConnectionId {
    pub fn new(value: String) -> Result<Self, DomainError> {
        if value.trim().is_empty() {
            return Err(DomainError::EmptyIdentifier("ConnectionId"));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for ConnectionId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a fabricated driver, e.g. `driver_42`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DriverId(String);

impl DriverId {
    /// Build the id from the numeric suffix the driver factory draws.
    pub fn from_number(number: u32) -> Self {
        Self(format!("driver_{}", number))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Unix timestamp in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_accepts_valid_range() {
        // テスト項目: 範囲内の座標（境界値を含む）が作成できる
        // given (前提条件):
        let inputs = [(12.9, 77.6), (90.0, 180.0), (-90.0, -180.0), (0.0, 0.0)];

        // when (操作):
        let results: Vec<_> = inputs
            .iter()
            .map(|(lat, lng)| Coordinate::new(*lat, *lng))
            .collect();

        // then (期待する結果):
        assert!(results.iter().all(Result::is_ok));
    }

    #[test]
    fn test_coordinate_rejects_out_of_range_and_non_finite() {
        // テスト項目: 範囲外・非有限の座標はエラーになる
        // given (前提条件):
        let inputs = [
            (90.1, 0.0),
            (0.0, -180.5),
            (f64::NAN, 0.0),
            (0.0, f64::INFINITY),
        ];

        // when (操作):
        let results: Vec<_> = inputs
            .iter()
            .map(|(lat, lng)| Coordinate::new(*lat, *lng))
            .collect();

        // then (期待する結果):
        for result in results {
            assert!(matches!(
                result,
                Err(DomainError::InvalidCoordinate { .. })
            ));
        }
    }

    #[test]
    fn test_coordinate_lerp_endpoints_and_midpoint() {
        // テスト項目: lerp が始点・中点・終点を正しく計算する
        // given (前提条件):
        let from = Coordinate::new(10.0, 20.0).unwrap();
        let to = Coordinate::new(12.0, 24.0).unwrap();

        // when (操作):
        let start = from.lerp(&to, 0.0);
        let mid = from.lerp(&to, 0.5);
        let clamped = from.lerp(&to, 1.5);

        // then (期待する結果):
        assert_eq!(start, from);
        assert_eq!(mid, Coordinate::new(11.0, 22.0).unwrap());
        assert_eq!(clamped, to);
    }

    #[test]
    fn test_coordinate_offset_clamps_to_valid_range() {
        // テスト項目: offset の結果は有効範囲にクランプされる
        // given (前提条件):
        let near_pole = Coordinate::new(89.995, 179.995).unwrap();

        // when (操作):
        let shifted = near_pole.offset(0.01, 0.01);

        // then (期待する結果):
        assert_eq!(shifted.lat(), 90.0);
        assert_eq!(shifted.lng(), 180.0);
    }

    #[test]
    fn test_connection_id_rejects_empty() {
        // テスト項目: 空の ConnectionId は作成できない
        // given (前提条件):
        let empty = "   ".to_string();

        // when (操作):
        let result = ConnectionId::try_from(empty);

        // then (期待する結果):
        assert_eq!(result, Err(DomainError::EmptyIdentifier("ConnectionId")));
    }

    #[test]
    fn test_driver_id_from_number() {
        // テスト項目: 数値から driver_<n> 形式の DriverId が作成される
        // given (前提条件):
        let number = 42;

        // when (操作):
        let id = DriverId::from_number(number);

        // then (期待する結果):
        assert_eq!(id.as_str(), "driver_42");
    }
}
