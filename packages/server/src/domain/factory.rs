//! Factories for entities that need generated values.

use uuid::Uuid;

use super::{
    entity::DriverRecord,
    random::RandomSource,
    value_object::{ConnectionId, Coordinate, DriverId},
};

/// Largest jitter applied to each axis of the driver start position, in degrees.
pub const MAX_JITTER_DEGREES: f64 = 0.01;

/// Upper bound (exclusive) of the numeric driver id suffix.
const DRIVER_ID_RANGE: f64 = 1000.0;

/// Generates connection identifiers.
pub struct ConnectionIdFactory;

impl ConnectionIdFactory {
    pub fn generate() -> ConnectionId {
        ConnectionId(Uuid::new_v4().to_string())
    }
}

/// Static part of a fabricated driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverProfile {
    pub name: String,
    pub car: String,
    pub photo: String,
}

impl Default for DriverProfile {
    fn default() -> Self {
        Self {
            name: "Ravi".to_string(),
            car: "Swift Dzire - KA01AB1234".to_string(),
            photo: "/driver-placeholder.png".to_string(),
        }
    }
}

/// Fabricates a "nearby" driver for a ride request.
///
/// Draw order per driver: id suffix, latitude jitter, longitude jitter.
#[derive(Debug, Clone, Default)]
pub struct DriverFactory {
    profile: DriverProfile,
}

impl DriverFactory {
    pub fn new(profile: DriverProfile) -> Self {
        Self { profile }
    }

    pub fn fabricate(&self, rng: &mut dyn RandomSource, pickup: Coordinate) -> DriverRecord {
        let number = (rng.next_unit() * DRIVER_ID_RANGE).floor() as u32;
        let delta_lat = jitter(rng.next_unit());
        let delta_lng = jitter(rng.next_unit());

        DriverRecord {
            id: DriverId::from_number(number.min(DRIVER_ID_RANGE as u32 - 1)),
            name: self.profile.name.clone(),
            car: self.profile.car.clone(),
            photo: self.profile.photo.clone(),
            position: pickup.offset(delta_lat, delta_lng),
        }
    }
}

/// Map a unit draw in `[0, 1)` onto `[-MAX_JITTER_DEGREES, MAX_JITTER_DEGREES)`.
fn jitter(unit: f64) -> f64 {
    (unit - 0.5) * 2.0 * MAX_JITTER_DEGREES
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Replays a fixed list of draws.
    struct ScriptedSource(std::vec::IntoIter<f64>);

    impl RandomSource for ScriptedSource {
        fn next_unit(&mut self) -> f64 {
            self.0.next().unwrap_or(0.5)
        }
    }

    fn scripted(draws: &[f64]) -> ScriptedSource {
        ScriptedSource(draws.to_vec().into_iter())
    }

    #[test]
    fn test_connection_id_factory_generates_unique_ids() {
        // テスト項目: 生成される ConnectionId は毎回異なる
        // given (前提条件):

        // when (操作):
        let first = ConnectionIdFactory::generate();
        let second = ConnectionIdFactory::generate();

        // then (期待する結果):
        assert_ne!(first, second);
        assert_eq!(first.as_str().len(), 36);
    }

    #[test]
    fn test_fabricate_uses_draws_in_order() {
        // テスト項目: 乱数を id → 緯度 → 経度の順に使い、正確なジッター座標になる
        // given (前提条件):
        let factory = DriverFactory::default();
        let pickup = Coordinate::new(12.9, 77.6).unwrap();
        let mut rng = scripted(&[0.0425, 0.75, 0.25]);

        // when (操作):
        let driver = factory.fabricate(&mut rng, pickup);

        // then (期待する結果):
        assert_eq!(driver.id.as_str(), "driver_42");
        assert_eq!(driver.name, "Ravi");
        assert_eq!(driver.car, "Swift Dzire - KA01AB1234");
        assert_eq!(driver.position, pickup.offset(0.005, -0.005));
    }

    #[test]
    fn test_fabricate_jitter_stays_within_bounds() {
        // テスト項目: ジッターは各軸 ±0.01 度以内に収まる
        // given (前提条件):
        let factory = DriverFactory::default();
        let pickup = Coordinate::new(12.9, 77.6).unwrap();
        let mut rng = scripted(&[0.999_999, 0.0, 0.999_999]);

        // when (操作):
        let driver = factory.fabricate(&mut rng, pickup);

        // then (期待する結果):
        assert_eq!(driver.id.as_str(), "driver_999");
        let tolerance = MAX_JITTER_DEGREES + 1e-9;
        assert!((driver.position.lat() - pickup.lat()).abs() <= tolerance);
        assert!((driver.position.lng() - pickup.lng()).abs() <= tolerance);
    }

    #[test]
    fn test_fabricate_with_custom_profile() {
        // テスト項目: 指定したプロフィールがドライバーに反映される
        // given (前提条件):
        let profile = DriverProfile {
            name: "Asha".to_string(),
            car: "Hyundai i20 - KA05MN0001".to_string(),
            photo: "/asha.png".to_string(),
        };
        let factory = DriverFactory::new(profile.clone());
        let pickup = Coordinate::new(0.0, 0.0).unwrap();

        // when (操作):
        let driver = factory.fabricate(&mut scripted(&[0.0, 0.5, 0.5]), pickup);

        // then (期待する結果):
        assert_eq!(driver.id.as_str(), "driver_0");
        assert_eq!(driver.name, profile.name);
        assert_eq!(driver.photo, profile.photo);
        assert_eq!(driver.position, pickup);
    }
}
