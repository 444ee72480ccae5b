//! Fare estimation.
//!
//! `fare = max(round((base + per_km * km + per_min * min) * surge), base)`

/// Tariff in rupees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FareSchedule {
    pub base: f64,
    pub per_km: f64,
    pub per_min: f64,
    pub surge_multiplier: f64,
}

impl Default for FareSchedule {
    fn default() -> Self {
        Self {
            base: 25.0,
            per_km: 10.0,
            per_min: 1.0,
            surge_multiplier: 1.0,
        }
    }
}

impl FareSchedule {
    /// Estimated fare, or `None` while distance or duration is unknown.
    ///
    /// Zero is a known value: a zero-length trip costs the base fare.
    pub fn estimate(&self, distance_km: Option<f64>, duration_min: Option<f64>) -> Option<u32> {
        let km = distance_km?;
        let min = duration_min?;
        let raw = (self.base + self.per_km * km + self.per_min * min) * self.surge_multiplier;
        Some(raw.round().max(self.base) as u32)
    }
}

/// Fare with the default tariff.
pub fn fare(distance_km: Option<f64>, duration_min: Option<f64>) -> Option<u32> {
    FareSchedule::default().estimate(distance_km, duration_min)
}
