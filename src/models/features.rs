use super::{SoilSample, WeatherReading};
use serde::{Deserialize, Serialize};

/// Column order the classifier and scaler were fit on. Reordering breaks the
/// trained artifacts silently, so the vector is only ever built through the
/// constructors below.
pub const FEATURE_NAMES: [&str; 7] = [
    "N",
    "P",
    "K",
    "temperature",
    "humidity",
    "ph",
    "rainfall",
];

/// Model input: [N, P, K, temperature, humidity, ph, rainfall].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector([f64; 7]);

impl FeatureVector {
    pub fn from_readings(soil: &SoilSample, weather: &WeatherReading) -> Self {
        Self([
            soil.n,
            soil.p,
            soil.k,
            weather.temperature_c,
            weather.humidity_pct,
            soil.ph,
            weather.rainfall_mm_per_day,
        ])
    }

    pub fn from_values(values: [f64; 7]) -> Self {
        Self(values)
    }

    pub fn values(&self) -> &[f64; 7] {
        &self.0
    }
}
