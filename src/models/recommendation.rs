use super::{LocationInfo, SoilSample, WeatherReading};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecommendationMode {
    Live,
    Manual,
}

impl RecommendationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendationMode::Live => "LIVE",
            RecommendationMode::Manual => "MANUAL",
        }
    }
}

impl std::fmt::Display for RecommendationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Caller-facing result envelope. Built once per request, never persisted,
/// and never carries API keys or other secrets.
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationResult {
    pub crop: String,
    pub mode: RecommendationMode,
    pub weather: WeatherReading,
    pub soil: SoilSample,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<LocationInfo>,
}

impl RecommendationResult {
    pub fn new(
        crop: String,
        mode: RecommendationMode,
        mut weather: WeatherReading,
        soil: SoilSample,
    ) -> Self {
        weather.temperature_c = round2(weather.temperature_c);
        weather.humidity_pct = round2(weather.humidity_pct);
        weather.rainfall_mm_per_day = round2(weather.rainfall_mm_per_day);

        Self {
            crop,
            mode,
            weather,
            soil,
            location: None,
        }
    }

    pub fn with_location(mut self, location: LocationInfo) -> Self {
        self.location = Some(location);
        self
    }
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SoilSource, WeatherReading};

    fn sample_soil() -> SoilSample {
        SoilSample {
            n: 90.0,
            p: 42.0,
            k: 43.0,
            ph: 6.5,
            source: SoilSource::Manual,
        }
    }

    #[test]
    fn envelope_rounds_weather_values() {
        let weather = WeatherReading::live(28.456, 60.004, 2.345);
        let result = RecommendationResult::new(
            "rice".into(),
            RecommendationMode::Live,
            weather,
            sample_soil(),
        );

        assert_eq!(result.weather.temperature_c, 28.46);
        assert_eq!(result.weather.humidity_pct, 60.0);
        assert_eq!(result.weather.rainfall_mm_per_day, 2.35);
    }

    #[test]
    fn envelope_without_location_omits_field() {
        let result = RecommendationResult::new(
            "maize".into(),
            RecommendationMode::Manual,
            WeatherReading::manual(22.0, 65.0, 84.8),
            sample_soil(),
        );

        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("location").is_none());
        assert_eq!(json["mode"], "Manual");
        assert_eq!(json["crop"], "maize");
    }

    #[test]
    fn mode_display() {
        assert_eq!(RecommendationMode::Live.as_str(), "LIVE");
        assert_eq!(RecommendationMode::Manual.as_str(), "MANUAL");
    }
}
