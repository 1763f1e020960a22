use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeatherSource {
    LiveApis,
    Manual,
}

impl WeatherSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherSource::LiveApis => "Live APIs (OpenWeather + NASA POWER)",
            WeatherSource::Manual => "Manual Input",
        }
    }
}

impl std::fmt::Display for WeatherSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One complete weather observation for a recommendation request.
///
/// Temperature/humidity and rainfall may come from different providers, but a
/// successfully built reading always carries all three values; rainfall falls
/// back to 0.0 rather than being absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherReading {
    pub temperature_c: f64,
    pub humidity_pct: f64,
    pub rainfall_mm_per_day: f64,
    pub source: WeatherSource,
}

impl WeatherReading {
    pub fn live(temperature_c: f64, humidity_pct: f64, rainfall_mm_per_day: f64) -> Self {
        Self {
            temperature_c,
            humidity_pct,
            rainfall_mm_per_day,
            source: WeatherSource::LiveApis,
        }
    }

    pub fn manual(temperature_c: f64, humidity_pct: f64, rainfall_mm_per_day: f64) -> Self {
        Self {
            temperature_c,
            humidity_pct,
            rainfall_mm_per_day,
            source: WeatherSource::Manual,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_tags() {
        let live = WeatherReading::live(28.5, 60.0, 2.4);
        assert_eq!(live.source, WeatherSource::LiveApis);

        let manual = WeatherReading::manual(20.8, 82.0, 202.9);
        assert_eq!(manual.source, WeatherSource::Manual);
        assert_eq!(manual.source.as_str(), "Manual Input");
    }
}
