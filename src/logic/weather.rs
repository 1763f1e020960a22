use crate::config::{OpenWeatherMapConfig, RainfallConfig};
use crate::datasources::{NasaPowerClient, OpenWeatherMapClient};
use crate::error::{CropSenseError, Result};
use crate::models::{Coordinate, WeatherReading};

/// Combines the two independent weather providers into one reading.
///
/// Temperature/humidity come from current conditions and are required; the
/// rainfall estimate comes from the historical provider and degrades to 0.0.
/// The two calls have no inter-dependency and are issued concurrently.
pub struct WeatherService {
    openweathermap: OpenWeatherMapClient,
    nasapower: NasaPowerClient,
}

impl WeatherService {
    pub fn new(openweathermap: OpenWeatherMapConfig, rainfall: RainfallConfig) -> Self {
        Self {
            openweathermap: OpenWeatherMapClient::new(openweathermap),
            nasapower: NasaPowerClient::new(rainfall),
        }
    }

    pub async fn fetch(&self, coordinate: &Coordinate) -> Result<WeatherReading> {
        let (current, rainfall) = tokio::join!(
            self.openweathermap.fetch_current(coordinate),
            self.nasapower.fetch_average_rainfall(coordinate),
        );

        let (temperature_c, humidity_pct) = match current {
            Ok(Some(values)) => values,
            Ok(None) => return Err(CropSenseError::MissingWeatherData),
            Err(e) => {
                tracing::warn!("current conditions unavailable: {}", e);
                return Err(CropSenseError::MissingWeatherData);
            }
        };

        tracing::debug!(
            "weather resolved: {}°C, {}%, {} mm/day",
            temperature_c,
            humidity_pct,
            rainfall
        );

        Ok(WeatherReading::live(temperature_c, humidity_pct, rainfall))
    }

    /// Test connection to the current-conditions provider, the one whose
    /// availability gates live recommendations.
    pub async fn test_connection(&self) -> bool {
        self.openweathermap.test_connection().await.unwrap_or(false)
    }
}
