use crate::config::OpenWeatherMapConfig;
use crate::error::Result;
use crate::models::Coordinate;
use serde::Deserialize;
use std::time::Duration;

const API_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Current-conditions client. Supplies the temperature and humidity half of a
/// weather reading; the aggregator treats its failure as fatal.
pub struct OpenWeatherMapClient {
    client: reqwest::Client,
    config: OpenWeatherMapConfig,
}

// OpenWeatherMap API response structures
#[derive(Debug, Deserialize)]
struct OwmCurrentResponse {
    cod: OwmStatusCode,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    main: Option<OwmMain>,
}

// The API reports `cod` as a number on success and a string on most errors.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OwmStatusCode {
    Number(i64),
    Text(String),
}

impl OwmStatusCode {
    fn is_ok(&self) -> bool {
        match self {
            OwmStatusCode::Number(code) => *code == 200,
            OwmStatusCode::Text(code) => code == "200",
        }
    }
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64,
    humidity: f64,
}

impl OpenWeatherMapClient {
    pub fn new(config: OpenWeatherMapConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Fetch current temperature (°C) and relative humidity (%) for a
    /// coordinate. `Ok(None)` means the provider answered but without a usable
    /// reading.
    pub async fn fetch_current(&self, coordinate: &Coordinate) -> Result<Option<(f64, f64)>> {
        let url = format!(
            "{}/weather?lat={}&lon={}&appid={}&units=metric",
            API_BASE_URL, coordinate.latitude, coordinate.longitude, self.config.api_key
        );

        let response = self
            .client
            .get(&url)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        let payload: OwmCurrentResponse = response.json().await?;
        Ok(current_from_response(payload))
    }

    /// Test connection to the OpenWeatherMap API.
    pub async fn test_connection(&self) -> Result<bool> {
        let url = format!(
            "{}/weather?lat=30.9&lon=75.8&appid={}&units=metric",
            API_BASE_URL, self.config.api_key
        );

        let response = self
            .client
            .get(&url)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        Ok(response.status().is_success())
    }
}

fn current_from_response(payload: OwmCurrentResponse) -> Option<(f64, f64)> {
    if !payload.cod.is_ok() {
        tracing::warn!(
            "OpenWeather error: {}",
            payload.message.as_deref().unwrap_or("Unknown error")
        );
        return None;
    }

    let main = payload.main?;
    Some((main.temp, main.humidity))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn successful_response_yields_temp_and_humidity() {
        let payload: OwmCurrentResponse =
            serde_json::from_str(r#"{"cod": 200, "main": {"temp": 28.5, "humidity": 60}}"#)
                .unwrap();

        assert_eq!(current_from_response(payload), Some((28.5, 60.0)));
    }

    #[test]
    fn error_status_yields_none() {
        let payload: OwmCurrentResponse =
            serde_json::from_str(r#"{"cod": "401", "message": "Invalid API key"}"#).unwrap();
        assert_eq!(current_from_response(payload), None);
    }

    #[test]
    fn success_status_without_main_yields_none() {
        let payload: OwmCurrentResponse = serde_json::from_str(r#"{"cod": 200}"#).unwrap();
        assert_eq!(current_from_response(payload), None);
    }

    #[test]
    fn string_200_is_accepted() {
        let payload: OwmCurrentResponse =
            serde_json::from_str(r#"{"cod": "200", "main": {"temp": 21.0, "humidity": 75}}"#)
                .unwrap();
        assert_eq!(current_from_response(payload), Some((21.0, 75.0)));
    }
}
