use crate::config::RainfallConfig;
use crate::error::Result;
use crate::models::Coordinate;
use chrono::{Duration as ChronoDuration, NaiveDate, Utc};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

const API_BASE_URL: &str = "https://power.larc.nasa.gov/api/temporal/daily/point";
const RAINFALL_PARAMETER: &str = "PRECTOTCORR";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Historical daily-precipitation client (NASA POWER, no API key). Supplies
/// the rainfall estimate half of a weather reading; its failure degrades to
/// 0.0 and never blocks a recommendation.
pub struct NasaPowerClient {
    client: reqwest::Client,
    config: RainfallConfig,
}

#[derive(Debug, Deserialize)]
struct PowerResponse {
    properties: PowerProperties,
}

#[derive(Debug, Deserialize)]
struct PowerProperties {
    parameter: HashMap<String, HashMap<String, f64>>,
}

impl NasaPowerClient {
    pub fn new(config: RainfallConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Average daily rainfall (mm/day) over the trailing window, or 0.0 when
    /// the provider yields nothing usable.
    pub async fn fetch_average_rainfall(&self, coordinate: &Coordinate) -> f64 {
        match self.try_fetch(coordinate).await {
            Ok(average) => average,
            Err(e) => {
                tracing::warn!("NASA POWER rainfall unavailable: {}", e);
                0.0
            }
        }
    }

    async fn try_fetch(&self, coordinate: &Coordinate) -> Result<f64> {
        let (start, end) = request_window(
            Utc::now().date_naive(),
            self.config.window_days,
            self.config.lag_days,
        );

        let url = format!(
            "{}?parameters={}&community=AG&start={}&end={}&latitude={}&longitude={}&format=JSON",
            API_BASE_URL,
            RAINFALL_PARAMETER,
            start.format("%Y%m%d"),
            end.format("%Y%m%d"),
            coordinate.latitude,
            coordinate.longitude
        );

        let response = self
            .client
            .get(&url)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        let payload: PowerResponse = response.json().await?;

        Ok(payload
            .properties
            .parameter
            .get(RAINFALL_PARAMETER)
            .map(average_rainfall)
            .unwrap_or(0.0))
    }
}

/// Date range [today − lag − window, today − lag]. The provider publishes
/// daily data a few days behind real time, so the most recent days are
/// skipped entirely.
fn request_window(today: NaiveDate, window_days: u32, lag_days: u32) -> (NaiveDate, NaiveDate) {
    let end = today - ChronoDuration::days(lag_days as i64);
    let start = end - ChronoDuration::days(window_days as i64);
    (start, end)
}

/// Average of the valid entries, rounded to two decimals. Negative values
/// mark missing days in the POWER series.
fn average_rainfall(series: &HashMap<String, f64>) -> f64 {
    let valid: Vec<f64> = series.values().copied().filter(|v| *v >= 0.0).collect();

    if valid.is_empty() {
        return 0.0;
    }

    let average = valid.iter().sum::<f64>() / valid.len() as f64;
    (average * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(entries: &[(&str, f64)]) -> HashMap<String, f64> {
        entries
            .iter()
            .map(|(date, value)| (date.to_string(), *value))
            .collect()
    }

    #[test]
    fn window_is_offset_by_lag() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 20).unwrap();
        let (start, end) = request_window(today, 30, 5);

        assert_eq!(end, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 2, 14).unwrap());
    }

    #[test]
    fn window_format_is_yyyymmdd() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let (start, end) = request_window(today, 30, 5);

        assert_eq!(start.format("%Y%m%d").to_string(), "20231206");
        assert_eq!(end.format("%Y%m%d").to_string(), "20240105");
    }

    #[test]
    fn average_skips_sentinel_values() {
        let data = series(&[
            ("20240301", 2.0),
            ("20240302", -999.0),
            ("20240303", 4.0),
            ("20240304", -999.0),
        ]);

        assert_eq!(average_rainfall(&data), 3.0);
    }

    #[test]
    fn all_sentinels_average_to_zero() {
        let data = series(&[("20240301", -999.0), ("20240302", -999.0)]);
        assert_eq!(average_rainfall(&data), 0.0);
    }

    #[test]
    fn empty_series_averages_to_zero() {
        assert_eq!(average_rainfall(&HashMap::new()), 0.0);
    }

    #[test]
    fn average_is_rounded_to_two_decimals() {
        let data = series(&[("20240301", 1.0), ("20240302", 2.0), ("20240303", 2.0)]);
        assert_eq!(average_rainfall(&data), 1.67);
    }

    #[test]
    fn zero_rainfall_days_are_valid_data() {
        let data = series(&[("20240301", 0.0), ("20240302", 6.0)]);
        assert_eq!(average_rainfall(&data), 3.0);
    }
}
