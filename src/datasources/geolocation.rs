use crate::config::GeolocationConfig;
use crate::error::Result;
use crate::models::{Coordinate, LocationInfo, LocationSource};
use serde::Deserialize;
use std::time::Duration;

/// IP-based geolocation with a primary provider, a fallback provider, and a
/// built-in default. Resolution never fails; total provider failure degrades
/// to the default so the live pipeline can always proceed.
pub struct GeoLocator {
    client: reqwest::Client,
    config: GeolocationConfig,
}

// ipapi.co response (primary)
#[derive(Debug, Deserialize)]
struct IpapiResponse {
    #[serde(default)]
    latitude: Option<f64>,
    #[serde(default)]
    longitude: Option<f64>,
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    country_name: Option<String>,
}

// ip-api.com response (fallback)
#[derive(Debug, Deserialize)]
struct IpApiResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lon: Option<f64>,
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    country: Option<String>,
}

impl GeoLocator {
    pub fn new(config: GeolocationConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Resolve the caller's approximate location. Providers are consulted in
    /// order; the second only after the first definitively fails or times out.
    pub async fn locate(&self) -> LocationInfo {
        match self.try_primary().await {
            Ok(Some(location)) => return location,
            Ok(None) => tracing::warn!("primary geolocation returned incomplete data"),
            Err(e) => tracing::warn!("primary geolocation failed: {}", e),
        }

        match self.try_fallback().await {
            Ok(Some(location)) => return location,
            Ok(None) => tracing::warn!("fallback geolocation reported failure"),
            Err(e) => tracing::warn!("fallback geolocation failed: {}", e),
        }

        // Normal when both providers are rate-limited or the host is offline.
        tracing::info!("using built-in default location");
        LocationInfo::default_location()
    }

    async fn try_primary(&self) -> Result<Option<LocationInfo>> {
        let response = self
            .client
            .get(&self.config.primary_url)
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .send()
            .await?;

        let payload: IpapiResponse = response.json().await?;
        Ok(location_from_primary(payload))
    }

    async fn try_fallback(&self) -> Result<Option<LocationInfo>> {
        let response = self
            .client
            .get(&self.config.fallback_url)
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .send()
            .await?;

        let payload: IpApiResponse = response.json().await?;
        Ok(location_from_fallback(payload))
    }
}

fn location_from_primary(payload: IpapiResponse) -> Option<LocationInfo> {
    let latitude = payload.latitude?;
    let longitude = payload.longitude?;
    let coordinate = Coordinate::new(latitude, longitude).ok()?;

    Some(LocationInfo {
        coordinate,
        city: payload.city.unwrap_or_else(|| "Unknown".into()),
        country: payload.country_name.unwrap_or_else(|| "Unknown".into()),
        source: LocationSource::Primary,
    })
}

fn location_from_fallback(payload: IpApiResponse) -> Option<LocationInfo> {
    if payload.status.as_deref() != Some("success") {
        return None;
    }
    let coordinate = Coordinate::new(payload.lat?, payload.lon?).ok()?;

    Some(LocationInfo {
        coordinate,
        city: payload.city.unwrap_or_else(|| "Unknown".into()),
        country: payload.country.unwrap_or_else(|| "Unknown".into()),
        source: LocationSource::Fallback,
    })
}
