use super::soil::{resolve_soil, validate_soil};
use super::weather::WeatherService;
use crate::datasources::GeoLocator;
use crate::error::{CropSenseError, Result};
use crate::models::{
    Coordinate, FeatureVector, IotSoilReading, LocationInfo, RecommendationMode,
    RecommendationResult, SoilInput, SoilSample, SoilSource, WeatherReading,
};
use crate::predict::ModelArtifacts;
use std::sync::Arc;

/// A live-mode request: soil values from the caller (optionally overridden
/// per-field by sensors), weather resolved from the network.
#[derive(Debug, Clone, Default)]
pub struct LiveRequest {
    pub soil: SoilInput,
    pub iot: Option<IotSoilReading>,
    /// Skips IP geolocation when the caller already knows the coordinates.
    pub geo_hint: Option<Coordinate>,
}

/// A manual-mode request: every feature supplied by the caller, no provider
/// I/O at all.
#[derive(Debug, Clone, Copy)]
pub struct ManualRequest {
    pub n: f64,
    pub p: f64,
    pub k: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub ph: f64,
    pub rainfall: f64,
}

/// Orchestrates one recommendation request:
/// location → weather → soil → feature vector → scale → predict → envelope.
///
/// Holds no mutable state; the artifacts handle is loaded once at startup and
/// shared read-only across requests.
pub struct RecommendationEngine {
    artifacts: Option<Arc<ModelArtifacts>>,
    geolocator: GeoLocator,
    weather: WeatherService,
}

impl RecommendationEngine {
    pub fn new(
        artifacts: Option<Arc<ModelArtifacts>>,
        geolocator: GeoLocator,
        weather: WeatherService,
    ) -> Self {
        Self {
            artifacts,
            geolocator,
            weather,
        }
    }

    /// Live mode: resolve location and weather from the network, soil from
    /// manual input plus optional per-field IoT overrides.
    ///
    /// Weather failure aborts the request; the predictor needs real
    /// temperature and humidity. Location failure never aborts (it degrades
    /// inside the locator), and rainfall failure degrades to 0.0.
    pub async fn recommend_live(&self, request: LiveRequest) -> Result<RecommendationResult> {
        let artifacts = self.artifacts()?;

        let location = match request.geo_hint {
            Some(coordinate) => LocationInfo::from_caller(coordinate),
            None => self.geolocator.locate().await,
        };
        tracing::info!(
            "location resolved: {}, {} ({})",
            location.city,
            location.country,
            location.source
        );

        let weather = self.weather.fetch(&location.coordinate).await?;

        let soil = resolve_soil(&request.soil, request.iot.as_ref());
        validate_soil(&soil)?;

        let crop = classify(artifacts, &FeatureVector::from_readings(&soil, &weather))?;

        Ok(
            RecommendationResult::new(crop, RecommendationMode::Live, weather, soil)
                .with_location(location),
        )
    }

    /// Manual mode: all seven features supplied by the caller. Deterministic;
    /// identical inputs yield identical crops.
    pub async fn recommend_manual(&self, request: ManualRequest) -> Result<RecommendationResult> {
        let artifacts = self.artifacts()?;

        validate_manual_weather(&request)?;

        let soil = SoilSample {
            n: request.n,
            p: request.p,
            k: request.k,
            ph: request.ph,
            source: SoilSource::Manual,
        };
        validate_soil(&soil)?;

        let weather = WeatherReading::manual(request.temperature, request.humidity, request.rainfall);

        let crop = classify(artifacts, &FeatureVector::from_readings(&soil, &weather))?;

        Ok(RecommendationResult::new(
            crop,
            RecommendationMode::Manual,
            weather,
            soil,
        ))
    }

    /// Checked before any outbound call; a process that failed to load its
    /// artifacts at startup answers every request this way.
    fn artifacts(&self) -> Result<&ModelArtifacts> {
        self.artifacts
            .as_deref()
            .ok_or(CropSenseError::MissingModelArtifacts)
    }
}

fn classify(artifacts: &ModelArtifacts, features: &FeatureVector) -> Result<String> {
    let scaled = artifacts
        .scaler
        .transform(features)
        .map_err(|e| match e {
            scaling @ CropSenseError::ScalingFailed(_) => scaling,
            other => CropSenseError::ScalingFailed(other.to_string()),
        })?;

    artifacts.predictor.predict(&scaled).map_err(|e| match e {
        prediction @ CropSenseError::PredictionFailed(_) => prediction,
        other => CropSenseError::PredictionFailed(other.to_string()),
    })
}

fn validate_manual_weather(request: &ManualRequest) -> Result<()> {
    if !request.temperature.is_finite() {
        return Err(CropSenseError::InvalidInput("temperature".into()));
    }
    if !request.humidity.is_finite() || !(0.0..=100.0).contains(&request.humidity) {
        return Err(CropSenseError::InvalidInput("humidity".into()));
    }
    if !request.rainfall.is_finite() || request.rainfall < 0.0 {
        return Err(CropSenseError::InvalidInput("rainfall".into()));
    }
    Ok(())
}
