use thiserror::Error;

#[derive(Error, Debug)]
pub enum CropSenseError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Failed to fetch weather data. Check API key or internet connection.")]
    MissingWeatherData,

    #[error("Model or scaler not loaded properly.")]
    MissingModelArtifacts,

    #[error("Scaling failed: {0}")]
    ScalingFailed(String),

    #[error("Model prediction failed: {0}")]
    PredictionFailed(String),
}

pub type Result<T> = std::result::Result<T, CropSenseError>;
