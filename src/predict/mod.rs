pub mod classifier;
pub mod scaler;

pub use classifier::NearestCentroidClassifier;
pub use scaler::StandardScaler;

use crate::config::ModelConfig;
use crate::error::Result;
use crate::models::FeatureVector;

/// Feature scaler fit on the fixed [N, P, K, temperature, humidity, ph,
/// rainfall] column order. Implementations report failures as
/// `ScalingFailed`.
pub trait Scaler: Send + Sync {
    fn transform(&self, features: &FeatureVector) -> Result<FeatureVector>;
}

/// Trained classifier over scaled feature vectors. Implementations report
/// failures as `PredictionFailed`.
pub trait Predictor: Send + Sync {
    fn predict(&self, features: &FeatureVector) -> Result<String>;
}

/// The trained model and its scaler, loaded once at process startup and
/// treated as read-only for the process lifetime.
pub struct ModelArtifacts {
    pub scaler: Box<dyn Scaler>,
    pub predictor: Box<dyn Predictor>,
}

impl ModelArtifacts {
    /// Load both artifacts from disk. A failure here leaves the engine
    /// answering `MissingModelArtifacts` for every request; loading is never
    /// re-attempted per call.
    pub fn load(config: &ModelConfig) -> Result<Self> {
        let scaler = StandardScaler::load(&config.scaler_path)?;
        let predictor = NearestCentroidClassifier::load(&config.model_path)?;

        Ok(Self {
            scaler: Box::new(scaler),
            predictor: Box::new(predictor),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shipped_artifacts_load_and_classify() {
        let artifacts = ModelArtifacts::load(&ModelConfig::default()).unwrap();

        // Wet, warm, high-rainfall profile from the training data.
        let features = FeatureVector::from_values([90.0, 42.0, 43.0, 20.8, 82.0, 6.5, 202.9]);
        let scaled = artifacts.scaler.transform(&features).unwrap();
        let crop = artifacts.predictor.predict(&scaled).unwrap();

        assert_eq!(crop, "rice");
    }

    #[test]
    fn missing_artifact_file_fails_load() {
        let config = ModelConfig {
            scaler_path: "model/does_not_exist.json".into(),
            model_path: "model/crop_model.json".into(),
        };
        assert!(ModelArtifacts::load(&config).is_err());
    }
}
