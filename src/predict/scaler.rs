use super::Scaler;
use crate::error::{CropSenseError, Result};
use crate::models::{FeatureVector, FEATURE_NAMES};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Standardization parameters exported at training time: per-column mean and
/// standard deviation over the training set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    mean: [f64; 7],
    scale: [f64; 7],
}

impl StandardScaler {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            CropSenseError::Config(format!("scaler artifact {}: {}", path.display(), e))
        })?;
        let scaler: StandardScaler = serde_json::from_str(&raw)?;
        scaler.validate()?;
        Ok(scaler)
    }

    pub fn from_params(mean: [f64; 7], scale: [f64; 7]) -> Result<Self> {
        let scaler = Self { mean, scale };
        scaler.validate()?;
        Ok(scaler)
    }

    fn validate(&self) -> Result<()> {
        for (i, value) in self.mean.iter().enumerate() {
            if !value.is_finite() {
                return Err(CropSenseError::ScalingFailed(format!(
                    "non-finite mean for column {}",
                    FEATURE_NAMES[i]
                )));
            }
        }
        for (i, value) in self.scale.iter().enumerate() {
            if !value.is_finite() || *value == 0.0 {
                return Err(CropSenseError::ScalingFailed(format!(
                    "degenerate scale for column {}",
                    FEATURE_NAMES[i]
                )));
            }
        }
        Ok(())
    }
}

impl Scaler for StandardScaler {
    fn transform(&self, features: &FeatureVector) -> Result<FeatureVector> {
        let mut scaled = [0.0; 7];

        for (i, value) in features.values().iter().enumerate() {
            if !value.is_finite() {
                return Err(CropSenseError::ScalingFailed(format!(
                    "non-finite value for column {}",
                    FEATURE_NAMES[i]
                )));
            }
            scaled[i] = (value - self.mean[i]) / self.scale[i];
        }

        Ok(FeatureVector::from_values(scaled))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_standardizes_each_column() {
        let scaler = StandardScaler::from_params(
            [10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0],
            [2.0, 2.0, 2.0, 2.0, 2.0, 2.0, 2.0],
        )
        .unwrap();

        let input = FeatureVector::from_values([12.0, 20.0, 26.0, 44.0, 50.0, 58.0, 70.0]);
        let scaled = scaler.transform(&input).unwrap();

        assert_eq!(scaled.values(), &[1.0, 0.0, -2.0, 2.0, 0.0, -1.0, 0.0]);
    }

    #[test]
    fn zero_scale_is_rejected_at_load() {
        let result = StandardScaler::from_params([0.0; 7], [1.0, 1.0, 0.0, 1.0, 1.0, 1.0, 1.0]);
        assert!(matches!(result, Err(CropSenseError::ScalingFailed(_))));
    }

    #[test]
    fn non_finite_input_fails_transform() {
        let scaler = StandardScaler::from_params([0.0; 7], [1.0; 7]).unwrap();
        let input = FeatureVector::from_values([1.0, 2.0, f64::NAN, 4.0, 5.0, 6.0, 7.0]);

        assert!(matches!(
            scaler.transform(&input),
            Err(CropSenseError::ScalingFailed(_))
        ));
    }

    #[test]
    fn artifact_json_round_trip() {
        let scaler = StandardScaler::from_params(
            [50.55, 53.36, 48.15, 25.62, 71.48, 6.47, 103.46],
            [36.92, 32.99, 50.65, 5.06, 22.26, 0.77, 54.96],
        )
        .unwrap();

        let json = serde_json::to_string(&scaler).unwrap();
        let restored: StandardScaler = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.mean, scaler.mean);
        assert_eq!(restored.scale, scaler.scale);
    }
}
