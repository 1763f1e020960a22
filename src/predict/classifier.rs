use super::Predictor;
use crate::error::{CropSenseError, Result};
use crate::models::FeatureVector;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Nearest-centroid classifier exported at training time: one centroid per
/// crop label, in the scaled feature space.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearestCentroidClassifier {
    classes: Vec<String>,
    centroids: Vec<[f64; 7]>,
}

impl NearestCentroidClassifier {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            CropSenseError::Config(format!("model artifact {}: {}", path.display(), e))
        })?;
        let classifier: NearestCentroidClassifier = serde_json::from_str(&raw)?;
        classifier.validate()?;
        Ok(classifier)
    }

    pub fn from_parts(classes: Vec<String>, centroids: Vec<[f64; 7]>) -> Result<Self> {
        let classifier = Self { classes, centroids };
        classifier.validate()?;
        Ok(classifier)
    }

    fn validate(&self) -> Result<()> {
        if self.classes.is_empty() {
            return Err(CropSenseError::PredictionFailed(
                "model artifact has no classes".into(),
            ));
        }
        if self.classes.len() != self.centroids.len() {
            return Err(CropSenseError::PredictionFailed(format!(
                "model artifact has {} classes but {} centroids",
                self.classes.len(),
                self.centroids.len()
            )));
        }
        Ok(())
    }
}

impl Predictor for NearestCentroidClassifier {
    fn predict(&self, features: &FeatureVector) -> Result<String> {
        let mut best: Option<(usize, f64)> = None;

        for (index, centroid) in self.centroids.iter().enumerate() {
            let distance: f64 = centroid
                .iter()
                .zip(features.values().iter())
                .map(|(c, v)| (c - v) * (c - v))
                .sum();

            if !distance.is_finite() {
                return Err(CropSenseError::PredictionFailed(format!(
                    "non-finite distance to class {}",
                    self.classes[index]
                )));
            }

            // Strict comparison: ties resolve to the first class, keeping
            // prediction deterministic.
            if best.map_or(true, |(_, d)| distance < d) {
                best = Some((index, distance));
            }
        }

        best.map(|(index, _)| self.classes[index].clone())
            .ok_or_else(|| CropSenseError::PredictionFailed("no centroids to compare".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_class_model() -> NearestCentroidClassifier {
        NearestCentroidClassifier::from_parts(
            vec!["rice".into(), "maize".into()],
            vec![[1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 2.0], [0.0; 7]],
        )
        .unwrap()
    }

    #[test]
    fn predicts_nearest_centroid() {
        let model = two_class_model();

        let near_rice = FeatureVector::from_values([0.9, 0.1, 0.0, 0.0, 0.0, 0.0, 1.8]);
        assert_eq!(model.predict(&near_rice).unwrap(), "rice");

        let near_maize = FeatureVector::from_values([0.1, 0.0, 0.0, 0.1, 0.0, 0.0, 0.2]);
        assert_eq!(model.predict(&near_maize).unwrap(), "maize");
    }

    #[test]
    fn prediction_is_deterministic() {
        let model = two_class_model();
        let input = FeatureVector::from_values([0.5, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0]);

        let first = model.predict(&input).unwrap();
        let second = model.predict(&input).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn empty_model_is_rejected() {
        let result = NearestCentroidClassifier::from_parts(Vec::new(), Vec::new());
        assert!(matches!(result, Err(CropSenseError::PredictionFailed(_))));
    }

    #[test]
    fn length_mismatch_is_rejected() {
        let result =
            NearestCentroidClassifier::from_parts(vec!["rice".into(), "maize".into()], vec![[0.0; 7]]);
        assert!(matches!(result, Err(CropSenseError::PredictionFailed(_))));
    }

    #[test]
    fn non_finite_input_fails_prediction() {
        let model = two_class_model();
        let input = FeatureVector::from_values([f64::NAN, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        assert!(matches!(
            model.predict(&input),
            Err(CropSenseError::PredictionFailed(_))
        ));
    }
}
