use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::forest::RandomForest;
use super::softmax::SoftmaxRegression;
use super::Classifier;

/// Artifact layout version this build understands.
pub const FORMAT_VERSION: u32 = 1;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a classifier artifact could not be loaded.
#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("cannot read classifier artifact: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot parse classifier artifact: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported artifact format version {found} (expected {})", FORMAT_VERSION)]
    UnsupportedVersion { found: u32 },

    #[error("artifact expects unknown feature column '{0}'")]
    UnknownFeature(String),

    #[error("artifact lists feature column '{0}' more than once")]
    DuplicateFeature(String),

    #[error("artifact scores {found} classes, expected {expected} (Galaxy, Quasar, Star)")]
    ClassCount { found: usize, expected: usize },

    #[error("malformed artifact: {0}")]
    Shape(String),
}

// ---------------------------------------------------------------------------
// Artifact document
// ---------------------------------------------------------------------------

/// Per-feature standardisation applied before the estimator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl StandardScaler {
    /// `(x - mean) / scale`; a zero scale leaves the centred value as is.
    pub fn apply(&self, row: &[f64]) -> Vec<f64> {
        row.iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(x, (m, s))| if *s == 0.0 { x - m } else { (x - m) / s })
            .collect()
    }
}

/// The fitted estimator stored in the artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Estimator {
    RandomForest(RandomForest),
    Softmax(SoftmaxRegression),
}

/// A serialized, pre-trained classifier.
///
/// ```json
/// {
///   "format_version": 1,
///   "feature_names": ["ra", "dec", "redshift", "u-g", "g-r", "r-i", "i-z"],
///   "scaler": { "mean": [...], "scale": [...] },
///   "estimator": { "kind": "random_forest", "trees": [...] }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub format_version: u32,
    /// Input columns in the order the estimator was fitted on.
    pub feature_names: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scaler: Option<StandardScaler>,
    pub estimator: Estimator,
}

impl ModelArtifact {
    /// Read and shape-check an artifact from disk.
    pub fn from_path(path: &Path) -> Result<Self, ArtifactError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ArtifactError> {
        let artifact: ModelArtifact = serde_json::from_str(text)?;
        artifact.check()?;
        Ok(artifact)
    }

    /// Structural checks that make later prediction infallible.
    pub fn check(&self) -> Result<(), ArtifactError> {
        if self.format_version != FORMAT_VERSION {
            return Err(ArtifactError::UnsupportedVersion {
                found: self.format_version,
            });
        }
        let n_features = self.feature_names.len();
        if n_features == 0 {
            return Err(ArtifactError::Shape("no feature columns declared".into()));
        }
        if let Some(scaler) = &self.scaler {
            if scaler.mean.len() != n_features || scaler.scale.len() != n_features {
                return Err(ArtifactError::Shape(format!(
                    "scaler has {} means and {} scales for {n_features} features",
                    scaler.mean.len(),
                    scaler.scale.len()
                )));
            }
        }
        match &self.estimator {
            Estimator::RandomForest(forest) => forest.check(n_features),
            Estimator::Softmax(model) => model.check(n_features),
        }
        .map_err(ArtifactError::Shape)
    }
}

impl Classifier for ModelArtifact {
    fn n_features(&self) -> usize {
        self.feature_names.len()
    }

    fn n_classes(&self) -> usize {
        match &self.estimator {
            Estimator::RandomForest(forest) => forest.n_classes(),
            Estimator::Softmax(model) => model.n_classes(),
        }
    }

    fn describe(&self) -> String {
        let mut details = Vec::new();
        let kind = match &self.estimator {
            Estimator::RandomForest(forest) => {
                details.push(format!("{} trees", forest.trees.len()));
                "random_forest"
            }
            Estimator::Softmax(_) => "softmax",
        };
        if self.scaler.is_some() {
            details.push("scaled".to_string());
        }
        if details.is_empty() {
            kind.to_string()
        } else {
            format!("{kind} ({})", details.join(", "))
        }
    }

    fn predict_proba(&self, row: &[f64]) -> Vec<f64> {
        let scaled;
        let row = match &self.scaler {
            Some(scaler) => {
                scaled = scaler.apply(row);
                &scaled[..]
            }
            None => row,
        };
        match &self.estimator {
            Estimator::RandomForest(forest) => forest.predict_proba(row),
            Estimator::Softmax(model) => model.predict_proba(row),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOFTMAX: &str = r#"{
        "format_version": 1,
        "feature_names": ["redshift", "u-g"],
        "scaler": { "mean": [1.0, 0.0], "scale": [2.0, 0.0] },
        "estimator": {
            "kind": "softmax",
            "coefficients": [[0.0, 1.0], [1.0, 0.0], [0.0, 0.0]],
            "intercepts": [0.0, 0.0, 0.0]
        }
    }"#;

    #[test]
    fn test_parse_softmax_artifact() {
        let artifact = ModelArtifact::from_json(SOFTMAX).unwrap();
        assert_eq!(artifact.n_features(), 2);
        assert_eq!(artifact.n_classes(), 3);
        assert_eq!(artifact.describe(), "softmax (scaled)");
        assert!(matches!(artifact.estimator, Estimator::Softmax(_)));
    }

    #[test]
    fn test_scaler_is_applied_before_estimator() {
        let artifact = ModelArtifact::from_json(SOFTMAX).unwrap();
        // redshift 5 → (5 - 1) / 2 = 2 drives the quasar score.
        assert_eq!(artifact.predict(&[5.0, 0.5]), 1);
        // zero scale passes u-g through centred: 3 - 0 = 3 beats (1 - 1) / 2 = 0.
        assert_eq!(artifact.predict(&[1.0, 3.0]), 0);
    }

    #[test]
    fn test_scaler_length_mismatch() {
        let text = SOFTMAX.replace(r#""mean": [1.0, 0.0]"#, r#""mean": [1.0]"#);
        let err = ModelArtifact::from_json(&text).unwrap_err();
        assert!(matches!(err, ArtifactError::Shape(_)));
        assert!(err.to_string().contains("1 means and 2 scales"));
    }

    #[test]
    fn test_unsupported_version() {
        let text = SOFTMAX.replace(r#""format_version": 1"#, r#""format_version": 7"#);
        let err = ModelArtifact::from_json(&text).unwrap_err();
        assert!(matches!(err, ArtifactError::UnsupportedVersion { found: 7 }));
    }

    #[test]
    fn test_unknown_estimator_kind_is_a_parse_error() {
        let text = SOFTMAX.replace(r#""kind": "softmax""#, r#""kind": "gradient_boosting""#);
        let err = ModelArtifact::from_json(&text).unwrap_err();
        assert!(matches!(err, ArtifactError::Json(_)));
    }

    #[test]
    fn test_leaf_weights_overflowing_total_are_refused() {
        let text = r#"{
            "format_version": 1,
            "feature_names": ["redshift"],
            "estimator": {
                "kind": "random_forest",
                "trees": [{
                    "children_left": [-1],
                    "children_right": [-1],
                    "feature": [-2],
                    "threshold": [-2.0],
                    "value": [[1e308, 1e308, 1e308]]
                }]
            }
        }"#;
        let err = ModelArtifact::from_json(text).unwrap_err();
        assert!(matches!(err, ArtifactError::Shape(_)));
        assert!(err.to_string().contains("leaf 0"));
    }

    #[test]
    fn test_huge_softmax_weights_still_sum_to_one() {
        let text = SOFTMAX
            .replace(r#"[[0.0, 1.0], [1.0, 0.0]"#, r#"[[1e308, 1e308], [1e308, 0.0]"#);
        let artifact = ModelArtifact::from_json(&text).unwrap();
        let p = artifact.predict_proba(&[100.0, 100.0]);
        assert!(p.iter().all(|v| v.is_finite()));
        assert!((p.iter().sum::<f64>() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = ModelArtifact::from_path(Path::new("/nonexistent/model.json")).unwrap_err();
        assert!(matches!(err, ArtifactError::Io(_)));
    }

    #[test]
    fn test_serialize_roundtrip_keeps_tag() {
        let artifact = ModelArtifact::from_json(SOFTMAX).unwrap();
        let text = serde_json::to_string(&artifact).unwrap();
        assert!(text.contains(r#""kind":"softmax""#));
        assert_eq!(ModelArtifact::from_json(&text).unwrap(), artifact);
    }
}
