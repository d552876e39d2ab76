use std::collections::HashSet;
use std::path::Path;

use super::artifact::{ArtifactError, ModelArtifact};
use super::{argmax, Classifier};
use crate::data::model::{
    Classification, ClassificationLabel, DerivedFeatureVector, FeatureColumn,
};

/// Bridges derived feature vectors to a loaded [`Classifier`].
///
/// Built once at startup and shared read-only (behind an `Arc`) for the
/// rest of the process.
pub struct ClassifierAdapter {
    columns: Vec<FeatureColumn>,
    model: Box<dyn Classifier>,
}

impl std::fmt::Debug for ClassifierAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassifierAdapter")
            .field("columns", &self.columns)
            .field("model", &self.model.describe())
            .finish()
    }
}

impl ClassifierAdapter {
    /// Load an artifact from disk and resolve its input columns.
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        let artifact = ModelArtifact::from_path(path)?;
        let adapter = Self::from_artifact(artifact)?;
        log::info!(
            "Loaded classifier {} from {} with columns {:?}",
            adapter.model.describe(),
            path.display(),
            adapter.column_names()
        );
        Ok(adapter)
    }

    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self, ArtifactError> {
        let columns = resolve_columns(&artifact.feature_names)?;
        Self::new(columns, Box::new(artifact))
    }

    /// Wrap any classifier whose inputs are `columns`, in order.
    pub fn new(
        columns: Vec<FeatureColumn>,
        model: Box<dyn Classifier>,
    ) -> Result<Self, ArtifactError> {
        let expected = ClassificationLabel::ALL.len();
        if model.n_classes() != expected {
            return Err(ArtifactError::ClassCount {
                found: model.n_classes(),
                expected,
            });
        }
        if model.n_features() != columns.len() {
            return Err(ArtifactError::Shape(format!(
                "model takes {} inputs but {} columns were given",
                model.n_features(),
                columns.len()
            )));
        }
        Ok(Self { columns, model })
    }

    pub fn column_names(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.name()).collect()
    }

    pub fn describe(&self) -> String {
        self.model.describe()
    }

    /// The model's input row for `vector`.
    pub fn input_row(&self, vector: &DerivedFeatureVector) -> Vec<f64> {
        self.columns.iter().map(|c| vector.value(*c)).collect()
    }

    /// Score a feature vector and map the winning class to its label.
    pub fn classify(&self, vector: &DerivedFeatureVector) -> Classification {
        let proba = self.model.predict_proba(&self.input_row(vector));
        let probabilities: [f64; 3] =
            std::array::from_fn(|k| proba.get(k).copied().unwrap_or(0.0));
        let label = ClassificationLabel::ALL[argmax(&probabilities)];
        log::debug!("Classified {vector:?} as {label} ({probabilities:?})");
        Classification {
            label,
            probabilities,
        }
    }
}

/// Map artifact column names onto derived feature columns.
fn resolve_columns(names: &[String]) -> Result<Vec<FeatureColumn>, ArtifactError> {
    let mut seen = HashSet::new();
    names
        .iter()
        .map(|name| {
            let column = FeatureColumn::from_name(name)
                .ok_or_else(|| ArtifactError::UnknownFeature(name.clone()))?;
            if !seen.insert(column) {
                return Err(ArtifactError::DuplicateFeature(name.clone()));
            }
            Ok(column)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::PhotometricRecord;
    use crate::data::transform::transform;

    /// Always votes for a fixed class and records nothing else.
    struct Fixed {
        n_features: usize,
        proba: Vec<f64>,
    }

    impl Classifier for Fixed {
        fn n_features(&self) -> usize {
            self.n_features
        }
        fn n_classes(&self) -> usize {
            self.proba.len()
        }
        fn describe(&self) -> String {
            "fixed".into()
        }
        fn predict_proba(&self, _row: &[f64]) -> Vec<f64> {
            self.proba.clone()
        }
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn vector() -> DerivedFeatureVector {
        transform(&PhotometricRecord {
            ra: 10.0,
            dec: 20.0,
            u: 19.0,
            g: 18.0,
            r: 17.5,
            i: 17.25,
            z: 17.0,
            redshift: 0.3,
            extinction_u: 0.5,
            extinction_g: 0.25,
            extinction_r: 0.0,
            extinction_i: 0.0,
            extinction_z: 0.0,
        })
    }

    #[test]
    fn test_input_row_follows_declared_order() {
        let columns = resolve_columns(&names(&["i-z", "redshift", "u-g", "dec"])).unwrap();
        let adapter = ClassifierAdapter::new(
            columns,
            Box::new(Fixed {
                n_features: 4,
                proba: vec![1.0, 0.0, 0.0],
            }),
        )
        .unwrap();
        assert_eq!(adapter.input_row(&vector()), vec![0.25, 0.3, 0.75, 20.0]);
        assert_eq!(adapter.column_names(), vec!["i-z", "redshift", "u-g", "dec"]);
    }

    #[test]
    fn test_unknown_and_duplicate_columns() {
        let err = resolve_columns(&names(&["ra", "extinction_u"])).unwrap_err();
        assert!(matches!(err, ArtifactError::UnknownFeature(ref n) if n == "extinction_u"));

        let err = resolve_columns(&names(&["ra", "ra"])).unwrap_err();
        assert!(matches!(err, ArtifactError::DuplicateFeature(_)));
    }

    #[test]
    fn test_wrong_class_count_rejected() {
        let err = ClassifierAdapter::new(
            vec![FeatureColumn::Ra],
            Box::new(Fixed {
                n_features: 1,
                proba: vec![0.5, 0.5],
            }),
        )
        .err()
        .unwrap();
        assert!(matches!(err, ArtifactError::ClassCount { found: 2, expected: 3 }));
    }

    #[test]
    fn test_feature_count_mismatch_rejected() {
        let err = ClassifierAdapter::new(
            vec![FeatureColumn::Ra],
            Box::new(Fixed {
                n_features: 2,
                proba: vec![0.2, 0.3, 0.5],
            }),
        )
        .err()
        .unwrap();
        assert!(matches!(err, ArtifactError::Shape(_)));
    }

    #[test]
    fn test_label_mapping_from_index() {
        for (proba, label) in [
            (vec![0.6, 0.3, 0.1], ClassificationLabel::Galaxy),
            (vec![0.1, 0.6, 0.3], ClassificationLabel::Quasar),
            (vec![0.1, 0.3, 0.6], ClassificationLabel::Star),
        ] {
            let adapter = ClassifierAdapter::new(
                vec![FeatureColumn::UG],
                Box::new(Fixed {
                    n_features: 1,
                    proba: proba.clone(),
                }),
            )
            .unwrap();
            let result = adapter.classify(&vector());
            assert_eq!(result.label, label);
            assert_eq!(result.probabilities.to_vec(), proba);
        }
    }
}
