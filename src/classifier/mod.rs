/// Classifier layer: the pre-trained model behind a narrow trait.
///
/// ```text
///  model artifact (.json)
///        │
///        ▼
///   ┌──────────┐
///   │ artifact  │  parse + shape checks → ModelArtifact
///   └──────────┘
///        │  (scaler → forest | softmax)
///        ▼
///   ┌──────────┐
///   │ adapter   │  DerivedFeatureVector → input row → label
///   └──────────┘
/// ```

pub mod adapter;
pub mod artifact;
pub mod forest;
pub mod softmax;

pub use adapter::ClassifierAdapter;
pub use artifact::{ArtifactError, ModelArtifact};

/// A fitted multi-class model that scores one input row at a time.
///
/// Implementations are immutable after construction and shared across
/// threads.
pub trait Classifier: Send + Sync {
    /// Number of inputs expected in each row.
    fn n_features(&self) -> usize;

    /// Number of classes scored by [`Classifier::predict_proba`].
    fn n_classes(&self) -> usize;

    /// Short description for logs, e.g. `random_forest (100 trees)`.
    fn describe(&self) -> String;

    /// Class probabilities for one row of `n_features` values.
    fn predict_proba(&self, row: &[f64]) -> Vec<f64>;

    /// Index of the most probable class.
    fn predict(&self, row: &[f64]) -> usize {
        argmax(&self.predict_proba(row))
    }
}

/// Index of the first maximum. Empty input yields 0.
pub fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (k, &v) in values.iter().enumerate() {
        if v > values[best] {
            best = k;
        }
    }
    best
}
