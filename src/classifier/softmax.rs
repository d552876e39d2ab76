use serde::{Deserialize, Serialize};

/// Multinomial linear model: one weight row and intercept per class,
/// probabilities from the softmax of the class scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoftmaxRegression {
    /// `n_classes` rows of `n_features` weights.
    pub coefficients: Vec<Vec<f64>>,
    pub intercepts: Vec<f64>,
}

impl SoftmaxRegression {
    pub fn n_classes(&self) -> usize {
        self.intercepts.len()
    }

    pub fn check(&self, n_features: usize) -> Result<(), String> {
        if self.coefficients.len() != self.intercepts.len() {
            return Err(format!(
                "{} coefficient rows but {} intercepts",
                self.coefficients.len(),
                self.intercepts.len()
            ));
        }
        for (k, row) in self.coefficients.iter().enumerate() {
            if row.len() != n_features {
                return Err(format!(
                    "coefficient row {k} has {} weights, model has {n_features} features",
                    row.len()
                ));
            }
            if !row.iter().chain([&self.intercepts[k]]).all(|w| w.is_finite()) {
                return Err(format!("coefficient row {k} has non-finite weights"));
            }
        }
        Ok(())
    }

    pub fn decision_function(&self, row: &[f64]) -> Vec<f64> {
        self.coefficients
            .iter()
            .zip(&self.intercepts)
            .map(|(w, b)| w.iter().zip(row).map(|(w, x)| w * x).sum::<f64>() + b)
            .collect()
    }

    /// Class probabilities; always sums to 1.
    ///
    /// Scores that overflow to infinity split the mass evenly between the
    /// classes tied at the top. A NaN score counts as negative infinity.
    pub fn predict_proba(&self, row: &[f64]) -> Vec<f64> {
        let scores: Vec<f64> = self
            .decision_function(row)
            .into_iter()
            .map(|s| if s.is_nan() { f64::NEG_INFINITY } else { s })
            .collect();
        let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if max.is_infinite() {
            log::warn!("Softmax scores overflowed ({scores:?}); splitting between top classes");
            let top: Vec<bool> = scores
                .iter()
                .map(|s| max == f64::NEG_INFINITY || *s == max)
                .collect();
            let n = top.iter().filter(|t| **t).count() as f64;
            return top.into_iter().map(|t| if t { 1.0 / n } else { 0.0 }).collect();
        }
        let exp: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
        let total: f64 = exp.iter().sum();
        exp.into_iter().map(|e| e / total).collect()
    }
}
