use serde::{Deserialize, Serialize};

/// Marker used in `children_left` / `children_right` for leaf nodes.
pub const LEAF: i64 = -1;

// ---------------------------------------------------------------------------
// DecisionTree – flattened node arrays
// ---------------------------------------------------------------------------

/// One decision tree stored as parallel node arrays.
///
/// Node `k` is a leaf when `children_left[k] == -1`. Internal nodes send a
/// row left when `row[feature[k]] <= threshold[k]`. `value[k]` holds the
/// per-class weights seen at that node; only leaf values are used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub value: Vec<Vec<f64>>,
}

impl DecisionTree {
    pub fn n_nodes(&self) -> usize {
        self.children_left.len()
    }

    /// Width of the per-node value vectors.
    pub fn n_classes(&self) -> usize {
        self.value.first().map_or(0, Vec::len)
    }

    fn is_leaf(&self, node: usize) -> bool {
        self.children_left[node] == LEAF
    }

    /// Check array lengths and node links.
    ///
    /// Children must point strictly forward so traversal always terminates.
    pub fn check(&self, n_features: usize) -> Result<(), String> {
        let n = self.n_nodes();
        if n == 0 {
            return Err("tree has no nodes".into());
        }
        if self.children_right.len() != n
            || self.feature.len() != n
            || self.threshold.len() != n
            || self.value.len() != n
        {
            return Err(format!(
                "node arrays differ in length (children_left {}, children_right {}, \
                 feature {}, threshold {}, value {})",
                n,
                self.children_right.len(),
                self.feature.len(),
                self.threshold.len(),
                self.value.len()
            ));
        }
        let n_classes = self.n_classes();
        for node in 0..n {
            if self.value[node].len() != n_classes {
                return Err(format!(
                    "node {node} has {} class weights, expected {n_classes}",
                    self.value[node].len()
                ));
            }
            let (left, right) = (self.children_left[node], self.children_right[node]);
            if left == LEAF {
                if right != LEAF {
                    return Err(format!("node {node} has a right child but no left child"));
                }
                let weights = &self.value[node];
                let total: f64 = weights.iter().sum();
                if weights.iter().any(|w| !(*w >= 0.0)) || !(total > 0.0 && total.is_finite()) {
                    return Err(format!("leaf {node} has no usable class weights"));
                }
                continue;
            }
            for child in [left, right] {
                if child <= node as i64 || child >= n as i64 {
                    return Err(format!("node {node} links to invalid child {child}"));
                }
            }
            let feature = self.feature[node];
            if feature < 0 || feature >= n_features as i64 {
                return Err(format!(
                    "node {node} splits on feature {feature}, model has {n_features} features"
                ));
            }
        }
        Ok(())
    }

    /// Index of the leaf reached by `row`.
    pub fn leaf_for(&self, row: &[f64]) -> usize {
        let mut node = 0;
        while !self.is_leaf(node) {
            let x = row[self.feature[node] as usize];
            node = if x <= self.threshold[node] {
                self.children_left[node] as usize
            } else {
                self.children_right[node] as usize
            };
        }
        node
    }

    /// Normalised class distribution of the leaf reached by `row`.
    pub fn predict_proba(&self, row: &[f64]) -> Vec<f64> {
        let weights = &self.value[self.leaf_for(row)];
        let total: f64 = weights.iter().sum();
        weights.iter().map(|w| w / total).collect()
    }
}

// ---------------------------------------------------------------------------
// RandomForest – averaged trees
// ---------------------------------------------------------------------------

/// Ensemble of decision trees; probabilities are averaged across trees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    pub trees: Vec<DecisionTree>,
}

impl RandomForest {
    pub fn check(&self, n_features: usize) -> Result<(), String> {
        let first = self.trees.first().ok_or("forest has no trees")?;
        let n_classes = first.n_classes();
        for (k, tree) in self.trees.iter().enumerate() {
            tree.check(n_features)
                .map_err(|e| format!("tree {k}: {e}"))?;
            if tree.n_classes() != n_classes {
                return Err(format!(
                    "tree {k} scores {} classes, tree 0 scores {n_classes}",
                    tree.n_classes()
                ));
            }
        }
        Ok(())
    }

    pub fn n_classes(&self) -> usize {
        self.trees.first().map_or(0, DecisionTree::n_classes)
    }

    pub fn predict_proba(&self, row: &[f64]) -> Vec<f64> {
        let mut sum = vec![0.0; self.n_classes()];
        for tree in &self.trees {
            for (acc, p) in sum.iter_mut().zip(tree.predict_proba(row)) {
                *acc += p;
            }
        }
        let n = self.trees.len() as f64;
        sum.into_iter().map(|s| s / n).collect()
    }
}
