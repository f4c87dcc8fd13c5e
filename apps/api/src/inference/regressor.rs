//! Standard scaler and regressors exported from the training pipeline.
//!
//! Two regressor shapes are supported:
//! - `linear`: `intercept + coefficients · x`
//! - `forest`: flat-array decision trees (the layout scikit-learn uses in
//!   `tree_`), aggregated by mean (random forest) or sum (boosting).

use serde::Deserialize;

use crate::inference::ModelError;

const LEAF: i64 = -1;

#[derive(Debug, Clone, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl StandardScaler {
    pub fn dimensions(&self) -> usize {
        self.mean.len()
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        if self.mean.len() != self.scale.len() {
            return Err(ModelError::InvalidArtifact(format!(
                "scaler has {} means but {} scales",
                self.mean.len(),
                self.scale.len()
            )));
        }
        Ok(())
    }

    /// `(x - mean) / scale`; a zero scale (constant training column) divides by one.
    pub fn transform(&self, x: &[f64]) -> Result<Vec<f64>, ModelError> {
        check_dimensions(self.dimensions(), x.len())?;
        Ok(x.iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(value, (mean, scale))| {
                let scale = if *scale == 0.0 { 1.0 } else { *scale };
                (value - mean) / scale
            })
            .collect())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregate {
    #[default]
    Mean,
    Sum,
}

/// One decision tree in flat-array form. Node 0 is the root; leaves have
/// `children_left == children_right == -1`.
#[derive(Debug, Clone, Deserialize)]
pub struct Tree {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub value: Vec<f64>,
}

impl Tree {
    fn validate(&self, n_features: Option<usize>) -> Result<(), ModelError> {
        let nodes = self.value.len();
        if nodes == 0 {
            return Err(ModelError::InvalidArtifact("tree has no nodes".to_string()));
        }
        let same_len = [
            self.children_left.len(),
            self.children_right.len(),
            self.feature.len(),
            self.threshold.len(),
        ]
        .iter()
        .all(|&len| len == nodes);
        if !same_len {
            return Err(ModelError::InvalidArtifact(
                "tree node arrays differ in length".to_string(),
            ));
        }
        for node in 0..nodes {
            let (left, right) = (self.children_left[node], self.children_right[node]);
            if left == LEAF && right == LEAF {
                continue;
            }
            // Children always come after their parent, which also rules out cycles.
            let in_range = |child: i64| child > node as i64 && (child as usize) < nodes;
            if !in_range(left) || !in_range(right) {
                return Err(ModelError::InvalidArtifact(format!(
                    "tree node {node} has invalid children ({left}, {right})"
                )));
            }
            let feature = self.feature[node];
            let feature_ok = feature >= 0 && n_features.map_or(true, |n| (feature as usize) < n);
            if !feature_ok {
                return Err(ModelError::InvalidArtifact(format!(
                    "tree node {node} splits on invalid feature {feature}"
                )));
            }
        }
        Ok(())
    }

    fn max_feature(&self) -> Option<usize> {
        self.feature
            .iter()
            .zip(&self.children_left)
            .filter(|&(_, &left)| left != LEAF)
            .map(|(&f, _)| f as usize)
            .max()
    }

    fn predict(&self, x: &[f64]) -> f64 {
        let mut node = 0usize;
        while self.children_left[node] != LEAF {
            let feature = self.feature[node] as usize;
            node = if x[feature] <= self.threshold[node] {
                self.children_left[node] as usize
            } else {
                self.children_right[node] as usize
            };
        }
        self.value[node]
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Regressor {
    Linear {
        coefficients: Vec<f64>,
        intercept: f64,
    },
    Forest {
        trees: Vec<Tree>,
        #[serde(default)]
        aggregate: Aggregate,
        #[serde(default)]
        base_score: f64,
        /// Width of the training matrix; trees may not split on every column.
        #[serde(default)]
        n_features: Option<usize>,
    },
}

impl Regressor {
    /// Input width the regressor expects, when the artifact pins it.
    pub fn dimensions(&self) -> Option<usize> {
        match self {
            Regressor::Linear { coefficients, .. } => Some(coefficients.len()),
            Regressor::Forest { n_features, .. } => *n_features,
        }
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        match self {
            Regressor::Linear { .. } => Ok(()),
            Regressor::Forest {
                trees, n_features, ..
            } => {
                if trees.is_empty() {
                    return Err(ModelError::InvalidArtifact("forest has no trees".to_string()));
                }
                trees.iter().try_for_each(|tree| tree.validate(*n_features))
            }
        }
    }

    pub fn predict(&self, x: &[f64]) -> Result<f64, ModelError> {
        let prediction = match self {
            Regressor::Linear {
                coefficients,
                intercept,
            } => {
                check_dimensions(coefficients.len(), x.len())?;
                intercept + coefficients.iter().zip(x).map(|(c, v)| c * v).sum::<f64>()
            }
            Regressor::Forest {
                trees,
                aggregate,
                base_score,
                n_features,
            } => {
                match n_features {
                    Some(expected) => check_dimensions(*expected, x.len())?,
                    None => {
                        let needed = trees.iter().filter_map(Tree::max_feature).max();
                        if let Some(max) = needed {
                            if max >= x.len() {
                                return Err(ModelError::DimensionMismatch {
                                    expected: max + 1,
                                    got: x.len(),
                                });
                            }
                        }
                    }
                }
                let total: f64 = trees.iter().map(|tree| tree.predict(x)).sum();
                let combined = match aggregate {
                    Aggregate::Mean => total / trees.len() as f64,
                    Aggregate::Sum => total,
                };
                base_score + combined
            }
        };

        if prediction.is_finite() {
            Ok(prediction)
        } else {
            Err(ModelError::NonFinite)
        }
    }
}

fn check_dimensions(expected: usize, got: usize) -> Result<(), ModelError> {
    if expected == got {
        Ok(())
    } else {
        Err(ModelError::DimensionMismatch { expected, got })
    }
}
