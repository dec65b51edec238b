//! Booster-shaped model: gradient-boosted decision trees.
//!
//! Mirrors the low-level call convention of a raw booster: a `predict`
//! method over a plain numeric matrix with no named columns, returning one
//! probability per row. A binary logistic objective is assumed, so the
//! summed tree margin goes through the logistic link before it is returned.

use serde::{Deserialize, Serialize};

use crate::error::InferenceError;

/// One node of a decision tree.
///
/// Split rule: `row[feature] <= threshold` descends left, otherwise right.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum TreeNode {
    /// Internal split node.
    Split {
        /// Index into the feature row.
        feature: usize,
        /// Decision threshold.
        threshold: f64,
        /// Subtree for `value <= threshold`.
        left: Box<TreeNode>,
        /// Subtree for `value > threshold`.
        right: Box<TreeNode>,
    },
    /// Terminal node carrying a margin contribution.
    Leaf {
        /// Leaf value added to the ensemble margin.
        value: f64,
    },
}

impl TreeNode {
    /// Walk the tree for one row and return the reached leaf value.
    fn evaluate(&self, row: &[f64]) -> Result<f64, InferenceError> {
        let mut node = self;
        loop {
            match node {
                Self::Leaf { value } => return Ok(*value),
                Self::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let value = row.get(*feature).ok_or_else(|| {
                        InferenceError::Evaluation(format!(
                            "split references feature {feature} but row has {} features",
                            row.len()
                        ))
                    })?;
                    node = if *value <= *threshold { left } else { right };
                }
            }
        }
    }

    /// Largest feature index referenced anywhere in this tree.
    fn max_feature_index(&self) -> Option<usize> {
        match self {
            Self::Leaf { .. } => None,
            Self::Split {
                feature,
                left,
                right,
                ..
            } => {
                let mut max = *feature;
                if let Some(m) = left.max_feature_index() {
                    max = max.max(m);
                }
                if let Some(m) = right.max_feature_index() {
                    max = max.max(m);
                }
                Some(max)
            }
        }
    }
}

/// A serialized boosted-tree ensemble with a binary logistic objective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawBooster {
    /// The boosted trees, summed in order.
    pub trees: Vec<TreeNode>,
    /// Constant margin added before the trees.
    #[serde(default)]
    pub base_score: f64,
}

impl RawBooster {
    /// Probability predictions for a batch of plain numeric rows.
    pub fn predict(&self, rows: &[&[f64]]) -> Result<Vec<f64>, InferenceError> {
        rows.iter().map(|row| self.predict_row(row)).collect()
    }

    /// Probability for one row: summed margin through the logistic link.
    fn predict_row(&self, row: &[f64]) -> Result<f64, InferenceError> {
        let mut margin = self.base_score;
        for tree in &self.trees {
            margin += tree.evaluate(row)?;
        }

        let probability = sigmoid(margin);
        if probability.is_finite() {
            Ok(probability)
        } else {
            Err(InferenceError::Evaluation(String::from(
                "booster produced a non-finite probability",
            )))
        }
    }

    /// Consistency check against the expected feature count.
    pub(crate) fn validate(&self, expected_features: usize) -> Result<(), String> {
        if self.trees.is_empty() {
            return Err(String::from("booster has no trees"));
        }
        for (index, tree) in self.trees.iter().enumerate() {
            if let Some(max) = tree.max_feature_index() {
                if max >= expected_features {
                    return Err(format!(
                        "tree {index} splits on feature {max}, pipeline provides {expected_features} features"
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Logistic function.
fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

// =============================================================================
// TESTS
// =============================================================================
