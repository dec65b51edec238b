//! Estimator-shaped model: standard scaler + logistic regression.
//!
//! Mirrors the call convention of a fitted estimator pipeline: a
//! `predict_proba` method over a batch of rows, returning one
//! `[negative, positive]` probability pair per row.

use serde::{Deserialize, Serialize};

use crate::error::InferenceError;

/// A serialized scaler + logistic-regression pipeline.
///
/// Each feature is standardized as `(x - mean) / scale` before the linear
/// model is applied. All four arrays/values come from the training run and
/// must agree on length with the fixed feature contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbabilisticEstimator {
    /// Per-feature standardization mean.
    pub scaler_mean: Vec<f64>,
    /// Per-feature standardization scale (standard deviation).
    pub scaler_scale: Vec<f64>,
    /// Logistic-regression coefficients, one per feature.
    pub coefficients: Vec<f64>,
    /// Logistic-regression intercept.
    pub intercept: f64,
}

impl ProbabilisticEstimator {
    /// Class-probability matrix for a batch of rows.
    ///
    /// Each output row is `[P(negative), P(positive)]` and sums to 1.
    pub fn predict_proba(&self, rows: &[&[f64]]) -> Result<Vec<[f64; 2]>, InferenceError> {
        rows.iter()
            .map(|row| {
                let positive = self.positive_probability(row)?;
                Ok([1.0 - positive, positive])
            })
            .collect()
    }

    /// Positive-class probability for a single row.
    fn positive_probability(&self, row: &[f64]) -> Result<f64, InferenceError> {
        if row.len() != self.coefficients.len() {
            return Err(InferenceError::Evaluation(format!(
                "input row has {} features, estimator expects {}",
                row.len(),
                self.coefficients.len()
            )));
        }

        let mut logit = self.intercept;
        for ((value, coefficient), (mean, scale)) in row
            .iter()
            .zip(&self.coefficients)
            .zip(self.scaler_mean.iter().zip(&self.scaler_scale))
        {
            logit += coefficient * (value - mean) / scale;
        }

        let probability = sigmoid(logit);
        if probability.is_finite() {
            Ok(probability)
        } else {
            Err(InferenceError::Evaluation(String::from(
                "estimator produced a non-finite probability",
            )))
        }
    }

    /// Consistency check against the expected feature count.
    pub(crate) fn validate(&self, expected_features: usize) -> Result<(), String> {
        if self.coefficients.len() != expected_features {
            return Err(format!(
                "estimator has {} coefficients, pipeline provides {} features",
                self.coefficients.len(),
                expected_features
            ));
        }
        if self.scaler_mean.len() != expected_features
            || self.scaler_scale.len() != expected_features
        {
            return Err(format!(
                "scaler arrays have lengths {}/{}, expected {}",
                self.scaler_mean.len(),
                self.scaler_scale.len(),
                expected_features
            ));
        }
        if self.scaler_scale.iter().any(|scale| *scale <= 0.0) {
            return Err(String::from("scaler scale entries must be positive"));
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
