//! # Model Module
//!
//! Model handle, shape dispatch, and artifact loading.
//!
//! Two trained-model shapes are recognized, polymorphic over a single
//! capability (produce a positive-class probability from one feature row):
//!
//! - [`ProbabilisticEstimator`]: a scaler + logistic-regression pipeline
//!   exposing a class-probability method. The positive-class column is
//!   selected from the returned matrix.
//! - [`RawBooster`]: a gradient-boosted tree ensemble exposing a low-level
//!   predict method over a plain numeric matrix. Trained with a binary
//!   logistic objective, so its output is already a probability.
//!
//! Callers never branch on shape; [`ModelHandle::estimate_probability`]
//! hides the dispatch. The handle is loaded once at process start and is
//! immutable afterwards, so concurrent readers need no synchronization.

mod booster;
mod estimator;

pub use booster::{RawBooster, TreeNode};
pub use estimator::ProbabilisticEstimator;

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{InferenceError, ModelLoadError};
use crate::features::{FeatureVector, FEATURE_COUNT};

// =============================================================================
// MODEL HANDLE
// =============================================================================

/// A loaded model artifact, tagged by shape.
///
/// The serialized form carries a `"shape"` discriminator so the loader
/// recognizes which call convention the artifact expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum ModelHandle {
    /// Estimator shape, queried via the class-probability matrix.
    Estimator(ProbabilisticEstimator),
    /// Booster shape, queried via the raw single-row-matrix path.
    Booster(RawBooster),
}

impl ModelHandle {
    /// Estimate the positive-class probability for one feature row.
    ///
    /// Dispatches on shape: the estimator path builds a single-row batch
    /// and selects row 0 column 1 of the probability matrix; the booster
    /// path takes element 0 of the raw prediction vector directly.
    pub fn estimate_probability(&self, features: &FeatureVector) -> Result<f64, InferenceError> {
        let batch = [features.as_slice()];
        match self {
            Self::Estimator(estimator) => {
                let matrix = estimator.predict_proba(&batch)?;
                let row = matrix.first().ok_or_else(|| {
                    InferenceError::Evaluation(String::from("empty probability matrix"))
                })?;
                Ok(row[1])
            }
            Self::Booster(booster) => {
                let predictions = booster.predict(&batch)?;
                predictions.first().copied().ok_or_else(|| {
                    InferenceError::Evaluation(String::from("empty prediction vector"))
                })
            }
        }
    }

    /// Shape name for logging.
    #[must_use]
    pub fn shape_name(&self) -> &'static str {
        match self {
            Self::Estimator(_) => "estimator",
            Self::Booster(_) => "booster",
        }
    }

    /// Consistency check against the fixed 13-feature contract.
    fn validate(&self) -> Result<(), String> {
        match self {
            Self::Estimator(estimator) => estimator.validate(FEATURE_COUNT),
            Self::Booster(booster) => booster.validate(FEATURE_COUNT),
        }
    }
}

// =============================================================================
// MODEL STATE
// =============================================================================

/// Process-wide model state, fixed at startup.
///
/// Under the fail-fast load policy only `Ready` ever exists; under the
/// deferred policy a failed load leaves `Unavailable` and every subsequent
/// prediction short-circuits with a configuration-class error.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelState {
    /// A model is loaded and serving.
    Ready(ModelHandle),
    /// No model could be loaded; requests fail until the process restarts.
    Unavailable {
        /// The original load failure, echoed to callers.
        reason: String,
    },
}

impl ModelState {
    /// Estimate a probability, or fail immediately if no model is loaded.
    pub fn estimate_probability(&self, features: &FeatureVector) -> Result<f64, InferenceError> {
        match self {
            Self::Ready(handle) => handle.estimate_probability(features),
            Self::Unavailable { reason } => Err(InferenceError::ModelUnavailable {
                reason: reason.clone(),
            }),
        }
    }

    /// Whether a model is loaded.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

// =============================================================================
// LOADING
// =============================================================================

/// Load and validate a model artifact from disk.
///
/// Read once at process start; the returned handle is immutable for the
/// process lifetime. Shape inconsistencies (wrong coefficient count, split
/// on a feature index past the contract) are load errors, not per-request
/// inference errors.
pub fn load(path: &Path) -> Result<ModelHandle, ModelLoadError> {
    let raw = fs::read_to_string(path).map_err(|source| ModelLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let handle: ModelHandle =
        serde_json::from_str(&raw).map_err(|source| ModelLoadError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    handle.validate().map_err(|reason| ModelLoadError::Invalid {
        path: path.to_path_buf(),
        reason,
    })?;

    Ok(handle)
}

// =============================================================================
// TESTS
// =============================================================================
