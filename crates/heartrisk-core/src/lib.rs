//! # Heartrisk Core
//!
//! Deterministic inference pipeline for the Smart Health Predictor API.
//!
//! Four sequential stages, strictly linear per request:
//!
//! 1. **Schema Validator** ([`record`]) — type-checks an inbound payload
//!    against the fixed 13-field clinical schema.
//! 2. **Feature Assembler** ([`features`]) — reorders validated fields into
//!    the canonical order the model was trained on.
//! 3. **Model Invoker** ([`model`]) — dispatches to the loaded model shape
//!    and extracts a single positive-class probability.
//! 4. **Score Mapper** ([`score`]) — maps the probability to a percentage
//!    health score and a three-tier risk category.
//!
//! This crate is pure and synchronous: no async, no network, no shared
//! mutable state. The one long-lived value, the model handle, is loaded
//! once at process start and immutable afterwards.

pub mod error;
pub mod features;
pub mod model;
pub mod pipeline;
pub mod record;
pub mod score;

pub use error::{
    FieldError, FieldKind, FieldProblem, InferenceError, ModelLoadError, PredictError,
    ValidationError,
};
pub use features::{FeatureVector, FEATURE_COUNT, FEATURE_ORDER};
pub use model::{ModelHandle, ModelState, ProbabilisticEstimator, RawBooster, TreeNode};
pub use pipeline::predict;
pub use record::{PatientRecord, SCHEMA};
pub use score::{Prediction, RiskCategory};
