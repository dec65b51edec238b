//! # Pipeline Module
//!
//! The full per-request pipeline, strictly linear:
//!
//! Validator -> Assembler -> Invoker -> Mapper
//!
//! Every stage is a stateless pure transformation; the only input that
//! persists across requests is the immutable model state fixed at startup.
//! Failures thread through as typed results and are composed into the
//! uniform error envelope at the HTTP boundary, not here.

use serde_json::Value;

use crate::error::PredictError;
use crate::features::FeatureVector;
use crate::model::ModelState;
use crate::record::PatientRecord;
use crate::score::Prediction;

/// Run one payload through the pipeline.
pub fn predict(model: &ModelState, payload: &Value) -> Result<Prediction, PredictError> {
    let record = PatientRecord::from_value(payload)?;
    let features = FeatureVector::from_record(&record);
    let probability = model.estimate_probability(&features)?;
    Ok(Prediction::from_probability(probability))
}

// =============================================================================
// TESTS
// =============================================================================
