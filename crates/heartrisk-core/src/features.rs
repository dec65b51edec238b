//! # Features Module
//!
//! Feature-vector assembly: fixed canonical column order.
//!
//! The order below must exactly match the order the model artifact was
//! trained on. Nothing in the artifact format enforces this; it is a
//! silent correctness dependency shared with the training pipeline.

use crate::record::PatientRecord;

/// Number of features the model consumes.
pub const FEATURE_COUNT: usize = 13;

/// Canonical feature order presented to the model.
///
/// Note this is NOT the schema declaration order: continuous and coded
/// fields are interleaved exactly as the training pipeline arranged them.
pub const FEATURE_ORDER: [&str; FEATURE_COUNT] = [
    "age", "sex", "trestbps", "chol", "thalach", "oldpeak", "cp", "fbs", "restecg", "exang",
    "slope", "ca", "thal",
];

/// An ordered single-row feature vector, ready for model input.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    /// Assemble the feature vector from a validated record.
    ///
    /// Pure and total: a valid `PatientRecord` always produces exactly
    /// [`FEATURE_COUNT`] values in canonical order. Integer-coded fields
    /// are widened to f64.
    #[must_use]
    pub fn from_record(record: &PatientRecord) -> Self {
        Self([
            record.age,
            record.sex as f64,
            record.trestbps,
            record.chol,
            record.thalach,
            record.oldpeak,
            record.cp as f64,
            record.fbs as f64,
            record.restecg as f64,
            record.exang as f64,
            record.slope as f64,
            record.ca as f64,
            record.thal as f64,
        ])
    }

    /// View the vector as a plain numeric row.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Number of features in the vector. Always [`FEATURE_COUNT`].
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Never true; present for slice-like API completeness.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// =============================================================================
// TESTS
// =============================================================================
