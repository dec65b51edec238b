//! # Error Module
//!
//! Typed failure taxonomy for the inference pipeline.
//!
//! Three classes, matching where a failure can originate:
//! - [`ValidationError`]: the inbound payload is malformed or incomplete.
//! - [`ModelLoadError`]: the serialized artifact could not be loaded at
//!   startup. Only this class may be fatal, and only under fail-fast policy.
//! - [`InferenceError`]: the model call itself failed, or no model is
//!   loaded at all. Never fatal; surfaced to the one affected caller.
//!
//! Every per-request failure is folded into [`PredictError`] and converted
//! to the uniform `{"error": "..."}` envelope at the HTTP boundary. Nothing
//! is allowed to escape a request as an unhandled fault.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

// =============================================================================
// FIELD-LEVEL VALIDATION
// =============================================================================

/// The semantic type a schema field requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Floating point, fractional part allowed.
    Float,
    /// Integer-coded categorical/flag value.
    Integer,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Float => write!(f, "float"),
            Self::Integer => write!(f, "integer"),
        }
    }
}

/// What went wrong with a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldProblem {
    /// The field is absent from the payload.
    Missing,
    /// The field is present but carries an incompatible value.
    /// The string describes what was found (e.g. "string", "fractional number").
    WrongType(String),
}

/// A single offending field: its name, the expected type, and the problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Schema field name.
    pub field: &'static str,
    /// The type the schema requires.
    pub expected: FieldKind,
    /// What was actually observed.
    pub problem: FieldProblem,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.problem {
            FieldProblem::Missing => {
                write!(f, "{} is missing (expected {})", self.field, self.expected)
            }
            FieldProblem::WrongType(found) => {
                write!(f, "{} expected {}, found {}", self.field, self.expected, found)
            }
        }
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// The inbound payload failed schema validation.
///
/// Carries every offending field, not just the first, so a caller can fix
/// the whole request in one round trip.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The request body was not a JSON object at all.
    #[error("request body must be a JSON object")]
    NotAnObject,
    /// The request body could not be parsed as JSON.
    #[error("request body is not valid JSON: {0}")]
    MalformedJson(String),
    /// One or more fields are missing or mistyped.
    #[error("invalid patient record: {}", format_field_errors(.0))]
    Fields(Vec<FieldError>),
}

fn format_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// The serialized model artifact could not be loaded at startup.
#[derive(Debug, Error)]
pub enum ModelLoadError {
    /// The artifact file could not be read.
    #[error("failed to read model artifact {path}: {source}")]
    Io {
        /// Artifact path as configured.
        path: PathBuf,
        /// Underlying filesystem error.
        source: std::io::Error,
    },
    /// The artifact file is not a recognized serialized model.
    #[error("failed to parse model artifact {path}: {source}")]
    Parse {
        /// Artifact path as configured.
        path: PathBuf,
        /// Underlying deserialization error.
        source: serde_json::Error,
    },
    /// The artifact disagrees with the fixed 13-feature contract.
    #[error("model artifact {path} is inconsistent: {reason}")]
    Invalid {
        /// Artifact path as configured.
        path: PathBuf,
        /// Human-readable description of the inconsistency.
        reason: String,
    },
}

/// The model call failed, or no model is loaded for this process.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InferenceError {
    /// No model handle is available (deferred load policy after a failed
    /// startup load). Configuration-class, distinct from evaluation failure.
    #[error("model unavailable: {reason}")]
    ModelUnavailable {
        /// Why the handle is absent (the original load failure).
        reason: String,
    },
    /// The model evaluation itself failed (bad input shape, numeric fault).
    #[error("model evaluation failed: {0}")]
    Evaluation(String),
}

/// Union of all per-request failures, composed at the service boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PredictError {
    /// The payload failed schema validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The model invocation failed.
    #[error(transparent)]
    Inference(#[from] InferenceError),
}

// =============================================================================
// TESTS
// =============================================================================
