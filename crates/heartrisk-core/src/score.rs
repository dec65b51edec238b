//! # Score Module
//!
//! Probability to health-score and risk-category mapping.
//!
//! Two fixed breakpoints partition [0,1] into three tiers. Boundaries are
//! half-open on the lower bound: exactly 0.20 is already "Mild Risk" and
//! exactly 0.50 is already "At Risk".

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lower breakpoint: below this the caller is considered healthy.
pub const MILD_RISK_THRESHOLD: f64 = 0.20;

/// Upper breakpoint: at or above this the caller is considered at risk.
pub const AT_RISK_THRESHOLD: f64 = 0.50;

// =============================================================================
// RISK CATEGORY
// =============================================================================

/// Three-tier categorical risk label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskCategory {
    /// Positive-class probability below 0.20.
    Healthy,
    /// Probability in [0.20, 0.50).
    MildRisk,
    /// Probability at or above 0.50.
    AtRisk,
}

impl RiskCategory {
    /// Map a probability to its tier.
    #[must_use]
    pub fn from_probability(probability: f64) -> Self {
        if probability < MILD_RISK_THRESHOLD {
            Self::Healthy
        } else if probability < AT_RISK_THRESHOLD {
            Self::MildRisk
        } else {
            Self::AtRisk
        }
    }

    /// Wire-format label for this tier.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Healthy => "Healthy",
            Self::MildRisk => "Mild Risk",
            Self::AtRisk => "At Risk",
        }
    }
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// PREDICTION
// =============================================================================

/// The per-request prediction result. Ephemeral, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Positive-class probability rescaled to 0-100, rounded to 2 decimals.
    pub health_score: f64,
    /// Three-tier label derived from the raw probability.
    pub risk_category: RiskCategory,
}

impl Prediction {
    /// Derive the full prediction from a positive-class probability.
    ///
    /// The category is decided on the raw probability, before rounding,
    /// so the tier boundaries stay exact.
    #[must_use]
    pub fn from_probability(probability: f64) -> Self {
        Self {
            health_score: round2(probability * 100.0),
            risk_category: RiskCategory::from_probability(probability),
        }
    }

    /// Display form of the score: up to two decimals, trailing zeros
    /// trimmed, at least one decimal kept (82 -> "82.0", 73.42 -> "73.42").
    #[must_use]
    pub fn health_score_display(&self) -> String {
        let mut text = format!("{:.2}", self.health_score);
        while text.ends_with('0') {
            text.pop();
        }
        if text.ends_with('.') {
            text.push('0');
        }
        text
    }
}

/// Round to two decimal places.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// =============================================================================
// TESTS
// =============================================================================
