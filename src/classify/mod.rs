pub mod pipeline;

use std::fmt;

use ndarray::Array3;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Caller-supplied scoring capability. The pipeline treats the model as a
/// black box mapping a normalized input tensor to a scalar in [0, 1]; the
/// model's weights and framework never enter the core.
pub trait Scorer {
    fn score(&self, input: &Array3<f32>) -> Result<f64>;
}

impl<F> Scorer for F
where
    F: Fn(&Array3<f32>) -> f64,
{
    fn score(&self, input: &Array3<f32>) -> Result<f64> {
        Ok(self(input))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Label {
    Authentic,
    Forged,
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Authentic => write!(f, "Authentic"),
            Label::Forged => write!(f, "Forged"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl ConfidenceLevel {
    /// Bands over the verdict confidence range (50, 100].
    pub fn from_percent(percent: f64) -> Self {
        match percent {
            p if p < 60.0 => ConfidenceLevel::Low,
            p if p < 75.0 => ConfidenceLevel::Medium,
            p if p < 90.0 => ConfidenceLevel::High,
            _ => ConfidenceLevel::VeryHigh,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Verdict {
    pub label: Label,
    pub confidence: f64,
}

impl Verdict {
    pub fn confidence_level(&self) -> ConfidenceLevel {
        ConfidenceLevel::from_percent(self.confidence)
    }

    /// Two-decimal percent rendering used for display, e.g. "70.00%".
    pub fn confidence_text(&self) -> String {
        format!("{:.2}%", self.confidence)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label, self.confidence_text())
    }
}
