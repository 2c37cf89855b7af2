use tace_factors::{Coefficients, PatientInput};

use crate::explain::{explain_with, RiskExplanation};
use crate::projection::{project_with, Projection};
use crate::risk::{risk_score_with, treatment_effect_with};

/// A scoring engine bound to one coefficient set.
///
/// Holds no mutable state; one engine can serve any number of inputs, from
/// any number of threads.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScoringEngine {
    coefficients: Coefficients,
}

impl ScoringEngine {
    pub fn new(coefficients: Coefficients) -> Self {
        Self { coefficients }
    }

    pub fn coefficients(&self) -> &Coefficients {
        &self.coefficients
    }

    pub fn risk_score(&self, input: &PatientInput) -> f64 {
        risk_score_with(&self.coefficients.risk, input)
    }

    pub fn treatment_effect(&self, input: &PatientInput) -> f64 {
        treatment_effect_with(&self.coefficients.tace_effectiveness, input)
    }

    pub fn project(&self, input: &PatientInput) -> Projection {
        project_with(&self.coefficients, input)
    }

    pub fn explain(&self, input: &PatientInput) -> RiskExplanation {
        explain_with(&self.coefficients, input)
    }
}
