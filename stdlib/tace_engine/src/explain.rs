use serde::Serialize;
use tace_factors::{Coefficients, Factor, PatientInput};

/// What one selected factor contributes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FactorContribution {
    pub factor: Factor,
    pub value: &'static str,
    pub risk_weight: f64,
    pub tace_weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskExplanation {
    pub risk_score: f64,
    pub contributions: Vec<FactorContribution>,
    /// Factors without a selection; they contribute nothing.
    pub skipped: Vec<Factor>,
}

pub(crate) fn explain_with(coefficients: &Coefficients, input: &PatientInput) -> RiskExplanation {
    let mut contributions = Vec::new();
    let mut sum = 0.0;

    for selection in input.selections() {
        let risk_weight = coefficients.risk.weight(selection);
        contributions.push(FactorContribution {
            factor: selection.factor(),
            value: selection.value_str(),
            risk_weight,
            tace_weight: coefficients.tace_effectiveness.weight(selection),
        });
        sum += risk_weight;
    }

    RiskExplanation {
        risk_score: sum,
        contributions,
        skipped: input.missing(),
    }
}

/// Per-factor breakdown of the risk score under the built-in tables.
pub fn explain_risk(input: &PatientInput) -> RiskExplanation {
    explain_with(&Coefficients::default(), input)
}
