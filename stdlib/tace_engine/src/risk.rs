use tace_factors::{FactorTable, PatientInput, RISK_FACTORS, TACE_EFFECTIVENESS};

/// Treatment effect used when no factor of the input is recognized.
pub const TREATMENT_EFFECT_FALLBACK: f64 = 0.2;

/// Sum of the risk weights of every present selection.
pub fn risk_score_with(table: &FactorTable, input: &PatientInput) -> f64 {
    input.selections().map(|s| table.weight(s)).sum()
}

/// Mean effectiveness weight over the present selections, or
/// [`TREATMENT_EFFECT_FALLBACK`] when there are none.
pub fn treatment_effect_with(table: &FactorTable, input: &PatientInput) -> f64 {
    let (sum, count) = input
        .selections()
        .fold((0.0f64, 0usize), |(sum, count), s| {
            (sum + table.weight(s), count + 1)
        });

    if count == 0 {
        log::debug!("no factors matched, using fallback treatment effect");
        TREATMENT_EFFECT_FALLBACK
    } else {
        sum / (count as f64)
    }
}

pub fn compute_risk_score(input: &PatientInput) -> f64 {
    risk_score_with(&RISK_FACTORS, input)
}

pub fn compute_treatment_effect(input: &PatientInput) -> f64 {
    treatment_effect_with(&TACE_EFFECTIVENESS, input)
}
