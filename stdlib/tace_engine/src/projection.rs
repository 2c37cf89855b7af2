use std::fmt;

use serde::{Deserialize, Serialize, Serializer};
use tace_factors::{Coefficients, PatientInput};

use crate::risk::{risk_score_with, treatment_effect_with};
use crate::survival::{compute_survival_rate, compute_survival_time, round1};

/// Survival projection for one treatment arm.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurvivalOutcome {
    /// Months, one decimal.
    pub survival_time: f64,
    /// Percent alive at three years.
    pub survival_3_year: f64,
    /// Percent alive at five years.
    pub survival_5_year: f64,
}

impl SurvivalOutcome {
    pub fn from_time(survival_time: f64) -> Self {
        Self {
            survival_time,
            survival_3_year: compute_survival_rate(survival_time, 3.0),
            survival_5_year: compute_survival_rate(survival_time, 5.0),
        }
    }
}

/// A difference rendered with an explicit `+` when non-negative.
///
/// Serializes as its rendered string, e.g. `"+13.2"` or `"-0.4"`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct SignedDelta(f64);

impl SignedDelta {
    /// Round the difference to one decimal.
    pub fn new(delta: f64) -> Self {
        // adding 0.0 turns a negative zero into +0
        Self(round1(delta) + 0.0)
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for SignedDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 >= 0.0 {
            write!(f, "+{}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl Serialize for SignedDelta {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Treated minus untreated, per metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NetBenefit {
    pub survival_time: SignedDelta,
    pub survival_3_year: SignedDelta,
    pub survival_5_year: SignedDelta,
}

impl NetBenefit {
    pub fn between(treated: &SurvivalOutcome, untreated: &SurvivalOutcome) -> Self {
        Self {
            survival_time: SignedDelta::new(treated.survival_time - untreated.survival_time),
            survival_3_year: SignedDelta::new(treated.survival_3_year - untreated.survival_3_year),
            survival_5_year: SignedDelta::new(treated.survival_5_year - untreated.survival_5_year),
        }
    }
}

/// Result of scoring one patient.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Projection {
    pub risk_score: f64,
    pub treatment_effect: f64,
    pub with_treatment: SurvivalOutcome,
    pub without_treatment: SurvivalOutcome,
    pub net_benefit: NetBenefit,
}

pub(crate) fn project_with(coefficients: &Coefficients, input: &PatientInput) -> Projection {
    let risk_score = risk_score_with(&coefficients.risk, input);
    let treatment_effect = treatment_effect_with(&coefficients.tace_effectiveness, input);
    log::debug!("risk score {risk_score:.3}, treatment effect {treatment_effect:.3}");

    let without_treatment =
        SurvivalOutcome::from_time(compute_survival_time(risk_score, false, treatment_effect));
    let with_treatment =
        SurvivalOutcome::from_time(compute_survival_time(risk_score, true, treatment_effect));
    let net_benefit = NetBenefit::between(&with_treatment, &without_treatment);

    Projection {
        risk_score,
        treatment_effect,
        with_treatment,
        without_treatment,
        net_benefit,
    }
}

/// Score `input` with the built-in coefficient tables.
pub fn project(input: &PatientInput) -> Projection {
    project_with(&Coefficients::default(), input)
}
