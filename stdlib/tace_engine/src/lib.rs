//! Scoring engine of the TACE survival calculator.
//!
//! The pipeline is a chain of pure functions:
//!
//! ```text
//! input -> risk score -> treatment effect -> survival times -> survival rates -> net benefit
//! ```
//!
//! [`project`] runs the whole chain with the built-in tables;
//! [`ScoringEngine`] runs it with a custom [`Coefficients`] set.
//!
//! ```
//! use tace_engine::{project, PatientInput};
//!
//! let input = PatientInput::from_pairs([("childPugh", "B"), ("tumorSize", "large")]);
//! let p = project(&input);
//! assert!(p.with_treatment.survival_time >= p.without_treatment.survival_time);
//! ```

pub mod engine;
pub mod explain;
pub mod projection;
pub mod risk;
pub mod survival;

pub use engine::ScoringEngine;
pub use explain::{explain_risk, FactorContribution, RiskExplanation};
pub use projection::{project, NetBenefit, Projection, SignedDelta, SurvivalOutcome};
pub use risk::{compute_risk_score, compute_treatment_effect, TREATMENT_EFFECT_FALLBACK};
pub use survival::{compute_survival_rate, compute_survival_time, BASE_SURVIVAL_MONTHS};
pub use tace_factors::{Coefficients, PatientInput};
