//! Patient factor model for the TACE survival calculator.
//!
//! Provides the closed vocabulary of the eight prognostic factors, the
//! [`PatientInput`] record built from them, and the weight tables the scoring
//! engine reads.

pub mod coefficients;
pub mod error;
pub mod factor;
pub mod input;

pub use coefficients::{Coefficients, FactorTable, RISK_FACTORS, TACE_EFFECTIVENESS};
pub use error::{CoefficientError, InputError, ParseValueError};
pub use factor::{
    AfpLevel, ChildPugh, Factor, Presence, ResectionMargin, Selection, TumorNumber, TumorSize,
};
pub use input::PatientInput;
