use std::path::PathBuf;

use crate::factor::Factor;

/// A categorical value spelling that the factor vocabulary does not know.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} value '{value}' (expected one of {expected})")]
pub struct ParseValueError {
    /// Name of the value type the spelling was parsed as.
    pub kind: &'static str,
    pub value: String,
    /// Accepted spellings joined with `|`.
    pub expected: String,
}

/// Patient input rejected by the required-field gate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("Please fill in all required fields (missing: {})", join_keys(.0))]
    MissingFields(Vec<Factor>),
}

fn join_keys(factors: &[Factor]) -> String {
    factors
        .iter()
        .map(|f| f.key())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Errors raised while loading or validating a coefficient set.
#[derive(Debug, thiserror::Error)]
pub enum CoefficientError {
    #[error("failed to read coefficient file '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid coefficient JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{table} weight for {factor}={value} must be finite and non-negative, got {weight}")]
    InvalidWeight {
        table: &'static str,
        factor: Factor,
        value: &'static str,
        weight: f64,
    },
}
