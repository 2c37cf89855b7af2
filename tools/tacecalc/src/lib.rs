//! Front end of the TACE survival calculator.
//!
//! Turns a JSON document of factor selections into a [`PatientInput`], applies
//! the required-field gate, runs the [`ScoringEngine`] and renders the
//! result as a text table or JSON.

use std::fmt;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value as JsonValue;
use tace_engine::{Projection, RiskExplanation, ScoringEngine};
use tace_factors::{CoefficientError, Coefficients, Factor, InputError, PatientInput};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Failures while gathering patient input.
#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("failed to read '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read from stdin: {0}")]
    Stdin(#[source] io::Error),

    #[error("invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),

    #[error("patient input must be a JSON object of factor selections")]
    NotAnObject,

    #[error("invalid --set option '{0}', expected key=value")]
    BadAssignment(String),
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Intake(#[from] IntakeError),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Coefficients(#[from] CoefficientError),

    #[error("failed to serialize JSON: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl CliError {
    /// 1 for incomplete patient input, 2 for everything else.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Input(_) => 1,
            _ => 2,
        }
    }
}

/// Read the input document from `path`, or stdin when `None`.
pub fn read_input(path: Option<&Path>) -> Result<String, IntakeError> {
    if let Some(path) = path {
        fs::read_to_string(path).map_err(|source| IntakeError::Read {
            path: path.to_path_buf(),
            source,
        })
    } else {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(IntakeError::Stdin)?;
        Ok(buf)
    }
}

/// Flatten a JSON object into `(key, value)` pairs.
///
/// String and number values are kept (`"tumorNumber": 2` reads as `"2"`),
/// anything else is dropped. A blank document is an empty selection.
pub fn parse_document(text: &str) -> Result<Vec<(String, String)>, IntakeError> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    let JsonValue::Object(map) = serde_json::from_str::<JsonValue>(text)? else {
        return Err(IntakeError::NotAnObject);
    };

    let mut pairs = Vec::with_capacity(map.len());
    for (key, value) in map {
        match value {
            JsonValue::String(s) => pairs.push((key, s)),
            JsonValue::Number(n) => pairs.push((key, n.to_string())),
            other => log::debug!("ignoring {key}: unsupported value {other}"),
        }
    }
    Ok(pairs)
}

/// Split a `key=value` option.
pub fn parse_assignment(s: &str) -> Result<(String, String), IntakeError> {
    match s.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(IntakeError::BadAssignment(s.to_string())),
    }
}

pub fn load_engine(coefficients: Option<&Path>) -> Result<ScoringEngine, CoefficientError> {
    match coefficients {
        Some(path) => Ok(ScoringEngine::new(Coefficients::load(path)?)),
        None => Ok(ScoringEngine::default()),
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ReportOptions {
    pub format: OutputFormat,
    /// Score incomplete input instead of rejecting it.
    pub lenient: bool,
    pub explain: bool,
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    projection: &'a Projection,
    #[serde(skip_serializing_if = "Option::is_none")]
    explanation: Option<&'a RiskExplanation>,
}

/// Gate, score and render one patient.
pub fn project_report(
    engine: &ScoringEngine,
    input: &PatientInput,
    options: &ReportOptions,
) -> Result<String, CliError> {
    if options.lenient {
        let missing = input.missing();
        if !missing.is_empty() {
            log::warn!("scoring with {} factor(s) missing", missing.len());
        }
    } else {
        input.validate()?;
    }

    let projection = engine.project(input);
    let explanation = options.explain.then(|| engine.explain(input));

    match options.format {
        OutputFormat::Text => Ok(TextReport {
            projection: &projection,
            explanation: explanation.as_ref(),
        }
        .to_string()),
        OutputFormat::Json => serde_json::to_string_pretty(&JsonReport {
            projection: &projection,
            explanation: explanation.as_ref(),
        })
        .map_err(CliError::Serialize),
    }
}

/// List factors and weights of a coefficient set.
pub fn factors_report(
    coefficients: &Coefficients,
    format: OutputFormat,
) -> Result<String, CliError> {
    match format {
        OutputFormat::Text => Ok(FactorListing(coefficients).to_string()),
        OutputFormat::Json => {
            serde_json::to_string_pretty(coefficients).map_err(CliError::Serialize)
        }
    }
}

/// Plain-text rendering of a projection.
pub struct TextReport<'a> {
    pub projection: &'a Projection,
    pub explanation: Option<&'a RiskExplanation>,
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.projection;
        writeln!(f, "TACE survival projection")?;
        writeln!(f, "  risk score        {:.2}", p.risk_score)?;
        writeln!(f, "  treatment effect  {:.3}", p.treatment_effect)?;
        writeln!(f)?;
        writeln!(
            f,
            "  {:<20}{:>12}{:>15}{:>14}",
            "", "with TACE", "without TACE", "net benefit"
        )?;
        writeln!(
            f,
            "  {:<20}{:>12}{:>15}{:>14}",
            "survival (months)",
            p.with_treatment.survival_time.to_string(),
            p.without_treatment.survival_time.to_string(),
            p.net_benefit.survival_time.to_string(),
        )?;
        writeln!(
            f,
            "  {:<20}{:>12}{:>15}{:>14}",
            "3-year survival",
            format!("{}%", p.with_treatment.survival_3_year),
            format!("{}%", p.without_treatment.survival_3_year),
            format!("{}%", p.net_benefit.survival_3_year),
        )?;
        writeln!(
            f,
            "  {:<20}{:>12}{:>15}{:>14}",
            "5-year survival",
            format!("{}%", p.with_treatment.survival_5_year),
            format!("{}%", p.without_treatment.survival_5_year),
            format!("{}%", p.net_benefit.survival_5_year),
        )?;

        if let Some(explanation) = self.explanation {
            writeln!(f)?;
            writeln!(f, "factor contributions")?;
            for c in &explanation.contributions {
                writeln!(
                    f,
                    "  {:<24}{:<8}risk {:<6}tace {}",
                    c.factor.label(),
                    c.value,
                    c.risk_weight,
                    c.tace_weight
                )?;
            }
            if !explanation.skipped.is_empty() {
                let keys: Vec<&str> = explanation.skipped.iter().map(|f| f.key()).collect();
                writeln!(f, "  skipped: {}", keys.join(", "))?;
            }
        }
        Ok(())
    }
}

struct FactorListing<'a>(&'a Coefficients);

impl fmt::Display for FactorListing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<24}{:<8}{:>6}{:>7}", "factor", "value", "risk", "tace")?;
        for factor in Factor::ALL {
            for s in factor.selections() {
                writeln!(
                    f,
                    "{:<24}{:<8}{:>6}{:>7}",
                    factor.key(),
                    s.value_str(),
                    self.0.risk.weight(s),
                    self.0.tace_effectiveness.weight(s)
                )?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn document_keeps_strings_and_numbers() {
        let pairs =
            parse_document(r#"{"tumorNumber": 2, "childPugh": "A", "note": null}"#).unwrap();
        assert_eq!(
            pairs,
            vec![
                ("childPugh".to_string(), "A".to_string()),
                ("tumorNumber".to_string(), "2".to_string()),
            ]
        );
    }

    #[test]
    fn blank_document_is_empty() {
        assert!(parse_document("  \n").unwrap().is_empty());
    }

    #[test]
    fn non_object_document_is_rejected() {
        assert!(matches!(
            parse_document("[1, 2]"),
            Err(IntakeError::NotAnObject)
        ));
        assert!(matches!(parse_document("{"), Err(IntakeError::Json(_))));
    }

    #[test]
    fn assignments_split_on_first_equals() {
        assert_eq!(
            parse_assignment("tumorSize = large").unwrap(),
            ("tumorSize".to_string(), "large".to_string())
        );
        assert!(parse_assignment("tumorSize").is_err());
        assert!(parse_assignment("=large").is_err());
    }

    #[test]
    fn incomplete_input_is_gated() {
        let input = PatientInput::from_pairs([("childPugh", "A")]);
        let err = project_report(&ScoringEngine::default(), &input, &ReportOptions::default())
            .unwrap_err();
        assert_eq!(err.exit_code(), 1);

        let lenient = ReportOptions {
            lenient: true,
            ..ReportOptions::default()
        };
        assert!(project_report(&ScoringEngine::default(), &input, &lenient).is_ok());
    }

    #[test]
    fn factor_listing_has_every_value() {
        let text = factors_report(&Coefficients::default(), OutputFormat::Text).unwrap();
        // header + 18 values
        assert_eq!(text.lines().count(), 19);
        assert!(text.contains("3plus"));
    }
}
