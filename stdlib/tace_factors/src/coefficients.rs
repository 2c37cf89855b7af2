//! Factor weight tables.
//!
//! Two tables drive the calculator: [`RISK_FACTORS`] adds to the risk score,
//! [`TACE_EFFECTIVENESS`] is averaged into the treatment effect. Together they
//! form a [`Coefficients`] set, which can also be loaded from JSON.

use std::fs::read_to_string;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CoefficientError;
use crate::factor::{
    AfpLevelWeights, ChildPughWeights, Factor, PresenceWeights, ResectionMarginWeights, Selection,
    TumorNumberWeights, TumorSizeWeights,
};

/// Weight of every value of every factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FactorTable {
    pub portal_hypertension: PresenceWeights,
    pub macrovascular_invasion: PresenceWeights,
    pub afp_level: AfpLevelWeights,
    pub microvascular_invasion: PresenceWeights,
    pub child_pugh: ChildPughWeights,
    pub resection_margin: ResectionMarginWeights,
    pub tumor_number: TumorNumberWeights,
    pub tumor_size: TumorSizeWeights,
}

impl FactorTable {
    pub fn weight(&self, selection: Selection) -> f64 {
        match selection {
            Selection::PortalHypertension(v) => self.portal_hypertension.get(v),
            Selection::MacrovascularInvasion(v) => self.macrovascular_invasion.get(v),
            Selection::AfpLevel(v) => self.afp_level.get(v),
            Selection::MicrovascularInvasion(v) => self.microvascular_invasion.get(v),
            Selection::ChildPugh(v) => self.child_pugh.get(v),
            Selection::ResectionMargin(v) => self.resection_margin.get(v),
            Selection::TumorNumber(v) => self.tumor_number.get(v),
            Selection::TumorSize(v) => self.tumor_size.get(v),
        }
    }

    /// All `(selection, weight)` entries in form order.
    pub fn entries(&self) -> Vec<(Selection, f64)> {
        Factor::ALL
            .iter()
            .flat_map(|f| f.selections())
            .map(|s| (s, self.weight(s)))
            .collect()
    }

    /// Sum of the largest weight of each factor.
    pub fn max_total(&self) -> f64 {
        Factor::ALL
            .iter()
            .map(|f| {
                f.selections()
                    .into_iter()
                    .map(|s| self.weight(s))
                    .fold(0.0, f64::max)
            })
            .sum()
    }

    fn check(&self, table: &'static str) -> Result<(), CoefficientError> {
        for (selection, weight) in self.entries() {
            if !weight.is_finite() || weight < 0.0 {
                return Err(CoefficientError::InvalidWeight {
                    table,
                    factor: selection.factor(),
                    value: selection.value_str(),
                    weight,
                });
            }
        }
        Ok(())
    }
}

/// Risk contribution per factor value. Favourable findings weigh zero.
pub const RISK_FACTORS: FactorTable = FactorTable {
    portal_hypertension: PresenceWeights { yes: 0.3, no: 0.0 },
    macrovascular_invasion: PresenceWeights { yes: 0.8, no: 0.0 },
    afp_level: AfpLevelWeights { high: 0.4, low: 0.0 },
    microvascular_invasion: PresenceWeights { yes: 0.5, no: 0.0 },
    child_pugh: ChildPughWeights { a: 0.0, b: 0.6 },
    resection_margin: ResectionMarginWeights {
        narrow: 0.3,
        wide: 0.0,
    },
    tumor_number: TumorNumberWeights {
        one: 0.0,
        two: 0.2,
        three_plus: 0.5,
    },
    tumor_size: TumorSizeWeights {
        small: 0.0,
        medium: 0.3,
        large: 0.7,
    },
};

/// TACE effectiveness per factor value.
pub const TACE_EFFECTIVENESS: FactorTable = FactorTable {
    portal_hypertension: PresenceWeights {
        yes: 0.15,
        no: 0.25,
    },
    macrovascular_invasion: PresenceWeights { yes: 0.1, no: 0.3 },
    afp_level: AfpLevelWeights {
        high: 0.15,
        low: 0.25,
    },
    microvascular_invasion: PresenceWeights {
        yes: 0.15,
        no: 0.25,
    },
    child_pugh: ChildPughWeights { a: 0.25, b: 0.1 },
    resection_margin: ResectionMarginWeights {
        narrow: 0.2,
        wide: 0.3,
    },
    tumor_number: TumorNumberWeights {
        one: 0.3,
        two: 0.2,
        three_plus: 0.1,
    },
    tumor_size: TumorSizeWeights {
        small: 0.3,
        medium: 0.2,
        large: 0.1,
    },
};

/// The pair of tables a scoring engine runs with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coefficients {
    pub risk: FactorTable,
    pub tace_effectiveness: FactorTable,
}

impl Default for Coefficients {
    fn default() -> Self {
        Self {
            risk: RISK_FACTORS,
            tace_effectiveness: TACE_EFFECTIVENESS,
        }
    }
}

impl Coefficients {
    pub fn from_json_str(s: &str) -> Result<Coefficients, CoefficientError> {
        let coefficients = serde_json::from_str::<Coefficients>(s)?;
        coefficients.validate()?;
        Ok(coefficients)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Coefficients, CoefficientError> {
        let path = path.as_ref();
        let s = read_to_string(path).map_err(|source| CoefficientError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let coefficients = Self::from_json_str(&s)?;
        log::debug!("loaded coefficient set from '{}'", path.display());
        Ok(coefficients)
    }

    /// Every weight must be finite and non-negative.
    pub fn validate(&self) -> Result<(), CoefficientError> {
        self.risk.check("risk")?;
        self.tace_effectiveness.check("tace effectiveness")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factor::{ChildPugh, TumorNumber};

    #[test]
    fn default_risk_table_bound() {
        // 0.3 + 0.8 + 0.4 + 0.5 + 0.6 + 0.3 + 0.5 + 0.7
        assert!((RISK_FACTORS.max_total() - 4.1).abs() < 1e-12);
    }

    #[test]
    fn lookups_follow_table() {
        assert_eq!(RISK_FACTORS.weight(Selection::ChildPugh(ChildPugh::B)), 0.6);
        assert_eq!(
            TACE_EFFECTIVENESS.weight(Selection::TumorNumber(TumorNumber::ThreePlus)),
            0.1
        );
        assert_eq!(RISK_FACTORS.entries().len(), 18);
    }

    #[test]
    fn default_tables_validate() {
        assert!(Coefficients::default().validate().is_ok());
    }

    #[test]
    fn json_shape_uses_wire_spellings() {
        let json = serde_json::to_value(Coefficients::default()).unwrap();
        assert_eq!(json["risk"]["tumorNumber"]["3plus"], 0.5);
        assert_eq!(json["taceEffectiveness"]["childPugh"]["A"], 0.25);

        let back = Coefficients::from_json_str(&json.to_string()).unwrap();
        assert_eq!(back, Coefficients::default());
    }

    #[test]
    fn negative_weight_is_rejected() {
        let mut json = serde_json::to_value(Coefficients::default()).unwrap();
        json["taceEffectiveness"]["afpLevel"]["high"] = serde_json::json!(-0.1);
        let err = Coefficients::from_json_str(&json.to_string()).unwrap_err();
        match err {
            CoefficientError::InvalidWeight {
                table,
                factor,
                value,
                ..
            } => {
                assert_eq!(table, "tace effectiveness");
                assert_eq!(factor, Factor::AfpLevel);
                assert_eq!(value, "high");
            }
            other => panic!("expected InvalidWeight, got {other:?}"),
        }
    }

    #[test]
    fn load_reads_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("coefficients.json");
        let mut custom = Coefficients::default();
        custom.risk.tumor_size.large = 1.0;
        std::fs::write(&path, serde_json::to_string(&custom).unwrap()).unwrap();

        let loaded = Coefficients::load(&path).unwrap();
        assert_eq!(loaded.risk.tumor_size.large, 1.0);

        let missing = Coefficients::load(tmp.path().join("absent.json")).unwrap_err();
        assert!(matches!(missing, CoefficientError::Io { .. }));
    }
}
