//! Closed categorical vocabulary for the eight prognostic factors.
//!
//! Each factor accepts a small fixed set of values. The wire spelling of every
//! value (`"yes"`, `"B"`, `"3plus"`, ...) is the one used by patient input
//! documents and coefficient files.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseValueError;

/// Declares a categorical value enum together with its per-value weight record.
///
/// The weight record has one `f64` field per variant and serializes with the
/// variant's wire spelling as key, so a table reads `{"yes": 0.3, "no": 0}`.
macro_rules! categorical {
    (
        $(#[$meta:meta])*
        $name:ident / $weights:ident {
            $($variant:ident => $wire:literal as $field:ident),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ParseValueError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok($name::$variant),)+
                    _ => Err(ParseValueError {
                        kind: stringify!($name),
                        value: s.to_string(),
                        expected: $name::ALL
                            .iter()
                            .map(|v| v.as_str())
                            .collect::<Vec<_>>()
                            .join("|"),
                    }),
                }
            }
        }

        /// Weight assigned to each value of the factor.
        #[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
        pub struct $weights {
            $(
                #[serde(rename = $wire)]
                pub $field: f64,
            )+
        }

        impl $weights {
            pub fn get(&self, value: $name) -> f64 {
                match value {
                    $($name::$variant => self.$field,)+
                }
            }
        }
    };
}

categorical! {
    /// Yes/no finding (portal hypertension, macro- and microvascular invasion).
    Presence / PresenceWeights {
        Yes => "yes" as yes,
        No => "no" as no,
    }
}

categorical! {
    /// Serum alpha-fetoprotein level.
    AfpLevel / AfpLevelWeights {
        High => "high" as high,
        Low => "low" as low,
    }
}

categorical! {
    /// Child-Pugh liver function class.
    ChildPugh / ChildPughWeights {
        A => "A" as a,
        B => "B" as b,
    }
}

categorical! {
    /// Width of the surgical resection margin.
    ResectionMargin / ResectionMarginWeights {
        Narrow => "narrow" as narrow,
        Wide => "wide" as wide,
    }
}

categorical! {
    /// Number of tumor nodules.
    TumorNumber / TumorNumberWeights {
        One => "1" as one,
        Two => "2" as two,
        ThreePlus => "3plus" as three_plus,
    }
}

categorical! {
    TumorSize / TumorSizeWeights {
        Small => "small" as small,
        Medium => "medium" as medium,
        Large => "large" as large,
    }
}

/// The eight prognostic factors, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Factor {
    PortalHypertension,
    MacrovascularInvasion,
    AfpLevel,
    MicrovascularInvasion,
    ChildPugh,
    ResectionMargin,
    TumorNumber,
    TumorSize,
}

impl Factor {
    pub const ALL: [Factor; 8] = [
        Factor::PortalHypertension,
        Factor::MacrovascularInvasion,
        Factor::AfpLevel,
        Factor::MicrovascularInvasion,
        Factor::ChildPugh,
        Factor::ResectionMargin,
        Factor::TumorNumber,
        Factor::TumorSize,
    ];

    /// Key used in input documents and coefficient files.
    pub fn key(self) -> &'static str {
        match self {
            Factor::PortalHypertension => "portalHypertension",
            Factor::MacrovascularInvasion => "macrovascularInvasion",
            Factor::AfpLevel => "afpLevel",
            Factor::MicrovascularInvasion => "microvascularInvasion",
            Factor::ChildPugh => "childPugh",
            Factor::ResectionMargin => "resectionMargin",
            Factor::TumorNumber => "tumorNumber",
            Factor::TumorSize => "tumorSize",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Factor::PortalHypertension => "Portal hypertension",
            Factor::MacrovascularInvasion => "Macrovascular invasion",
            Factor::AfpLevel => "AFP level",
            Factor::MicrovascularInvasion => "Microvascular invasion",
            Factor::ChildPugh => "Child-Pugh class",
            Factor::ResectionMargin => "Resection margin",
            Factor::TumorNumber => "Tumor number",
            Factor::TumorSize => "Tumor size",
        }
    }

    pub fn from_key(key: &str) -> Option<Factor> {
        Factor::ALL.iter().copied().find(|f| f.key() == key)
    }

    /// Every selection this factor admits, in table order.
    pub fn selections(self) -> Vec<Selection> {
        match self {
            Factor::PortalHypertension => Presence::ALL
                .iter()
                .map(|&v| Selection::PortalHypertension(v))
                .collect(),
            Factor::MacrovascularInvasion => Presence::ALL
                .iter()
                .map(|&v| Selection::MacrovascularInvasion(v))
                .collect(),
            Factor::AfpLevel => AfpLevel::ALL
                .iter()
                .map(|&v| Selection::AfpLevel(v))
                .collect(),
            Factor::MicrovascularInvasion => Presence::ALL
                .iter()
                .map(|&v| Selection::MicrovascularInvasion(v))
                .collect(),
            Factor::ChildPugh => ChildPugh::ALL
                .iter()
                .map(|&v| Selection::ChildPugh(v))
                .collect(),
            Factor::ResectionMargin => ResectionMargin::ALL
                .iter()
                .map(|&v| Selection::ResectionMargin(v))
                .collect(),
            Factor::TumorNumber => TumorNumber::ALL
                .iter()
                .map(|&v| Selection::TumorNumber(v))
                .collect(),
            Factor::TumorSize => TumorSize::ALL
                .iter()
                .map(|&v| Selection::TumorSize(v))
                .collect(),
        }
    }
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// One factor paired with its selected value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Selection {
    PortalHypertension(Presence),
    MacrovascularInvasion(Presence),
    AfpLevel(AfpLevel),
    MicrovascularInvasion(Presence),
    ChildPugh(ChildPugh),
    ResectionMargin(ResectionMargin),
    TumorNumber(TumorNumber),
    TumorSize(TumorSize),
}

impl Selection {
    pub fn factor(self) -> Factor {
        match self {
            Selection::PortalHypertension(_) => Factor::PortalHypertension,
            Selection::MacrovascularInvasion(_) => Factor::MacrovascularInvasion,
            Selection::AfpLevel(_) => Factor::AfpLevel,
            Selection::MicrovascularInvasion(_) => Factor::MicrovascularInvasion,
            Selection::ChildPugh(_) => Factor::ChildPugh,
            Selection::ResectionMargin(_) => Factor::ResectionMargin,
            Selection::TumorNumber(_) => Factor::TumorNumber,
            Selection::TumorSize(_) => Factor::TumorSize,
        }
    }

    pub fn value_str(self) -> &'static str {
        match self {
            Selection::PortalHypertension(v)
            | Selection::MacrovascularInvasion(v)
            | Selection::MicrovascularInvasion(v) => v.as_str(),
            Selection::AfpLevel(v) => v.as_str(),
            Selection::ChildPugh(v) => v.as_str(),
            Selection::ResectionMargin(v) => v.as_str(),
            Selection::TumorNumber(v) => v.as_str(),
            Selection::TumorSize(v) => v.as_str(),
        }
    }

    /// Parse the wire spelling of a value for the given factor.
    pub fn parse(factor: Factor, value: &str) -> Result<Selection, ParseValueError> {
        Ok(match factor {
            Factor::PortalHypertension => Selection::PortalHypertension(value.parse()?),
            Factor::MacrovascularInvasion => Selection::MacrovascularInvasion(value.parse()?),
            Factor::AfpLevel => Selection::AfpLevel(value.parse()?),
            Factor::MicrovascularInvasion => Selection::MicrovascularInvasion(value.parse()?),
            Factor::ChildPugh => Selection::ChildPugh(value.parse()?),
            Factor::ResectionMargin => Selection::ResectionMargin(value.parse()?),
            Factor::TumorNumber => Selection::TumorNumber(value.parse()?),
            Factor::TumorSize => Selection::TumorSize(value.parse()?),
        })
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.factor().key(), self.value_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factor_keys_round_trip() {
        for f in Factor::ALL {
            assert_eq!(Factor::from_key(f.key()), Some(f));
        }
        assert_eq!(Factor::from_key("tumourSize"), None);
    }

    #[test]
    fn value_spellings_are_case_sensitive() {
        assert_eq!("B".parse::<ChildPugh>(), Ok(ChildPugh::B));
        assert!("b".parse::<ChildPugh>().is_err());
        assert_eq!("3plus".parse::<TumorNumber>(), Ok(TumorNumber::ThreePlus));
    }

    #[test]
    fn parse_error_lists_accepted_values() {
        let err = "huge".parse::<TumorSize>().unwrap_err();
        assert_eq!(err.value, "huge");
        assert_eq!(err.expected, "small|medium|large");
    }

    #[test]
    fn selection_parse_uses_factor_vocabulary() {
        let s = Selection::parse(Factor::TumorNumber, "2").unwrap();
        assert_eq!(s, Selection::TumorNumber(TumorNumber::Two));
        assert_eq!(s.factor(), Factor::TumorNumber);
        assert_eq!(s.to_string(), "tumorNumber=2");
        assert!(Selection::parse(Factor::AfpLevel, "yes").is_err());
    }

    #[test]
    fn every_factor_lists_its_values() {
        let counts: Vec<usize> = Factor::ALL.iter().map(|f| f.selections().len()).collect();
        assert_eq!(counts, vec![2, 2, 2, 2, 2, 2, 3, 3]);
    }
}
