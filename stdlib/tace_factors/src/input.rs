use serde::{Deserialize, Serialize};

use crate::error::InputError;
use crate::factor::{
    AfpLevel, ChildPugh, Factor, Presence, ResectionMargin, Selection, TumorNumber, TumorSize,
};

/// The factor selections of one patient.
///
/// Every field is optional: the scoring engine skips a factor that has no
/// selection. Use [`PatientInput::validate`] to require all eight before
/// scoring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PatientInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub portal_hypertension: Option<Presence>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub macrovascular_invasion: Option<Presence>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub afp_level: Option<AfpLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub microvascular_invasion: Option<Presence>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub child_pugh: Option<ChildPugh>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resection_margin: Option<ResectionMargin>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tumor_number: Option<TumorNumber>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tumor_size: Option<TumorSize>,
}

impl PatientInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a selection, replacing any earlier value for the same factor.
    pub fn set(&mut self, selection: Selection) {
        match selection {
            Selection::PortalHypertension(v) => self.portal_hypertension = Some(v),
            Selection::MacrovascularInvasion(v) => self.macrovascular_invasion = Some(v),
            Selection::AfpLevel(v) => self.afp_level = Some(v),
            Selection::MicrovascularInvasion(v) => self.microvascular_invasion = Some(v),
            Selection::ChildPugh(v) => self.child_pugh = Some(v),
            Selection::ResectionMargin(v) => self.resection_margin = Some(v),
            Selection::TumorNumber(v) => self.tumor_number = Some(v),
            Selection::TumorSize(v) => self.tumor_size = Some(v),
        }
    }

    pub fn with(mut self, selection: Selection) -> Self {
        self.set(selection);
        self
    }

    pub fn get(&self, factor: Factor) -> Option<Selection> {
        match factor {
            Factor::PortalHypertension => self.portal_hypertension.map(Selection::PortalHypertension),
            Factor::MacrovascularInvasion => self
                .macrovascular_invasion
                .map(Selection::MacrovascularInvasion),
            Factor::AfpLevel => self.afp_level.map(Selection::AfpLevel),
            Factor::MicrovascularInvasion => self
                .microvascular_invasion
                .map(Selection::MicrovascularInvasion),
            Factor::ChildPugh => self.child_pugh.map(Selection::ChildPugh),
            Factor::ResectionMargin => self.resection_margin.map(Selection::ResectionMargin),
            Factor::TumorNumber => self.tumor_number.map(Selection::TumorNumber),
            Factor::TumorSize => self.tumor_size.map(Selection::TumorSize),
        }
    }

    /// Present selections in form order.
    pub fn selections(&self) -> impl Iterator<Item = Selection> + '_ {
        Factor::ALL.iter().filter_map(move |&f| self.get(f))
    }

    /// Build an input from free-form `(key, value)` pairs.
    ///
    /// Unknown keys and values the factor does not accept are skipped. Later
    /// pairs win over earlier ones for the same factor.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut input = PatientInput::new();
        for (key, value) in pairs {
            let (key, value) = (key.as_ref(), value.as_ref());
            let Some(factor) = Factor::from_key(key) else {
                log::debug!("ignoring unknown factor '{key}'");
                continue;
            };
            match Selection::parse(factor, value) {
                Ok(selection) => input.set(selection),
                Err(e) => log::debug!("ignoring {key}: {e}"),
            }
        }
        input
    }

    pub fn missing(&self) -> Vec<Factor> {
        Factor::ALL
            .iter()
            .copied()
            .filter(|&f| self.get(f).is_none())
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.selections().count() == Factor::ALL.len()
    }

    /// Require a selection for every factor.
    pub fn validate(&self) -> Result<(), InputError> {
        let missing = self.missing();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(InputError::MissingFields(missing))
        }
    }
}

impl FromIterator<Selection> for PatientInput {
    fn from_iter<T: IntoIterator<Item = Selection>>(iter: T) -> Self {
        let mut input = PatientInput::new();
        for s in iter {
            input.set(s);
        }
        input
    }
}
