//! Shared patient fixtures for the integration tests.

use tace_factors::{Factor, PatientInput};

/// Every finding favourable: zero risk.
pub fn favourable() -> PatientInput {
    PatientInput::from_pairs([
        ("portalHypertension", "no"),
        ("macrovascularInvasion", "no"),
        ("afpLevel", "low"),
        ("microvascularInvasion", "no"),
        ("childPugh", "A"),
        ("resectionMargin", "wide"),
        ("tumorNumber", "1"),
        ("tumorSize", "small"),
    ])
}

/// Every finding at its worst value.
pub fn unfavourable() -> PatientInput {
    PatientInput::from_pairs([
        ("portalHypertension", "yes"),
        ("macrovascularInvasion", "yes"),
        ("afpLevel", "high"),
        ("microvascularInvasion", "yes"),
        ("childPugh", "B"),
        ("resectionMargin", "narrow"),
        ("tumorNumber", "3plus"),
        ("tumorSize", "large"),
    ])
}

/// All complete selections, in form order.
pub fn all_combinations() -> Vec<PatientInput> {
    let mut inputs = vec![PatientInput::new()];
    for factor in Factor::ALL {
        inputs = inputs
            .into_iter()
            .flat_map(|base| factor.selections().into_iter().map(move |s| base.with(s)))
            .collect();
    }
    inputs
}
