use proptest::prelude::*;
use tace_engine::{
    compute_risk_score, compute_survival_rate, compute_survival_time, compute_treatment_effect,
    explain_risk, project, PatientInput,
};
use tace_factors::Factor;

/// Any subset of factors, each with any of its values.
fn arb_input() -> impl Strategy<Value = PatientInput> {
    proptest::collection::vec(proptest::option::of(0usize..3), Factor::ALL.len()).prop_map(
        |picks| {
            Factor::ALL
                .iter()
                .zip(picks)
                .filter_map(|(factor, pick)| {
                    let options = factor.selections();
                    pick.map(|i| options[i % options.len()])
                })
                .collect::<PatientInput>()
        },
    )
}

proptest! {
    #[test]
    fn risk_score_is_non_negative(input in arb_input()) {
        prop_assert!(compute_risk_score(&input) >= 0.0);
    }

    #[test]
    fn treatment_effect_is_within_table_range(input in arb_input()) {
        let effect = compute_treatment_effect(&input);
        prop_assert!(effect >= 0.1 - 1e-12 && effect <= 0.3 + 1e-12);
    }

    #[test]
    fn survival_time_decreases_with_risk(r in 0.0f64..4.0, d in 0.5f64..2.0, effect in 0.0f64..0.3) {
        prop_assert!(compute_survival_time(r, false, effect) > compute_survival_time(r + d, false, effect));
        prop_assert!(compute_survival_time(r, true, effect) > compute_survival_time(r + d, true, effect));
    }

    #[test]
    fn survival_time_never_increases_with_risk(r1 in 0.0f64..10.0, r2 in 0.0f64..10.0) {
        let (lo, hi) = if r1 <= r2 { (r1, r2) } else { (r2, r1) };
        prop_assert!(compute_survival_time(lo, false, 0.0) >= compute_survival_time(hi, false, 0.0));
    }

    #[test]
    fn treated_time_is_at_least_untreated(r in 0.0f64..6.0, effect in 0.0f64..1.0) {
        prop_assert!(compute_survival_time(r, true, effect) >= compute_survival_time(r, false, effect));
    }

    #[test]
    fn survival_rate_is_a_percentage(time in 0.0f64..1000.0, years in 0.0f64..50.0) {
        let rate = compute_survival_rate(time, years);
        prop_assert!((0.0..=100.0).contains(&rate));
    }

    #[test]
    fn projection_is_idempotent(input in arb_input()) {
        prop_assert_eq!(project(&input), project(&input));
    }

    #[test]
    fn net_benefit_is_non_negative_with_builtin_tables(input in arb_input()) {
        let p = project(&input);
        for delta in [p.net_benefit.survival_time, p.net_benefit.survival_3_year, p.net_benefit.survival_5_year] {
            prop_assert!(delta.value() >= 0.0);
            prop_assert!(delta.to_string().starts_with('+'));
        }
    }

    #[test]
    fn explanation_adds_up(input in arb_input()) {
        let explanation = explain_risk(&input);
        let sum: f64 = explanation.contributions.iter().map(|c| c.risk_weight).sum();
        prop_assert!((sum - compute_risk_score(&input)).abs() < 1e-12);
        prop_assert_eq!(explanation.contributions.len() + explanation.skipped.len(), Factor::ALL.len());
    }
}
