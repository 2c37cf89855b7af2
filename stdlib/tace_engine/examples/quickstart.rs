use tace_engine::{explain_risk, project, PatientInput};

fn main() {
    let input = PatientInput::from_pairs([
        ("portalHypertension", "no"),
        ("macrovascularInvasion", "no"),
        ("afpLevel", "high"),
        ("microvascularInvasion", "yes"),
        ("childPugh", "A"),
        ("resectionMargin", "narrow"),
        ("tumorNumber", "2"),
        ("tumorSize", "medium"),
    ]);

    let p = project(&input);
    println!(
        "risk={:.2} effect={:.3}",
        p.risk_score, p.treatment_effect
    );
    println!(
        "with TACE: {} months, 3y {}%, 5y {}%",
        p.with_treatment.survival_time,
        p.with_treatment.survival_3_year,
        p.with_treatment.survival_5_year
    );
    println!(
        "without TACE: {} months, 3y {}%, 5y {}%",
        p.without_treatment.survival_time,
        p.without_treatment.survival_3_year,
        p.without_treatment.survival_5_year
    );
    println!(
        "net benefit: {} months, 3y {}%, 5y {}%",
        p.net_benefit.survival_time, p.net_benefit.survival_3_year, p.net_benefit.survival_5_year
    );

    for c in explain_risk(&input).contributions {
        println!("  {}={} adds {}", c.factor, c.value, c.risk_weight);
    }
}
