//! Exponential survival model: time from risk, rate from time.

/// Projected survival in months at zero risk, before treatment.
pub const BASE_SURVIVAL_MONTHS: f64 = 48.0;

/// Round to one decimal place, halves away from zero.
pub fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// Projected survival time in months.
///
/// `48 * exp(-risk_score)`, scaled by `1 + treatment_effect` when `treated`.
/// `treatment_effect` is ignored for the untreated arm.
pub fn compute_survival_time(risk_score: f64, treated: bool, treatment_effect: f64) -> f64 {
    let mut months = BASE_SURVIVAL_MONTHS * (-risk_score).exp();
    if treated {
        months *= 1.0 + treatment_effect;
    }
    round1(months)
}

/// Percentage surviving after `years`, clamped to `[0, 100]`.
///
/// A survival time of zero drives the exponent to negative infinity and the
/// rate to 0.
pub fn compute_survival_rate(survival_time: f64, years: f64) -> f64 {
    let months = years * 12.0;
    let rate = round1((-months / survival_time).exp() * 100.0);
    if rate.is_nan() {
        // 0/0: zero survival time at the zero-year horizon
        log::warn!("survival rate undefined for time {survival_time} at {years} years, using 0");
        return 0.0;
    }
    rate.clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_risk_untreated_is_base_time() {
        assert_eq!(compute_survival_time(0.0, false, 0.9), 48.0);
    }

    #[test]
    fn treated_time_is_scaled_then_rounded() {
        assert_eq!(compute_survival_time(0.0, true, 0.275), 61.2);
        // 48 * e^-1 = 17.658...
        assert_eq!(compute_survival_time(1.0, false, 0.0), 17.7);
    }

    #[test]
    fn rounding_is_half_away_from_zero() {
        assert_eq!(round1(0.25), 0.3);
        assert_eq!(round1(-0.25), -0.3);
        assert_eq!(round1(13.200000000000003), 13.2);
    }

    #[test]
    fn rate_points_for_base_time() {
        assert_eq!(compute_survival_rate(48.0, 3.0), 47.2);
        assert_eq!(compute_survival_rate(48.0, 5.0), 28.7);
    }

    #[test]
    fn zero_time_gives_zero_rate() {
        assert_eq!(compute_survival_rate(0.0, 3.0), 0.0);
        assert_eq!(compute_survival_rate(0.0, 0.0), 0.0);
    }

    #[test]
    fn zero_years_is_full_survival() {
        assert_eq!(compute_survival_rate(12.5, 0.0), 100.0);
    }
}
