//! A/B Comparison
//!
//! Relative speedup between two bindings measured on the same input.

/// Speedup of `a` over `b`: `b_mean / a_mean`.
///
/// Values above 1.0 mean `a` is faster. Returns `None` when the ratio is
/// undefined: a non-positive or non-finite `a_mean`, or a non-finite result.
pub fn speedup(a_mean: f64, b_mean: f64) -> Option<f64> {
    if !a_mean.is_finite() || !b_mean.is_finite() || a_mean <= 0.0 {
        return None;
    }
    let ratio = b_mean / a_mean;
    ratio.is_finite().then_some(ratio)
}

/// Human wording for a speedup value, relative to `a`
pub fn speedup_verdict(ratio: f64) -> &'static str {
    if ratio > 1.0 { "faster" } else { "slower" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speedup_ratio() {
        assert_eq!(speedup(0.5, 1.5), Some(3.0));
        assert_eq!(speedup(2.0, 1.0), Some(0.5));
    }

    #[test]
    fn test_speedup_is_exact_quotient() {
        let a = 0.123_456_789;
        let b = 0.987_654_321;
        assert_eq!(speedup(a, b), Some(b / a));
    }

    #[test]
    fn test_zero_baseline_is_undefined() {
        assert_eq!(speedup(0.0, 1.0), None);
        assert_eq!(speedup(-1.0, 1.0), None);
    }

    #[test]
    fn test_non_finite_inputs() {
        assert_eq!(speedup(f64::NAN, 1.0), None);
        assert_eq!(speedup(1.0, f64::INFINITY), None);
        assert_eq!(speedup(f64::MIN_POSITIVE, f64::MAX), None);
    }

    #[test]
    fn test_verdict() {
        assert_eq!(speedup_verdict(2.0), "faster");
        assert_eq!(speedup_verdict(0.8), "slower");
        assert_eq!(speedup_verdict(1.0), "slower");
    }
}
