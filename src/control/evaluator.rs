//! Threshold comparison.

/// Strictly greater than. Equal usage and NaN never breach.
pub fn is_breached(usage: f64, threshold: f64) -> bool {
    usage > threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strict_comparison() {
        assert!(is_breached(0.9, 0.75));
        assert!(!is_breached(0.75, 0.75));
        assert!(!is_breached(0.5, 0.75));
        assert!(is_breached(0.00004, 0.00003));
    }

    #[test]
    fn test_zero_and_nan_never_breach_non_negative_threshold() {
        assert!(!is_breached(0.0, 0.0));
        assert!(!is_breached(f64::NAN, 0.0));
    }
}
