//! Small numeric helpers shared by the derivations
//!
//! Every quotient in the engine goes through these so that empty inputs and
//! zero denominators come back as 0 instead of NaN or infinity.

/// Replace NaN and infinities with 0
#[inline]
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Arithmetic mean, 0 for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    finite_or_zero(values.iter().sum::<f64>() / values.len() as f64)
}

/// Round with halves going toward positive infinity (2.5 -> 3, -2.5 -> -2)
#[inline]
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Rounded integer of a value, 0 when the value is not finite
pub fn rounded(value: f64) -> i64 {
    let r = round_half_up(value);
    if r.is_finite() {
        r as i64
    } else {
        0
    }
}

/// Quotient guarded against a zero denominator
pub fn safe_div(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        finite_or_zero(numerator / denominator)
    }
}

/// Rounded percent change from `previous` to `current`, 0 when `previous` is 0
pub fn percent_change(current: f64, previous: f64) -> i64 {
    rounded(safe_div(current - previous, previous) * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), 0.0);
        assert!((mean(&[1.0, 2.0, 6.0]) - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(333.33), 333.0);
    }

    #[test]
    fn test_rounded_non_finite() {
        assert_eq!(rounded(f64::NAN), 0);
        assert_eq!(rounded(f64::INFINITY), 0);
    }

    #[test]
    fn test_percent_change() {
        assert_eq!(percent_change(15.0, 10.0), 50);
        assert_eq!(percent_change(5.0, 10.0), -50);
        assert_eq!(percent_change(7.0, 0.0), 0);
    }

    #[test]
    fn test_safe_div() {
        assert_eq!(safe_div(1.0, 0.0), 0.0);
        assert_eq!(safe_div(6.0, 3.0), 2.0);
    }
}
