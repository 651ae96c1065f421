#![forbid(unsafe_code)]

//! Tolerance-aware float comparisons.
//!
//! Every position and boundary comparison in the engine goes through these
//! helpers instead of `==`, `<`, or `>`.

/// Absolute tolerance for all coordinate comparisons in unit space.
pub const EPSILON: f64 = 1e-6;

/// `|a - b| <= EPSILON`.
#[inline]
#[must_use]
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= EPSILON
}

/// `a > b`, or `a` is within tolerance of `b`.
#[inline]
#[must_use]
pub fn approx_ge(a: f64, b: f64) -> bool {
    a > b || approx_eq(a, b)
}

/// `a < b`, or `a` is within tolerance of `b`.
#[inline]
#[must_use]
pub fn approx_le(a: f64, b: f64) -> bool {
    a < b || approx_eq(a, b)
}

/// Strictly greater, ignoring differences inside the tolerance band.
#[inline]
#[must_use]
pub fn approx_gt(a: f64, b: f64) -> bool {
    a > b && !approx_eq(a, b)
}

/// Strictly less, ignoring differences inside the tolerance band.
#[inline]
#[must_use]
pub fn approx_lt(a: f64, b: f64) -> bool {
    a < b && !approx_eq(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn close_values_compare_equal() {
        assert!(approx_eq(0.5, 0.5 + EPSILON / 2.0));
        assert!(approx_eq(0.1 + 0.2, 0.3));
        assert!(!approx_eq(0.5, 0.5 + EPSILON * 10.0));
    }

    #[test]
    fn inclusive_comparisons_absorb_drift() {
        assert!(approx_ge(0.3, 0.1 + 0.2));
        assert!(approx_le(0.1 + 0.2, 0.3));
        assert!(approx_ge(0.7, 0.3));
        assert!(!approx_le(0.7, 0.3));
    }

    #[test]
    fn strict_comparisons_ignore_drift() {
        assert!(!approx_gt(0.1 + 0.2, 0.3));
        assert!(!approx_lt(0.3, 0.1 + 0.2));
        assert!(approx_gt(0.5, 0.25));
        assert!(approx_lt(0.25, 0.5));
    }
}
