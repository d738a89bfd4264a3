// src/math/utils.rs

/// Numeric constants
pub mod constants {
    pub const EPSILON: f64 = 1e-12;
    /// Relative tolerance for comparing field magnitudes, which span many decades.
    pub const RELATIVE_EPSILON: f64 = 1e-9;
    pub const PI: f64 = std::f64::consts::PI;
}

/// Tolerance comparisons
pub mod comparison {
    use super::constants::{EPSILON, RELATIVE_EPSILON};

    /// Absolute comparison, suited for coordinates in meters.
    pub fn nearly_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    /// Relative comparison, suited for charges and field strengths.
    pub fn nearly_equal_relative(a: f64, b: f64) -> bool {
        let scale = a.abs().max(b.abs());
        if scale < EPSILON {
            return true;
        }
        (a - b).abs() / scale < RELATIVE_EPSILON
    }

    /// Inverse linear interpolation, 0.0 for a degenerate range
    pub fn inverse_lerp(a: f64, b: f64, value: f64) -> f64 {
        if nearly_equal_relative(a, b) {
            0.0
        } else {
            (value - a) / (b - a)
        }
    }
}

/// Text formatting for plot labels
pub mod format {
    /// Scientific notation with a signed two digit exponent, e.g. `1.88e+03`.
    pub fn scientific(value: f64, precision: usize) -> String {
        if !value.is_finite() {
            return format!("{value}");
        }
        let raw = format!("{:.*e}", precision, value);
        match raw.split_once('e') {
            Some((mantissa, exponent)) => {
                let exp: i32 = exponent.parse().unwrap_or(0);
                let sign = if exp < 0 { '-' } else { '+' };
                format!("{mantissa}e{sign}{:02}", exp.abs())
            }
            None => raw,
        }
    }

    /// Fixed point with the given number of decimals.
    pub fn fixed(value: f64, decimals: usize) -> String {
        format!("{:.*}", decimals, value)
    }
}

#[cfg(test)]
mod tests {
    use super::comparison::*;
    use super::format::*;

    #[test]
    fn test_scientific_positive_exponent() {
        assert_eq!(scientific(1883.239, 2), "1.88e+03");
    }

    #[test]
    fn test_scientific_negative_exponent() {
        assert_eq!(scientific(5.235_987_7e-10, 3), "5.236e-10");
    }

    #[test]
    fn test_scientific_zero() {
        assert_eq!(scientific(0.0, 2), "0.00e+00");
    }

    #[test]
    fn test_fixed() {
        assert_eq!(fixed(0.02, 2), "0.02");
        assert_eq!(fixed(-0.1, 2), "-0.10");
    }

    #[test]
    fn test_relative_comparison() {
        assert!(nearly_equal_relative(1.0e-10, 1.0e-10 * (1.0 + 1e-12)));
        assert!(!nearly_equal_relative(1.0e-10, 1.1e-10));
    }

    #[test]
    fn test_inverse_lerp() {
        assert!(nearly_equal(inverse_lerp(2.0, 4.0, 3.0), 0.5));
        assert!(nearly_equal(inverse_lerp(2.0, 2.0, 3.0), 0.0));
    }
}
