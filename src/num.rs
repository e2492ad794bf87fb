//! Utilities related to numbers.

use num;
use std::fmt;

/// Floating point marker trait for easier control over trait bounds.
pub trait BFloat: Sync + Send + num::Float + num::cast::FromPrimitive + fmt::Debug {}

impl BFloat for f32 {}
impl BFloat for f64 {}

/// Whether the given value is finite and larger than zero.
pub fn is_finite_and_positive<F: BFloat>(value: F) -> bool {
    value.is_finite() && value > F::zero()
}

/// Whether the given value is finite and not smaller than zero.
pub fn is_finite_and_non_negative<F: BFloat>(value: F) -> bool {
    value.is_finite() && value >= F::zero()
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn positivity_checks_reject_nan_and_infinity() {
        assert!(is_finite_and_positive(0.03_f64));
        assert!(!is_finite_and_positive(0.0_f64));
        assert!(!is_finite_and_positive(f64::NAN));
        assert!(!is_finite_and_positive(f32::INFINITY));

        assert!(is_finite_and_non_negative(0.0_f64));
        assert!(!is_finite_and_non_negative(-1e-12_f64));
        assert!(!is_finite_and_non_negative(f64::NAN));
    }
}
