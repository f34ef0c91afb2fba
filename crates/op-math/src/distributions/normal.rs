//! Standard normal distribution.

use op_core::Real;
use std::f64::consts::{FRAC_1_SQRT_2, PI};

/// The error function erf(x), delegated to `statrs`.
#[inline]
pub fn error_function(x: Real) -> Real {
    statrs::function::erf::erf(x)
}

/// The standard normal probability density function.
///
/// `φ(x) = exp(-x²/2) / √(2π)`
#[inline]
pub fn normal_pdf(x: Real) -> Real {
    (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
}

/// The standard normal cumulative distribution function Φ(x).
///
/// Evaluated through the error function, `Φ(x) = ½(1 + erf(x/√2))`, which
/// keeps full double precision in the body and usable accuracy far into the
/// tails.
#[inline]
pub fn normal_cdf(x: Real) -> Real {
    0.5 * (1.0 + error_function(x * FRAC_1_SQRT_2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    #[test]
    fn normal_pdf_at_zero() {
        let expected = 1.0 / (2.0 * PI).sqrt();
        assert_abs_diff_eq!(normal_pdf(0.0), expected, epsilon = 1e-15);
    }

    #[test]
    fn normal_cdf_at_zero() {
        assert_abs_diff_eq!(normal_cdf(0.0), 0.5, epsilon = 1e-15);
    }

    #[test]
    fn normal_cdf_reference_values() {
        assert_abs_diff_eq!(normal_cdf(1.0), 0.841_344_746_068_542_9, epsilon = 1e-14);
        assert_abs_diff_eq!(normal_cdf(-1.96), 0.024_997_895_148_220_4, epsilon = 1e-14);
        assert_abs_diff_eq!(normal_cdf(0.35), 0.636_830_651_175_618_9, epsilon = 1e-14);
    }

    #[test]
    fn normal_cdf_tails() {
        assert_abs_diff_eq!(normal_cdf(10.0), 1.0, epsilon = 1e-15);
        assert!(normal_cdf(-10.0) < 1e-20);
    }

    proptest! {
        #[test]
        fn cdf_is_symmetric(x in -8.0f64..8.0) {
            prop_assert!((normal_cdf(x) + normal_cdf(-x) - 1.0).abs() < 1e-14);
        }

        #[test]
        fn cdf_is_non_decreasing(x in -8.0f64..8.0, dx in 0.0f64..1.0) {
            prop_assert!(normal_cdf(x + dx) >= normal_cdf(x));
        }
    }
}
