//! Error types for optionpricer.
//!
//! Every fallible operation in the workspace, lattice and closed-form alike,
//! reports through the single `thiserror`-derived [`Error`] enum. No pricer
//! or solver signals failure through a NaN return value.

use thiserror::Error;

/// The top-level error type used throughout optionpricer.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// The lattice risk-neutral probability fell outside `[0, 1]`.
    ///
    /// The rate, carry, volatility and step size are mutually inconsistent;
    /// retrying without changing the inputs will fail again.
    #[error("arbitrage violation: risk-neutral probability {probability} outside [0, 1]")]
    ArbitrageViolation {
        /// The offending up-move probability.
        probability: f64,
    },

    /// A required parameter is non-finite, non-positive, or otherwise unusable.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A market price lies outside the range the model can reach for any volatility.
    #[error("market price {price} outside no-arbitrage bounds [{lower}, {upper}]")]
    OutOfBounds {
        /// The observed market price.
        price: f64,
        /// Price as volatility tends to zero.
        lower: f64,
        /// Price as volatility tends to infinity.
        upper: f64,
    },

    /// Bracket expansion failed to find a sign change of the objective.
    #[error("no sign change of the objective found in [{lo}, {hi}]")]
    NoBracket {
        /// Lower volatility bound searched.
        lo: f64,
        /// Upper volatility bound reached after expansion.
        hi: f64,
    },

    /// Internal numeric failure (maps to `fail!`).
    #[error("{0}")]
    Runtime(String),
}

/// Shorthand `Result` type used throughout optionpricer.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Returns `Err(Error::InvalidInput(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use op_core::{ensure, errors::Error};
/// fn positive(x: f64) -> op_core::errors::Result<f64> {
///     ensure!(x > 0.0, "x must be positive, got {x}");
///     Ok(x)
/// }
/// assert!(positive(1.0).is_ok());
/// assert!(matches!(positive(-1.0), Err(Error::InvalidInput(_))));
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::InvalidInput(
                format!($($msg)*)
            ));
        }
    };
}

/// Returns `Err(Error::Runtime(...))` immediately.
///
/// # Example
/// ```
/// use op_core::{fail, errors::Error};
/// fn always_err() -> op_core::errors::Result<()> {
///     fail!("something went wrong");
/// }
/// assert!(always_err().is_err());
/// ```
#[macro_export]
macro_rules! fail {
    ($($msg:tt)*) => {
        return Err($crate::errors::Error::Runtime(format!($($msg)*)))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arbitrage_message_names_probability() {
        let err = Error::ArbitrageViolation { probability: 1.25 };
        assert_eq!(
            err.to_string(),
            "arbitrage violation: risk-neutral probability 1.25 outside [0, 1]"
        );
    }

    #[test]
    fn out_of_bounds_fields_accessible() {
        let err = Error::OutOfBounds {
            price: 120.0,
            lower: 0.0,
            upper: 100.0,
        };
        match err {
            Error::OutOfBounds { price, upper, .. } => {
                assert_eq!(price, 120.0);
                assert_eq!(upper, 100.0);
            }
            _ => panic!("wrong variant"),
        }
    }

    #[test]
    fn ensure_maps_to_invalid_input() {
        fn check(steps: usize) -> Result<usize> {
            ensure!(steps >= 1, "steps must be >= 1, got {steps}");
            Ok(steps)
        }
        assert_eq!(check(3), Ok(3));
        assert_eq!(
            check(0),
            Err(Error::InvalidInput("steps must be >= 1, got 0".into()))
        );
    }
}
