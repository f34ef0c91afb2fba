//! Search configuration for the implied-volatility solvers.

use op_core::{ensure, Real, Result, Size, Volatility};

/// Volatility search bounds, price tolerance and iteration budget.
///
/// The budget is a deterministic compute cap: running out of iterations is
/// not an error, the solvers then return their best estimate flagged as not
/// converged.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolverSettings {
    /// Lower volatility bound.
    pub lo: Volatility,
    /// Upper volatility bound (the closed-form solver may expand it).
    pub hi: Volatility,
    /// Absolute price tolerance; also the bracket-width stop for the
    /// closed-form solver.
    pub tolerance: Real,
    /// Maximum bisection iterations.
    pub max_iterations: Size,
}

impl SolverSettings {
    /// Lower bound shared by both defaults.
    pub const DEFAULT_LO: Volatility = 1e-8;
    /// Upper bound shared by both defaults.
    pub const DEFAULT_HI: Volatility = 5.0;
    /// Tolerance shared by both defaults.
    pub const DEFAULT_TOLERANCE: Real = 1e-8;

    /// Defaults for the lattice-backed solver (100 iterations).
    pub fn lattice() -> Self {
        Self {
            lo: Self::DEFAULT_LO,
            hi: Self::DEFAULT_HI,
            tolerance: Self::DEFAULT_TOLERANCE,
            max_iterations: 100,
        }
    }

    /// Defaults for the closed-form solver (80 iterations).
    pub fn closed_form() -> Self {
        Self {
            max_iterations: 80,
            ..Self::lattice()
        }
    }

    /// Replace the search bounds.
    pub fn with_bounds(mut self, lo: Volatility, hi: Volatility) -> Self {
        self.lo = lo;
        self.hi = hi;
        self
    }

    /// Replace the tolerance.
    pub fn with_tolerance(mut self, tolerance: Real) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Replace the iteration budget.
    pub fn with_max_iterations(mut self, max_iterations: Size) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Check the settings are usable.
    ///
    /// # Errors
    /// [`Error::InvalidInput`](op_core::Error::InvalidInput) unless
    /// `0 ≤ lo < hi`, all values are finite, `tolerance > 0` and
    /// `max_iterations ≥ 1`.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.lo.is_finite() && self.hi.is_finite() && self.tolerance.is_finite(),
            "solver settings must be finite: {self:?}"
        );
        ensure!(self.lo >= 0.0, "lower bound must be non-negative, got {}", self.lo);
        ensure!(
            self.lo < self.hi,
            "lower bound {} must be below upper bound {}",
            self.lo,
            self.hi
        );
        ensure!(
            self.tolerance > 0.0,
            "tolerance must be positive, got {}",
            self.tolerance
        );
        ensure!(self.max_iterations >= 1, "max_iterations must be at least 1");
        Ok(())
    }
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self::closed_form()
    }
}
