//! 1D bracketing helpers for monotone objectives.
//!
//! The implied-volatility solvers drive their own iteration loops (each has
//! its own convergence and return policy), so this module supplies the
//! pieces rather than a closed solver: a [`SearchBracket`] that can be
//! expanded and halved, and a guarded single [`newton_polish`] step.

use op_core::Real;

/// Default multiplicative growth of the upper bound per expansion.
pub const DEFAULT_EXPANSION_FACTOR: Real = 1.5;

/// Default cap on upper-bound expansions.
pub const DEFAULT_MAX_EXPANSIONS: u32 = 20;

/// An interval `[lo, hi]` believed to contain a root of `f`.
///
/// When built with [`SearchBracket::evaluate`] the objective values at both
/// ends are carried along, so the sign-change invariant can be checked and
/// preserved by [`SearchBracket::narrow`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchBracket {
    lo: Real,
    hi: Real,
    f_lo: Real,
    f_hi: Real,
}

impl SearchBracket {
    /// A bracket whose endpoint values are unknown.
    ///
    /// Only [`keep_lower`](Self::keep_lower) / [`keep_upper`](Self::keep_upper)
    /// are meaningful on it.
    pub fn unchecked(lo: Real, hi: Real) -> Self {
        Self {
            lo,
            hi,
            f_lo: Real::NAN,
            f_hi: Real::NAN,
        }
    }

    /// Evaluate `f` at both ends.
    pub fn evaluate<F>(f: &F, lo: Real, hi: Real) -> Self
    where
        F: Fn(Real) -> Real,
    {
        Self {
            lo,
            hi,
            f_lo: f(lo),
            f_hi: f(hi),
        }
    }

    /// Lower bound.
    pub fn lo(&self) -> Real {
        self.lo
    }

    /// Upper bound.
    pub fn hi(&self) -> Real {
        self.hi
    }

    /// Objective value at the lower bound.
    pub fn f_lo(&self) -> Real {
        self.f_lo
    }

    /// Objective value at the upper bound.
    pub fn f_hi(&self) -> Real {
        self.f_hi
    }

    /// `(lo + hi) / 2`.
    #[inline]
    pub fn midpoint(&self) -> Real {
        0.5 * (self.lo + self.hi)
    }

    /// `hi − lo`.
    #[inline]
    pub fn width(&self) -> Real {
        self.hi - self.lo
    }

    /// `true` unless both endpoint values are strictly on the same side of zero.
    pub fn has_sign_change(&self) -> bool {
        !(self.f_lo * self.f_hi > 0.0)
    }

    /// Grow `hi` geometrically until `f` changes sign across the bracket.
    ///
    /// Returns the number of expansions performed, or `None` if no sign
    /// change was found within `max_expansions`. The bracket keeps its last
    /// (widest) state either way.
    pub fn expand_upper<F>(&mut self, f: &F, factor: Real, max_expansions: u32) -> Option<u32>
    where
        F: Fn(Real) -> Real,
    {
        let mut expansions = 0;
        while !self.has_sign_change() && expansions < max_expansions {
            self.hi *= factor;
            self.f_hi = f(self.hi);
            expansions += 1;
            tracing::debug!(hi = self.hi, f_hi = self.f_hi, expansions, "expanded bracket");
        }
        self.has_sign_change().then_some(expansions)
    }

    /// Replace one end by `x` so that the sign change is kept.
    ///
    /// A zero at `x` moves the upper bound down.
    pub fn narrow(&mut self, x: Real, fx: Real) {
        if self.f_lo * fx <= 0.0 {
            self.hi = x;
            self.f_hi = fx;
        } else {
            self.lo = x;
            self.f_lo = fx;
        }
    }

    /// Discard the upper half: `hi ← x`.
    pub fn keep_lower(&mut self, x: Real) {
        self.hi = x;
        self.f_hi = Real::NAN;
    }

    /// Discard the lower half: `lo ← x`.
    pub fn keep_upper(&mut self, x: Real) {
        self.lo = x;
        self.f_lo = Real::NAN;
    }
}

/// One Newton-Raphson correction `x − f/f'`, accepted only when the
/// derivative exceeds `min_derivative` and the result lies strictly inside
/// `(lower, upper)`.
pub fn newton_polish(
    x: Real,
    fx: Real,
    dfx: Real,
    min_derivative: Real,
    lower: Real,
    upper: Real,
) -> Option<Real> {
    if !(dfx > min_derivative) {
        return None;
    }
    let corrected = x - fx / dfx;
    (corrected > lower && corrected < upper).then_some(corrected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn cubic(x: Real) -> Real {
        x * x * x - 8.0
    }

    #[test]
    fn evaluate_detects_sign_change() {
        let b = SearchBracket::evaluate(&cubic, 0.0, 3.0);
        assert!(b.has_sign_change());
        assert_eq!(b.f_lo(), -8.0);
        assert_eq!(b.f_hi(), 19.0);
        let b = SearchBracket::evaluate(&cubic, 0.0, 1.0);
        assert!(!b.has_sign_change());
    }

    #[test]
    fn expand_upper_finds_root_side() {
        let mut b = SearchBracket::evaluate(&cubic, 0.5, 1.0);
        let n = b.expand_upper(&cubic, 1.5, 20).unwrap();
        // 1.0 · 1.5² = 2.25 is the first upper bound past the root at 2.
        assert_eq!(n, 2);
        assert_abs_diff_eq!(b.hi(), 2.25, epsilon = 1e-15);
        assert!(b.has_sign_change());
    }

    #[test]
    fn expand_upper_gives_up() {
        let f = |x: Real| x + 1.0;
        let mut b = SearchBracket::evaluate(&f, 0.0, 1.0);
        assert_eq!(b.expand_upper(&f, 1.5, 20), None);
        assert_abs_diff_eq!(b.hi(), 1.5_f64.powi(20), epsilon = 1e-9);
    }

    #[test]
    fn narrow_keeps_invariant() {
        let mut b = SearchBracket::evaluate(&cubic, 0.0, 4.0);
        for _ in 0..60 {
            let m = b.midpoint();
            b.narrow(m, cubic(m));
            assert!(b.has_sign_change());
        }
        assert_abs_diff_eq!(b.midpoint(), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn keep_halves() {
        let mut b = SearchBracket::unchecked(0.0, 4.0);
        b.keep_lower(2.0);
        assert_eq!((b.lo(), b.hi()), (0.0, 2.0));
        b.keep_upper(1.0);
        assert_eq!((b.lo(), b.hi()), (1.0, 2.0));
        assert_eq!(b.width(), 1.0);
    }

    #[test]
    fn newton_polish_guards() {
        // f(x) = x² − 2 at x = 1.5: correction to 1.41666…
        let x = 1.5;
        let polished = newton_polish(x, x * x - 2.0, 2.0 * x, 1e-12, 0.0, 10.0).unwrap();
        assert_abs_diff_eq!(polished, 1.416_666_666_666_666_7, epsilon = 1e-15);
        assert_eq!(newton_polish(x, 0.25, 0.0, 1e-12, 0.0, 10.0), None);
        assert_eq!(newton_polish(x, 100.0, 1.0, 1e-12, 0.0, 10.0), None);
        assert_eq!(newton_polish(x, -100.0, 1.0, 1e-12, 0.0, 10.0), None);
    }
}
