//! # op-math
//!
//! Mathematical utilities: the standard normal distribution (via the
//! `statrs` error function) and the 1-D bracketing helpers shared by the
//! implied-volatility solvers.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Probability distributions.
pub mod distributions;

/// 1D root-finding helpers.
pub mod solvers1d;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use distributions::{normal_cdf, normal_pdf};
pub use solvers1d::{newton_polish, SearchBracket};
