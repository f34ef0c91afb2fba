//! # op-methods
//!
//! Numerical methods: the Cox-Ross-Rubinstein binomial lattice and the
//! backward-induction rollback used to price American and European
//! vanilla options on it.
//!
//! # Modules
//!
//! * [`lattice`]: lattice parameters and backward-induction pricing

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Lattice methods: CRR binomial tree, backward induction.
pub mod lattice;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use lattice::{price_american, price_european, rollback, CrrLattice, PriceVector};
