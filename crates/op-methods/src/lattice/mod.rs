//! Lattice methods for option pricing.
//!
//! * [`CrrLattice`]: recombining Cox-Ross-Rubinstein binomial tree
//! * [`PriceVector`]: per-node option values at one depth of the tree
//! * [`price_american`] / [`price_european`]: backward-induction pricing

pub mod binomial_tree;

pub use binomial_tree::CrrLattice;

use op_core::{OptionType, Real, Size};

// ─── PriceVector ──────────────────────────────────────────────────────────────

/// Option values across the nodes of one tree depth, indexed by down-move
/// count `j`.
///
/// A single buffer of `steps + 1` slots is allocated once; rolling back one
/// depth overwrites slots `0..=i` in place and leaves the rest stale.
#[derive(Debug, Clone)]
pub struct PriceVector {
    values: Vec<Real>,
    depth: Size,
}

impl PriceVector {
    /// Terminal values `payoff(S_N,j)` for `j = 0..=N`.
    pub fn terminal(lattice: &CrrLattice, payoff: &dyn Fn(Real) -> Real) -> Self {
        let n = lattice.steps();
        let values = (0..lattice.size(n))
            .map(|j| payoff(lattice.underlying(n, j)))
            .collect();
        Self { values, depth: n }
    }

    /// Depth the live values belong to.
    pub fn depth(&self) -> Size {
        self.depth
    }

    /// Live values at the current depth (`depth + 1` entries).
    pub fn values(&self) -> &[Real] {
        &self.values[..=self.depth]
    }

    /// Roll back one depth.
    ///
    /// Each surviving node takes the discounted expectation of its two
    /// children; with `exercise` set, that continuation value is floored by
    /// the immediate-exercise value at the node.
    ///
    /// # Panics
    /// Panics if already at the root.
    pub fn step_back(
        &mut self,
        lattice: &CrrLattice,
        payoff: &dyn Fn(Real) -> Real,
        exercise: bool,
    ) {
        assert!(self.depth > 0, "cannot roll back past the root");
        let i = self.depth - 1;
        let disc = lattice.discount();
        let pu = lattice.probability_up();
        let pd = lattice.probability_down();
        for j in 0..lattice.size(i) {
            let continuation = disc * (pu * self.values[j] + pd * self.values[j + 1]);
            self.values[j] = if exercise {
                continuation.max(payoff(lattice.underlying(i, j)))
            } else {
                continuation
            };
        }
        self.depth = i;
    }

    /// Value at the root, once rolled back to depth 0.
    pub fn root(&self) -> Real {
        self.values[0]
    }
}

// ─── Backward-induction pricing ───────────────────────────────────────────────

/// Roll a payoff back through the whole lattice and return the root value.
///
/// `early_exercise` selects American (`true`) or European (`false`) rules.
pub fn rollback(lattice: &CrrLattice, payoff: &dyn Fn(Real) -> Real, early_exercise: bool) -> Real {
    let mut values = PriceVector::terminal(lattice, payoff);
    while values.depth() > 0 {
        values.step_back(lattice, payoff, early_exercise);
    }
    values.root()
}

/// Price an American vanilla option by backward induction.
///
/// At every node the holder keeps the larger of the discounted continuation
/// and the intrinsic value.
pub fn price_american(lattice: &CrrLattice, option_type: OptionType, strike: Real) -> Real {
    rollback(lattice, &|s| option_type.intrinsic(s, strike), true)
}

/// Price a European vanilla option on the same lattice (no early exercise).
pub fn price_european(lattice: &CrrLattice, option_type: OptionType, strike: Real) -> Real {
    rollback(lattice, &|s| option_type.intrinsic(s, strike), false)
}

// ─── Tests ────────────────────────────────────────────────────────────────────
