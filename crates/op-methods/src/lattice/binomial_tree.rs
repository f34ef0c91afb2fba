//! Recombining Cox-Ross-Rubinstein binomial tree.
//!
//! | Quantity | Formula |
//! |---|---|
//! | step | `Δt = T / N` |
//! | up factor | `u = exp(σ √Δt)` |
//! | down factor | `d = 1 / u` |
//! | discount per step | `exp(−r Δt)` |
//! | risk-neutral up probability | `p = (exp((r − q) Δt) − d) / (u − d)` |
//!
//! Node `(i, j)` is the state at depth `i` after `j` down-moves, so the
//! underlying there is `S · u^(i−j) · d^j`.

use op_core::{ensure, errors::Error, ContractSpec, MarketEnvironment, Real, Result, Size};

/// Parameters of a CRR lattice for one contract.
///
/// Construction fails with [`Error::ArbitrageViolation`] when the
/// risk-neutral probability leaves `[0, 1]`, i.e. when the rate, carry,
/// volatility and step size are inconsistent (typically too few steps for
/// a large `|r − q|` relative to `σ`).
#[derive(Debug, Clone, PartialEq)]
pub struct CrrLattice {
    x0: Real,
    steps: Size,
    dt: Real,
    up: Real,
    down: Real,
    discount: Real,
    pu: Real,
}

impl CrrLattice {
    /// Build the lattice for `contract` under `market` with `steps` periods.
    ///
    /// # Errors
    /// * [`Error::InvalidInput`] if `steps == 0`, `T ≤ 0`, `S ≤ 0`, `K ≤ 0`,
    ///   `σ` is negative or not finite, or `r`, `q` are not finite.
    /// * [`Error::ArbitrageViolation`] if `p ∉ [0, 1]` (including a
    ///   degenerate `u = d` from zero volatility).
    pub fn new(contract: &ContractSpec, market: &MarketEnvironment, steps: Size) -> Result<Self> {
        ensure!(steps >= 1, "lattice needs at least one step, got {steps}");
        ensure!(
            contract.maturity > 0.0,
            "maturity must be positive, got {}",
            contract.maturity
        );
        ensure!(contract.spot > 0.0, "spot must be positive, got {}", contract.spot);
        ensure!(
            contract.strike > 0.0,
            "strike must be positive, got {}",
            contract.strike
        );
        ensure!(
            contract.volatility.is_finite() && contract.volatility >= 0.0,
            "volatility must be finite and non-negative, got {}",
            contract.volatility
        );
        ensure!(market.is_finite(), "rate and dividend yield must be finite, got {market:?}");

        let dt = contract.maturity / steps as Real;
        let up = (contract.volatility * dt.sqrt()).exp();
        let down = 1.0 / up;
        let discount = (-market.rate * dt).exp();
        let growth = ((market.rate - market.dividend_yield) * dt).exp();
        let pu = (growth - down) / (up - down);

        if !(0.0..=1.0).contains(&pu) {
            tracing::debug!(
                probability = pu,
                dt,
                sigma = contract.volatility,
                rate = market.rate,
                "rejecting lattice"
            );
            return Err(Error::ArbitrageViolation { probability: pu });
        }

        Ok(Self {
            x0: contract.spot,
            steps,
            dt,
            up,
            down,
            discount,
            pu,
        })
    }

    // ── Accessors ────────────────────────────────────────────────────────

    /// Number of time steps.
    pub fn steps(&self) -> Size {
        self.steps
    }

    /// Time increment per step.
    pub fn dt(&self) -> Real {
        self.dt
    }

    /// Initial underlying value (spot price).
    pub fn x0(&self) -> Real {
        self.x0
    }

    /// Up factor `u`.
    pub fn up(&self) -> Real {
        self.up
    }

    /// Down factor `d = 1/u`.
    pub fn down(&self) -> Real {
        self.down
    }

    /// Per-step discount factor `exp(−r Δt)`.
    pub fn discount(&self) -> Real {
        self.discount
    }

    /// Risk-neutral up-move probability `p`.
    pub fn probability_up(&self) -> Real {
        self.pu
    }

    /// Down-move probability `1 − p`.
    pub fn probability_down(&self) -> Real {
        1.0 - self.pu
    }

    /// Number of nodes at depth `i` (always `i + 1`).
    pub fn size(&self, i: Size) -> Size {
        i + 1
    }

    /// Underlying value at node `(i, j)`, `j` counting down-moves.
    #[inline]
    pub fn underlying(&self, i: Size, j: Size) -> Real {
        self.x0 * self.up.powi((i - j) as i32) * self.down.powi(j as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn atm() -> (ContractSpec, MarketEnvironment) {
        (
            ContractSpec::new(100.0, 100.0, 1.0, 0.2),
            MarketEnvironment::new(0.05, 0.0),
        )
    }

    #[test]
    fn crr_parameters() {
        let (contract, market) = atm();
        let lattice = CrrLattice::new(&contract, &market, 4).unwrap();
        assert_relative_eq!(lattice.dt(), 0.25);
        assert_relative_eq!(lattice.up(), (0.2_f64 * 0.5).exp());
        assert_relative_eq!(lattice.up() * lattice.down(), 1.0, epsilon = 1e-15);
        assert_relative_eq!(lattice.discount(), (-0.0125_f64).exp());
        let expected_p =
            ((0.0125_f64).exp() - (-0.1_f64).exp()) / (0.1_f64.exp() - (-0.1_f64).exp());
        assert_relative_eq!(lattice.probability_up(), expected_p, epsilon = 1e-15);
        assert_relative_eq!(
            lattice.probability_up() + lattice.probability_down(),
            1.0,
            epsilon = 1e-15
        );
    }

    #[test]
    fn underlying_recombines() {
        let (contract, market) = atm();
        let lattice = CrrLattice::new(&contract, &market, 10).unwrap();
        // One up and one down cancel out.
        assert_relative_eq!(lattice.underlying(2, 1), 100.0, epsilon = 1e-12);
        assert_relative_eq!(lattice.underlying(0, 0), 100.0);
        assert_relative_eq!(
            lattice.underlying(3, 0),
            100.0 * lattice.up().powi(3),
            epsilon = 1e-12
        );
        assert_eq!(lattice.size(7), 8);
    }

    #[test]
    fn rejects_inconsistent_probability() {
        let contract = ContractSpec::new(100.0, 100.0, 1.0, 0.01);
        let market = MarketEnvironment::new(0.5, 0.0);
        match CrrLattice::new(&contract, &market, 1) {
            Err(Error::ArbitrageViolation { probability }) => assert!(probability > 1.0),
            other => panic!("expected arbitrage violation, got {other:?}"),
        }
    }

    #[test]
    fn high_carry_gives_negative_probability() {
        let contract = ContractSpec::new(100.0, 100.0, 1.0, 0.01);
        let market = MarketEnvironment::new(0.0, 0.5);
        match CrrLattice::new(&contract, &market, 1) {
            Err(Error::ArbitrageViolation { probability }) => assert!(probability < 0.0),
            other => panic!("expected arbitrage violation, got {other:?}"),
        }
    }

    #[test]
    fn zero_volatility_is_an_arbitrage_violation() {
        let contract = ContractSpec::new(100.0, 100.0, 1.0, 0.0);
        let market = MarketEnvironment::new(0.05, 0.0);
        assert!(matches!(
            CrrLattice::new(&contract, &market, 10),
            Err(Error::ArbitrageViolation { .. })
        ));
    }

    #[test]
    fn rejects_bad_inputs() {
        let market = MarketEnvironment::default();
        let ok = ContractSpec::new(100.0, 100.0, 1.0, 0.2);
        assert!(matches!(
            CrrLattice::new(&ok, &market, 0),
            Err(Error::InvalidInput(_))
        ));
        for bad in [
            ContractSpec { maturity: 0.0, ..ok },
            ContractSpec { spot: -1.0, ..ok },
            ContractSpec { strike: 0.0, ..ok },
            ok.with_volatility(-0.2),
            ok.with_volatility(Real::NAN),
            ok.with_volatility(Real::INFINITY),
        ] {
            assert!(matches!(
                CrrLattice::new(&bad, &market, 10),
                Err(Error::InvalidInput(_))
            ));
        }
        for bad_market in [
            MarketEnvironment::new(Real::NAN, 0.0),
            MarketEnvironment::new(0.05, Real::INFINITY),
        ] {
            assert!(matches!(
                CrrLattice::new(&ok, &bad_market, 10),
                Err(Error::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn flat_carry_admits_tiny_volatility() {
        // With r = q the growth factor is 1 and p stays at 1/(1 + u) for any σ > 0.
        let contract = ContractSpec::new(100.0, 100.0, 1.0, 1e-4);
        let lattice = CrrLattice::new(&contract, &MarketEnvironment::new(0.0, 0.0), 50).unwrap();
        assert_relative_eq!(lattice.probability_up(), 0.5, epsilon = 1e-5);
    }
}
