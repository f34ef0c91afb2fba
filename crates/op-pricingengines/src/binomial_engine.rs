//! Binomial (CRR) engine for American vanilla options.

use op_core::{ContractSpec, MarketEnvironment, OptionType, Price, QuoteSpec, Result, Size};
use op_methods::lattice::{price_american, CrrLattice};

use crate::engine::PricingEngine;
use crate::implied_volatility::{implied_volatility_lattice, ImpliedVolatility};
use crate::solver_settings::SolverSettings;

/// Cox-Ross-Rubinstein lattice engine with early exercise at every node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinomialAmericanEngine {
    steps: Size,
}

impl BinomialAmericanEngine {
    /// Engine with `steps` lattice periods.
    pub fn new(steps: Size) -> Self {
        Self { steps }
    }

    /// Number of lattice periods.
    pub fn steps(&self) -> Size {
        self.steps
    }
}

impl PricingEngine for BinomialAmericanEngine {
    fn price(
        &self,
        option_type: OptionType,
        contract: &ContractSpec,
        market: &MarketEnvironment,
    ) -> Result<Price> {
        binomial_american_price(option_type, contract, market, self.steps)
    }

    fn implied_volatility(
        &self,
        option_type: OptionType,
        market_price: Price,
        quote: &QuoteSpec,
        market: &MarketEnvironment,
        settings: &SolverSettings,
    ) -> Result<ImpliedVolatility> {
        implied_volatility_lattice(option_type, market_price, quote, market, self.steps, settings)
    }

    fn default_solver_settings(&self) -> SolverSettings {
        SolverSettings::lattice()
    }
}

/// American call/put value on a `steps`-period CRR lattice.
///
/// # Errors
/// * [`Error::InvalidInput`](op_core::Error::InvalidInput) if `steps == 0`
///   or any of `S`, `K`, `T` is not positive.
/// * [`Error::ArbitrageViolation`](op_core::Error::ArbitrageViolation) if
///   the risk-neutral probability leaves `[0, 1]`.
pub fn binomial_american_price(
    option_type: OptionType,
    contract: &ContractSpec,
    market: &MarketEnvironment,
    steps: Size,
) -> Result<Price> {
    let lattice = CrrLattice::new(contract, market, steps)?;
    Ok(price_american(&lattice, option_type, contract.strike))
}
