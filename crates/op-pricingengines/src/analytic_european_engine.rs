//! Analytic European option engine (Black-Scholes-Merton).
//!
//! Prices European vanilla options with the closed-form Black-Scholes-Merton
//! formula and provides vega, the one sensitivity the implied-volatility
//! solver needs for its Newton polish.

use op_core::{ContractSpec, MarketEnvironment, OptionType, Price, QuoteSpec, Real, Result};
use op_math::distributions::{normal_cdf, normal_pdf};

use crate::engine::PricingEngine;
use crate::implied_volatility::{implied_volatility_black_scholes, ImpliedVolatility};
use crate::solver_settings::SolverSettings;

/// Analytic pricing engine for European vanilla options.
///
/// Implements the Black-Scholes-Merton closed-form solution:
///
/// $$C = S e^{-qT} N(d_1) - K e^{-rT} N(d_2)$$
/// $$P = K e^{-rT} N(-d_2) - S e^{-qT} N(-d_1)$$
///
/// where $d_{1,2} = \frac{\ln(S/K) + (r - q \pm \sigma^2/2)T}{\sigma\sqrt{T}}$
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnalyticEuropeanEngine;

impl AnalyticEuropeanEngine {
    /// Create a new engine.
    pub fn new() -> Self {
        Self
    }
}

impl PricingEngine for AnalyticEuropeanEngine {
    fn price(
        &self,
        option_type: OptionType,
        contract: &ContractSpec,
        market: &MarketEnvironment,
    ) -> Result<Price> {
        Ok(black_scholes_price(option_type, contract, market))
    }

    fn implied_volatility(
        &self,
        option_type: OptionType,
        market_price: Price,
        quote: &QuoteSpec,
        market: &MarketEnvironment,
        settings: &SolverSettings,
    ) -> Result<ImpliedVolatility> {
        implied_volatility_black_scholes(option_type, market_price, quote, market, settings)
    }

    fn default_solver_settings(&self) -> SolverSettings {
        SolverSettings::closed_form()
    }
}

/// `(d1, d2)` for a contract with positive maturity and volatility.
fn d1_d2(contract: &ContractSpec, market: &MarketEnvironment) -> (Real, Real) {
    let ContractSpec {
        spot,
        strike,
        maturity: t,
        volatility: sigma,
    } = *contract;
    let std_dev = sigma * t.sqrt();
    let d1 = ((spot / strike).ln()
        + (market.rate - market.dividend_yield + 0.5 * sigma * sigma) * t)
        / std_dev;
    (d1, d1 - std_dev)
}

/// Black-Scholes-Merton price of a European call or put.
///
/// Degenerate inputs collapse, in this order:
/// * `T ≤ 0`: undiscounted intrinsic value `max(φ(S − K), 0)`;
/// * `σ ≤ 0`: discounted forward intrinsic `max(φ(S e^{-qT} − K e^{-rT}), 0)`.
pub fn black_scholes_price(
    option_type: OptionType,
    contract: &ContractSpec,
    market: &MarketEnvironment,
) -> Price {
    let t = contract.maturity;
    if t <= 0.0 {
        return option_type.intrinsic(contract.spot, contract.strike);
    }

    let spot_pv = contract.spot * market.dividend_discount(t);
    let strike_pv = contract.strike * market.discount(t);

    if contract.volatility <= 0.0 {
        return option_type.intrinsic(spot_pv, strike_pv);
    }

    let (d1, d2) = d1_d2(contract, market);
    match option_type {
        OptionType::Call => spot_pv * normal_cdf(d1) - strike_pv * normal_cdf(d2),
        OptionType::Put => strike_pv * normal_cdf(-d2) - spot_pv * normal_cdf(-d1),
    }
}

/// Black-Scholes-Merton vega `S e^{-qT} φ(d1) √T`, per 1.0 absolute vol.
///
/// Identical for calls and puts. Zero when `T ≤ 0` or `σ ≤ 0`.
pub fn black_scholes_vega(contract: &ContractSpec, market: &MarketEnvironment) -> Real {
    let t = contract.maturity;
    if t <= 0.0 || contract.volatility <= 0.0 {
        return 0.0;
    }
    let (d1, _) = d1_d2(contract, market);
    contract.spot * market.dividend_discount(t) * normal_pdf(d1) * t.sqrt()
}

/// Price range reachable by the model over all volatilities.
///
/// Returns `(lower, upper)`: the `σ → 0` discounted intrinsic and the
/// `σ → ∞` limit, `S e^{-qT}` for a call and `K e^{-rT}` for a put.
pub fn no_arbitrage_bounds(
    option_type: OptionType,
    quote: &QuoteSpec,
    market: &MarketEnvironment,
) -> (Price, Price) {
    let spot_pv = quote.spot * market.dividend_discount(quote.maturity);
    let strike_pv = quote.strike * market.discount(quote.maturity);
    let lower = option_type.intrinsic(spot_pv, strike_pv);
    let upper = match option_type {
        OptionType::Call => spot_pv,
        OptionType::Put => strike_pv,
    };
    (lower, upper)
}
