//! # op-pricingengines
//!
//! Pricing engines for vanilla options and the implied-volatility solvers
//! that invert them.
//!
//! ## Engines
//!
//! - [`BinomialAmericanEngine`]: Cox-Ross-Rubinstein lattice with early exercise
//! - [`AnalyticEuropeanEngine`]: Black-Scholes-Merton closed form and vega
//!
//! Both implement [`PricingEngine`]; [`PricingModel`] selects one at runtime.
//! Batch helpers in [`batch`] value whole chains row by row.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod analytic_european_engine;
pub mod batch;
pub mod binomial_engine;
pub mod engine;
pub mod implied_volatility;
pub mod solver_settings;

pub use analytic_european_engine::{
    black_scholes_price, black_scholes_vega, no_arbitrage_bounds, AnalyticEuropeanEngine,
};
pub use batch::{implied_volatility_batch, price_batch, ImpliedVolatilityRequest, PricingRequest};
pub use binomial_engine::{binomial_american_price, BinomialAmericanEngine};
pub use engine::{PricingEngine, PricingModel};
pub use implied_volatility::{
    implied_volatility_black_scholes, implied_volatility_lattice, ImpliedVolatility,
};
pub use solver_settings::SolverSettings;
