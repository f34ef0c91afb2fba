//! # optionpricer
//!
//! Option valuation and implied-volatility inversion under two models: an
//! American Cox-Ross-Rubinstein binomial lattice and the closed-form
//! Black-Scholes-Merton formula.
//!
//! This crate is a **façade** that re-exports the workspace crates and adds
//! the [`host`] adapter with flat, positional signatures for embedding in a
//! foreign calling environment.
//!
//! ## Quick start
//!
//! ```rust
//! use optionpricer::core::{ContractSpec, MarketEnvironment, OptionType};
//! use optionpricer::pricingengines::{black_scholes_price, implied_volatility_black_scholes, SolverSettings};
//!
//! let contract = ContractSpec::new(100.0, 100.0, 1.0, 0.2);
//! let market = MarketEnvironment::new(0.05, 0.0);
//! let price = black_scholes_price(OptionType::Call, &contract, &market);
//! assert!((price - 10.4506).abs() < 1e-4);
//!
//! let iv = implied_volatility_black_scholes(
//!     OptionType::Call,
//!     price,
//!     &contract.quote(),
//!     &market,
//!     &SolverSettings::closed_form(),
//! )
//! .unwrap();
//! assert!((iv.value - 0.2).abs() < 1e-8);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Core types, input records, and error definitions.
pub use op_core as core;

/// Normal distribution and bracketing helpers.
pub use op_math as math;

/// CRR lattice and backward induction.
pub use op_methods as methods;

/// Pricing engines and implied-volatility solvers.
pub use op_pricingengines as pricingengines;

pub mod host;

pub use op_core::{Error, OptionType, Result};
