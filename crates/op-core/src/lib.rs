//! # op-core
//!
//! Core types, traits, and error definitions for optionpricer.
//!
//! This crate provides the building blocks shared across the workspace:
//! type aliases, the error enum and its `ensure!` / `fail!` macros, the
//! call/put [`OptionType`], and the per-call input records
//! ([`ContractSpec`], [`QuoteSpec`], [`MarketEnvironment`]).

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Public modules ───────────────────────────────────────────────────────────

/// Per-call contract and market input records.
pub mod contract;

/// Error types and the `ensure!` / `fail!` macros.
pub mod errors;

/// Call/put option type.
pub mod option_type;

// ── Primitive type aliases ────────────────────────────────────────────────────

/// Floating-point type used throughout the library.
pub type Real = f64;

/// Alias used for step counts / indices.
pub type Size = usize;

/// A continuously compounded rate expressed as a decimal (e.g. 0.05 = 5 %).
pub type Rate = Real;

/// A price or value.
pub type Price = Real;

/// A volatility level expressed as a decimal.
pub type Volatility = Real;

/// A time measurement in years.
pub type Time = Real;

// ── Re-exports for convenience ────────────────────────────────────────────────

pub use contract::{ContractSpec, MarketEnvironment, QuoteSpec};
pub use errors::{Error, Result};
pub use option_type::OptionType;
