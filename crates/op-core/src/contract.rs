//! Per-call input records.
//!
//! None of these are standing objects: each pricing or inversion call
//! receives them by value and nothing is retained afterwards.

use crate::{Rate, Real, Time, Volatility};

/// Contract terms of a single vanilla option, without a volatility.
///
/// This is what an implied-volatility query knows about the contract.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuoteSpec {
    /// Spot price of the underlying `S`.
    pub spot: Real,
    /// Strike `K`.
    pub strike: Real,
    /// Time to maturity `T` in years.
    pub maturity: Time,
}

impl QuoteSpec {
    /// Create a new quote specification.
    pub fn new(spot: Real, strike: Real, maturity: Time) -> Self {
        Self {
            spot,
            strike,
            maturity,
        }
    }

    /// Attach a volatility, producing a priceable contract.
    pub fn with_volatility(self, volatility: Volatility) -> ContractSpec {
        ContractSpec {
            spot: self.spot,
            strike: self.strike,
            maturity: self.maturity,
            volatility,
        }
    }

    /// `true` if every field is finite.
    pub fn is_finite(&self) -> bool {
        self.spot.is_finite() && self.strike.is_finite() && self.maturity.is_finite()
    }
}

/// Contract terms plus the volatility to price at.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContractSpec {
    /// Spot price of the underlying `S`.
    pub spot: Real,
    /// Strike `K`.
    pub strike: Real,
    /// Time to maturity `T` in years.
    pub maturity: Time,
    /// Volatility `σ` as a decimal.
    pub volatility: Volatility,
}

impl ContractSpec {
    /// Create a new contract specification.
    pub fn new(spot: Real, strike: Real, maturity: Time, volatility: Volatility) -> Self {
        Self {
            spot,
            strike,
            maturity,
            volatility,
        }
    }

    /// The same contract at a different volatility.
    pub fn with_volatility(self, volatility: Volatility) -> Self {
        Self { volatility, ..self }
    }

    /// Drop the volatility.
    pub fn quote(&self) -> QuoteSpec {
        QuoteSpec::new(self.spot, self.strike, self.maturity)
    }
}

/// Flat rate environment: risk-free rate `r` and dividend/carry yield `q`,
/// both continuously compounded.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarketEnvironment {
    /// Risk-free rate `r`.
    pub rate: Rate,
    /// Dividend or carry yield `q`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub dividend_yield: Rate,
}

impl MarketEnvironment {
    /// Create a new environment.
    pub fn new(rate: Rate, dividend_yield: Rate) -> Self {
        Self {
            rate,
            dividend_yield,
        }
    }

    /// Discount factor `e^(−rT)`.
    #[inline]
    pub fn discount(&self, t: Time) -> Real {
        (-self.rate * t).exp()
    }

    /// Dividend discount factor `e^(−qT)`.
    #[inline]
    pub fn dividend_discount(&self, t: Time) -> Real {
        (-self.dividend_yield * t).exp()
    }

    /// `true` if both rates are finite.
    pub fn is_finite(&self) -> bool {
        self.rate.is_finite() && self.dividend_yield.is_finite()
    }
}
