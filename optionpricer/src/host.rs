//! Flat, positional entry points for a host-language binding.
//!
//! Argument order and defaults follow the two extension modules a binding
//! would register, `binomial` and `blackscholes`. Every function only
//! assembles the input records and delegates; a binding layer adds its own
//! marshalling and maps [`Error`](crate::Error) to the host's exception type.

/// CRR lattice, American exercise.
pub mod binomial {
    use op_core::{ContractSpec, MarketEnvironment, OptionType, QuoteSpec, Real, Result, Size};
    use op_pricingengines::{binomial_american_price, implied_volatility_lattice, SolverSettings};

    /// American call price.
    pub fn call_price(
        s: Real,
        k: Real,
        t: Real,
        r: Real,
        q: Real,
        sigma: Real,
        steps: Size,
    ) -> Result<Real> {
        price(OptionType::Call, s, k, t, r, q, sigma, steps)
    }

    /// American put price.
    pub fn put_price(
        s: Real,
        k: Real,
        t: Real,
        r: Real,
        q: Real,
        sigma: Real,
        steps: Size,
    ) -> Result<Real> {
        price(OptionType::Put, s, k, t, r, q, sigma, steps)
    }

    /// Implied volatility of an American call; `None` settings mean
    /// `lo = 1e-8, hi = 5, tol = 1e-8, maxit = 100`.
    #[allow(clippy::too_many_arguments)]
    pub fn implied_vol_call(
        market_price: Real,
        s: Real,
        k: Real,
        t: Real,
        r: Real,
        q: Real,
        steps: Size,
        settings: Option<SolverSettings>,
    ) -> Result<Real> {
        implied_vol(OptionType::Call, market_price, s, k, t, r, q, steps, settings)
    }

    /// Implied volatility of an American put; defaults as for calls.
    #[allow(clippy::too_many_arguments)]
    pub fn implied_vol_put(
        market_price: Real,
        s: Real,
        k: Real,
        t: Real,
        r: Real,
        q: Real,
        steps: Size,
        settings: Option<SolverSettings>,
    ) -> Result<Real> {
        implied_vol(OptionType::Put, market_price, s, k, t, r, q, steps, settings)
    }

    #[allow(clippy::too_many_arguments)]
    fn price(
        option_type: OptionType,
        s: Real,
        k: Real,
        t: Real,
        r: Real,
        q: Real,
        sigma: Real,
        steps: Size,
    ) -> Result<Real> {
        binomial_american_price(
            option_type,
            &ContractSpec::new(s, k, t, sigma),
            &MarketEnvironment::new(r, q),
            steps,
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn implied_vol(
        option_type: OptionType,
        market_price: Real,
        s: Real,
        k: Real,
        t: Real,
        r: Real,
        q: Real,
        steps: Size,
        settings: Option<SolverSettings>,
    ) -> Result<Real> {
        implied_volatility_lattice(
            option_type,
            market_price,
            &QuoteSpec::new(s, k, t),
            &MarketEnvironment::new(r, q),
            steps,
            &settings.unwrap_or_else(SolverSettings::lattice),
        )
        .map(|iv| iv.value)
    }
}

/// Closed-form Black-Scholes-Merton, European exercise.
pub mod blackscholes {
    use op_core::{ContractSpec, MarketEnvironment, OptionType, QuoteSpec, Real, Result};
    use op_pricingengines::{black_scholes_price, implied_volatility_black_scholes, SolverSettings};

    /// Dividend yield assumed by hosts that omit `q`.
    pub const DEFAULT_DIVIDEND_YIELD: Real = 0.0;

    /// European call price.
    pub fn call_price(s: Real, k: Real, t: Real, r: Real, sigma: Real, q: Real) -> Real {
        black_scholes_price(
            OptionType::Call,
            &ContractSpec::new(s, k, t, sigma),
            &MarketEnvironment::new(r, q),
        )
    }

    /// European put price.
    pub fn put_price(s: Real, k: Real, t: Real, r: Real, sigma: Real, q: Real) -> Real {
        black_scholes_price(
            OptionType::Put,
            &ContractSpec::new(s, k, t, sigma),
            &MarketEnvironment::new(r, q),
        )
    }

    /// Implied volatility of a European call; `None` settings mean
    /// `lo = 1e-8, hi = 5, tol = 1e-8, maxit = 80`.
    pub fn implied_vol_call(
        market_price: Real,
        s: Real,
        k: Real,
        t: Real,
        r: Real,
        q: Real,
        settings: Option<SolverSettings>,
    ) -> Result<Real> {
        implied_vol(OptionType::Call, market_price, s, k, t, r, q, settings)
    }

    /// Implied volatility of a European put; defaults as for calls.
    pub fn implied_vol_put(
        market_price: Real,
        s: Real,
        k: Real,
        t: Real,
        r: Real,
        q: Real,
        settings: Option<SolverSettings>,
    ) -> Result<Real> {
        implied_vol(OptionType::Put, market_price, s, k, t, r, q, settings)
    }

    #[allow(clippy::too_many_arguments)]
    fn implied_vol(
        option_type: OptionType,
        market_price: Real,
        s: Real,
        k: Real,
        t: Real,
        r: Real,
        q: Real,
        settings: Option<SolverSettings>,
    ) -> Result<Real> {
        implied_volatility_black_scholes(
            option_type,
            market_price,
            &QuoteSpec::new(s, k, t),
            &MarketEnvironment::new(r, q),
            &settings.unwrap_or_else(SolverSettings::closed_form),
        )
        .map(|iv| iv.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_signatures_match_core() {
        let q = blackscholes::DEFAULT_DIVIDEND_YIELD;
        let c = blackscholes::call_price(100.0, 100.0, 1.0, 0.05, 0.2, q);
        let p = blackscholes::put_price(100.0, 100.0, 1.0, 0.05, 0.2, 0.0);
        assert!((c - 10.4506).abs() < 1e-4);
        assert!((p - 5.5735).abs() < 1e-4);

        let am = binomial::put_price(100.0, 100.0, 1.0, 0.05, 0.0, 0.2, 200).unwrap();
        assert!(am > p);
    }

    #[test]
    fn errors_instead_of_nan() {
        let iv = blackscholes::implied_vol_call(150.0, 100.0, 100.0, 1.0, 0.05, 0.0, None);
        assert!(iv.is_err());
        assert!(binomial::call_price(100.0, 100.0, 1.0, 0.5, 0.0, 0.01, 1).is_err());
    }
}
