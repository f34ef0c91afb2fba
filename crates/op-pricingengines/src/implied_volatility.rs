//! Implied-volatility inversion for both pricing models.
//!
//! Two solvers share the bisection core but differ in how much they check
//! before searching:
//!
//! | | [`implied_volatility_lattice`] | [`implied_volatility_black_scholes`] |
//! |---|---|---|
//! | input validation | settings and market price finiteness | all inputs finite, `S, K, T > 0` |
//! | no-arbitrage bounds | none | [`Error::OutOfBounds`] |
//! | bracket | `[lo, hi]` as given | `hi` expanded ×1.5 up to 20 times, else [`Error::NoBracket`] |
//! | stopping rule | `|price − market| < tol` | same, or bracket width `< tol` |
//! | finish | midpoint | midpoint with one vega Newton polish |
//!
//! Both assume the price is increasing in volatility, which holds for
//! vanilla calls and puts under either model. Exhausting the iteration
//! budget is not an error: the last estimate is returned with
//! [`ImpliedVolatility::converged`] set to `false`.

use op_core::{
    ensure, errors::Error, fail, MarketEnvironment, OptionType, Price, QuoteSpec, Real, Result,
    Size, Volatility,
};
use op_math::solvers1d::{
    newton_polish, SearchBracket, DEFAULT_EXPANSION_FACTOR, DEFAULT_MAX_EXPANSIONS,
};

use crate::analytic_european_engine::{
    black_scholes_price, black_scholes_vega, no_arbitrage_bounds,
};
use crate::binomial_engine::binomial_american_price;
use crate::solver_settings::SolverSettings;

/// Slack on the no-arbitrage bounds.
pub const BOUND_TOLERANCE: Real = 1e-12;

/// Vega below which the Newton polish is skipped.
const MIN_POLISH_VEGA: Real = 1e-12;

/// Polished volatilities at or above this are discarded.
const MAX_POLISHED_VOLATILITY: Volatility = 10.0;

/// Outcome of an implied-volatility search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpliedVolatility {
    /// The volatility estimate.
    pub value: Volatility,
    /// Bisection iterations used.
    pub iterations: Size,
    /// `false` when the iteration budget ran out and `value` is a
    /// best-effort midpoint.
    pub converged: bool,
}

impl ImpliedVolatility {
    fn converged(value: Volatility, iterations: Size) -> Self {
        Self {
            value,
            iterations,
            converged: true,
        }
    }

    fn exhausted(value: Volatility, iterations: Size) -> Self {
        tracing::warn!(
            sigma = value,
            iterations,
            "implied volatility did not converge, returning best estimate"
        );
        Self {
            value,
            iterations,
            converged: false,
        }
    }
}

/// Implied volatility under the American CRR lattice, by plain bisection.
///
/// Each iteration prices the lattice at the midpoint of `[lo, hi]` and
/// returns it once the price is within `tolerance` of `market_price`;
/// otherwise the half whose price overshoots is discarded.
///
/// No bound or bracket check is made, so a market price the lattice cannot
/// reach drives the search to one end of `[lo, hi]` and comes back
/// unconverged. Callers needing that diagnosed should screen prices with
/// [`no_arbitrage_bounds`] first.
///
/// # Errors
/// * [`Error::InvalidInput`] for unusable settings, a non-finite market
///   price, or lattice inputs rejected by the forward pricer.
/// * [`Error::ArbitrageViolation`] if a trial volatility makes the lattice
///   probability leave `[0, 1]`.
pub fn implied_volatility_lattice(
    option_type: OptionType,
    market_price: Price,
    quote: &QuoteSpec,
    market: &MarketEnvironment,
    steps: Size,
    settings: &SolverSettings,
) -> Result<ImpliedVolatility> {
    settings.validate()?;
    ensure!(
        market_price.is_finite(),
        "market price must be finite, got {market_price}"
    );

    let mut bracket = SearchBracket::unchecked(settings.lo, settings.hi);
    let mut mid = bracket.midpoint();
    for iteration in 1..=settings.max_iterations {
        mid = bracket.midpoint();
        let price =
            binomial_american_price(option_type, &quote.with_volatility(mid), market, steps)?;
        if !price.is_finite() {
            fail!("lattice price is not finite at sigma = {mid}");
        }
        tracing::trace!(iteration, sigma = mid, price, "lattice bisection");

        if (price - market_price).abs() < settings.tolerance {
            tracing::debug!(sigma = mid, iteration, "lattice implied volatility found");
            return Ok(ImpliedVolatility::converged(mid, iteration));
        }
        if price > market_price {
            bracket.keep_lower(mid);
        } else {
            bracket.keep_upper(mid);
        }
    }
    Ok(ImpliedVolatility::exhausted(mid, settings.max_iterations))
}

/// Implied volatility under Black-Scholes-Merton: bounded bisection with a
/// final Newton polish.
///
/// 1. Rejects non-finite inputs and non-positive `S`, `K`, `T`.
/// 2. Rejects prices outside [`no_arbitrage_bounds`] (± [`BOUND_TOLERANCE`]);
///    a price at the lower bound returns `lo` straight away.
/// 3. Expands `hi` until the price error changes sign.
/// 4. Bisects; once the error or the bracket width drops below `tolerance`
///    one vega-based Newton step is tried and kept if it stays in `(0, 10)`.
///
/// # Errors
/// [`Error::InvalidInput`], [`Error::OutOfBounds`] or [`Error::NoBracket`].
pub fn implied_volatility_black_scholes(
    option_type: OptionType,
    market_price: Price,
    quote: &QuoteSpec,
    market: &MarketEnvironment,
    settings: &SolverSettings,
) -> Result<ImpliedVolatility> {
    settings.validate()?;
    ensure!(
        market_price.is_finite() && quote.is_finite() && market.is_finite(),
        "inputs must be finite: price {market_price}, {quote:?}, {market:?}"
    );
    ensure!(
        quote.spot > 0.0 && quote.strike > 0.0 && quote.maturity > 0.0,
        "spot, strike and maturity must be positive: {quote:?}"
    );

    let (lower, upper) = no_arbitrage_bounds(option_type, quote, market);
    if market_price < lower - BOUND_TOLERANCE || market_price > upper + BOUND_TOLERANCE {
        return Err(Error::OutOfBounds {
            price: market_price,
            lower,
            upper,
        });
    }
    if (market_price - lower).abs() < BOUND_TOLERANCE {
        tracing::debug!(lower, "market price at zero-volatility bound");
        return Ok(ImpliedVolatility::converged(settings.lo, 0));
    }

    let objective = |sigma: Volatility| {
        black_scholes_price(option_type, &quote.with_volatility(sigma), market) - market_price
    };

    let mut bracket = SearchBracket::evaluate(&objective, settings.lo, settings.hi);
    if bracket
        .expand_upper(&objective, DEFAULT_EXPANSION_FACTOR, DEFAULT_MAX_EXPANSIONS)
        .is_none()
    {
        return Err(Error::NoBracket {
            lo: bracket.lo(),
            hi: bracket.hi(),
        });
    }

    for iteration in 1..=settings.max_iterations {
        let mid = bracket.midpoint();
        let error = objective(mid);
        tracing::trace!(iteration, sigma = mid, error, "black-scholes bisection");

        if error.abs() < settings.tolerance || bracket.width() < settings.tolerance {
            let vega = black_scholes_vega(&quote.with_volatility(mid), market);
            let sigma = newton_polish(
                mid,
                error,
                vega,
                MIN_POLISH_VEGA,
                0.0,
                MAX_POLISHED_VOLATILITY,
            )
            .unwrap_or(mid);
            tracing::debug!(sigma, iteration, "black-scholes implied volatility found");
            return Ok(ImpliedVolatility::converged(sigma, iteration));
        }
        bracket.narrow(mid, error);
    }
    Ok(ImpliedVolatility::exhausted(
        bracket.midpoint(),
        settings.max_iterations,
    ))
}
