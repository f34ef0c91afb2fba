//! Row-wise valuation of whole option chains.
//!
//! A failing row (bad inputs, unreachable price) yields an `Err` in its slot
//! and does not stop the others. With the `parallel` feature rows are spread
//! over the `rayon` thread pool; results are identical either way because
//! every row is independent.

use op_core::{ContractSpec, MarketEnvironment, OptionType, Price, QuoteSpec, Result};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::engine::PricingEngine;
use crate::implied_volatility::ImpliedVolatility;
use crate::solver_settings::SolverSettings;

/// One forward-pricing row.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PricingRequest {
    /// Call or put.
    pub option_type: OptionType,
    /// Contract terms and volatility.
    pub contract: ContractSpec,
    /// Rates.
    pub market: MarketEnvironment,
}

/// One implied-volatility row.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImpliedVolatilityRequest {
    /// Call or put.
    pub option_type: OptionType,
    /// Observed option price.
    pub market_price: Price,
    /// Contract terms.
    pub quote: QuoteSpec,
    /// Rates.
    pub market: MarketEnvironment,
}

/// Price every request with `engine`, keeping input order.
pub fn price_batch<E>(engine: &E, requests: &[PricingRequest]) -> Vec<Result<Price>>
where
    E: PricingEngine + ?Sized,
{
    let price_one = |r: &PricingRequest| engine.price(r.option_type, &r.contract, &r.market);

    #[cfg(feature = "parallel")]
    let prices = requests.par_iter().map(price_one).collect();
    #[cfg(not(feature = "parallel"))]
    let prices = requests.iter().map(price_one).collect();

    prices
}

/// Invert every request with `engine`, keeping input order.
///
/// `settings` of `None` uses the engine's own defaults.
pub fn implied_volatility_batch<E>(
    engine: &E,
    requests: &[ImpliedVolatilityRequest],
    settings: Option<&SolverSettings>,
) -> Vec<Result<ImpliedVolatility>>
where
    E: PricingEngine + ?Sized,
{
    let settings = settings
        .copied()
        .unwrap_or_else(|| engine.default_solver_settings());
    let invert_one = |r: &ImpliedVolatilityRequest| {
        engine.implied_volatility(r.option_type, r.market_price, &r.quote, &r.market, &settings)
    };

    #[cfg(feature = "parallel")]
    let results = requests.par_iter().map(invert_one).collect();
    #[cfg(not(feature = "parallel"))]
    let results = requests.iter().map(invert_one).collect();

    tracing::debug!(rows = requests.len(), "implied volatility batch done");
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::PricingModel;
    use approx::assert_abs_diff_eq;
    use op_core::Error;

    fn chain() -> Vec<PricingRequest> {
        let market = MarketEnvironment::new(0.04, 0.0);
        [80.0, 90.0, 100.0, 110.0, 120.0]
            .into_iter()
            .flat_map(|strike| {
                [OptionType::Call, OptionType::Put].map(|option_type| PricingRequest {
                    option_type,
                    contract: ContractSpec::new(100.0, strike, 0.5, 0.25),
                    market,
                })
            })
            .collect()
    }

    #[test]
    fn batch_matches_single_calls() {
        let model = PricingModel::BinomialAmerican { steps: 100 };
        let requests = chain();
        let prices = price_batch(&model, &requests);
        assert_eq!(prices.len(), requests.len());
        for (r, p) in requests.iter().zip(&prices) {
            let single = model.price(r.option_type, &r.contract, &r.market).unwrap();
            assert_eq!(*p.as_ref().unwrap(), single);
        }
    }

    #[test]
    fn failing_rows_do_not_stop_the_chain() {
        let mut requests = chain();
        requests[3].contract.spot = -1.0;
        let prices = price_batch(&PricingModel::BinomialAmerican { steps: 50 }, &requests);
        assert!(matches!(prices[3], Err(Error::InvalidInput(_))));
        assert!(prices.iter().enumerate().all(|(i, p)| i == 3 || p.is_ok()));
    }

    #[test]
    fn implied_vol_batch_round_trips() {
        let model = PricingModel::BlackScholes;
        let requests: Vec<_> = chain()
            .into_iter()
            .map(|r| ImpliedVolatilityRequest {
                option_type: r.option_type,
                market_price: model.price(r.option_type, &r.contract, &r.market).unwrap(),
                quote: r.contract.quote(),
                market: r.market,
            })
            .chain(std::iter::once(ImpliedVolatilityRequest {
                option_type: OptionType::Call,
                market_price: 250.0,
                quote: QuoteSpec::new(100.0, 100.0, 0.5),
                market: MarketEnvironment::new(0.04, 0.0),
            }))
            .collect();

        let vols = implied_volatility_batch(&model, &requests, None);
        let (last, rows) = vols.split_last().unwrap();
        for v in rows {
            assert_abs_diff_eq!(v.as_ref().unwrap().value, 0.25, epsilon = 1e-6);
        }
        assert!(matches!(last, Err(Error::OutOfBounds { .. })));
    }
}
