//! The pricing-engine seam shared by the lattice and closed-form models.

use op_core::{ContractSpec, MarketEnvironment, OptionType, Price, QuoteSpec, Result, Size};

use crate::analytic_european_engine::AnalyticEuropeanEngine;
use crate::binomial_engine::BinomialAmericanEngine;
use crate::implied_volatility::ImpliedVolatility;
use crate::solver_settings::SolverSettings;

/// A forward pricer together with its matching implied-volatility inversion.
///
/// Implementations are stateless apart from their configuration, so one
/// engine may be shared across threads.
pub trait PricingEngine: Send + Sync {
    /// Value of a call or put.
    fn price(
        &self,
        option_type: OptionType,
        contract: &ContractSpec,
        market: &MarketEnvironment,
    ) -> Result<Price>;

    /// Volatility at which [`price`](Self::price) reproduces `market_price`.
    fn implied_volatility(
        &self,
        option_type: OptionType,
        market_price: Price,
        quote: &QuoteSpec,
        market: &MarketEnvironment,
        settings: &SolverSettings,
    ) -> Result<ImpliedVolatility>;

    /// Solver settings used when the caller supplies none.
    fn default_solver_settings(&self) -> SolverSettings;
}

/// Model selector for callers that choose the pricer at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "model", rename_all = "snake_case"))]
pub enum PricingModel {
    /// Cox-Ross-Rubinstein lattice with early exercise.
    BinomialAmerican {
        /// Number of lattice steps.
        steps: Size,
    },
    /// Closed-form Black-Scholes-Merton (European exercise).
    BlackScholes,
}

impl PricingEngine for PricingModel {
    fn price(
        &self,
        option_type: OptionType,
        contract: &ContractSpec,
        market: &MarketEnvironment,
    ) -> Result<Price> {
        match *self {
            PricingModel::BinomialAmerican { steps } => {
                BinomialAmericanEngine::new(steps).price(option_type, contract, market)
            }
            PricingModel::BlackScholes => {
                AnalyticEuropeanEngine::new().price(option_type, contract, market)
            }
        }
    }

    fn implied_volatility(
        &self,
        option_type: OptionType,
        market_price: Price,
        quote: &QuoteSpec,
        market: &MarketEnvironment,
        settings: &SolverSettings,
    ) -> Result<ImpliedVolatility> {
        match *self {
            PricingModel::BinomialAmerican { steps } => BinomialAmericanEngine::new(steps)
                .implied_volatility(option_type, market_price, quote, market, settings),
            PricingModel::BlackScholes => AnalyticEuropeanEngine::new()
                .implied_volatility(option_type, market_price, quote, market, settings),
        }
    }

    fn default_solver_settings(&self) -> SolverSettings {
        match self {
            PricingModel::BinomialAmerican { .. } => SolverSettings::lattice(),
            PricingModel::BlackScholes => SolverSettings::closed_form(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_matches_engines() {
        let contract = ContractSpec::new(100.0, 100.0, 1.0, 0.2);
        let market = MarketEnvironment::new(0.05, 0.0);
        let lattice = PricingModel::BinomialAmerican { steps: 50 };
        assert_eq!(
            lattice.price(OptionType::Put, &contract, &market).unwrap(),
            BinomialAmericanEngine::new(50)
                .price(OptionType::Put, &contract, &market)
                .unwrap()
        );
        assert_eq!(lattice.default_solver_settings(), SolverSettings::lattice());
        assert_eq!(
            PricingModel::BlackScholes.default_solver_settings(),
            SolverSettings::closed_form()
        );
    }

    #[test]
    fn usable_as_trait_object() {
        let engines: Vec<Box<dyn PricingEngine>> = vec![
            Box::new(PricingModel::BlackScholes),
            Box::new(BinomialAmericanEngine::new(100)),
        ];
        let contract = ContractSpec::new(100.0, 100.0, 1.0, 0.2);
        let market = MarketEnvironment::new(0.05, 0.0);
        for engine in &engines {
            let price = engine.price(OptionType::Call, &contract, &market).unwrap();
            assert!((price - 10.45).abs() < 0.05, "price = {price}");
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn model_tagging() {
        let model: PricingModel =
            serde_json::from_str(r#"{"model":"binomial_american","steps":200}"#).unwrap();
        assert_eq!(model, PricingModel::BinomialAmerican { steps: 200 });
        let model: PricingModel = serde_json::from_str(r#"{"model":"black_scholes"}"#).unwrap();
        assert_eq!(model, PricingModel::BlackScholes);
    }
}
