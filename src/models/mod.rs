pub mod black_scholes;

use crate::state::OptionSpec;

/// Pricing oracle the solver inverts.
/// Both methods must be pure functions of their inputs: repeated solves rely on it.
pub trait PricingModel {
    fn name(&self) -> &'static str;

    /// Theoretical option price at volatility `sigma`.
    fn price(&self, spec: &OptionSpec, sigma: f64) -> f64;

    /// dPrice/dSigma per 1% volatility move (0.01 change in sigma).
    fn vega(&self, spec: &OptionSpec, sigma: f64) -> f64;
}
