use crate::models::PricingModel;
use crate::state::{OptionSpec, OptionType, PricingInputs};
use statrs::distribution::{Continuous, ContinuousCDF, Normal};

/// Black-Scholes European option pricing, no dividends.
///
/// call = S*N(d1) - K*e^(-rT)*N(d2)
/// put  = K*e^(-rT)*N(-d2) - S*N(-d1)
///
/// where d1 = (ln(S/K) + (r + sigma^2/2)*T) / (sigma * sqrt(T))
/// and d2 = d1 - sigma * sqrt(T).
pub struct BlackScholes {
    /// Standard normal distribution (created once, reused)
    normal: Normal,
}

impl BlackScholes {
    pub fn new() -> Self {
        Self {
            normal: Normal::standard(),
        }
    }
}

impl Default for BlackScholes {
    fn default() -> Self {
        Self::new()
    }
}

impl PricingModel for BlackScholes {
    #[inline]
    fn name(&self) -> &'static str {
        "Black-Scholes"
    }

    fn price(&self, spec: &OptionSpec, sigma: f64) -> f64 {
        let p = PricingInputs::new(spec, sigma);

        // No diffusion: discounted intrinsic on the forward
        if p.is_degenerate() {
            let forward = p.spot / p.discount;
            return p.discount * (spec.option_type.phi() * (forward - p.strike)).max(0.0);
        }

        match spec.option_type {
            OptionType::Call => {
                p.spot * self.normal.cdf(p.d1) - p.strike * p.discount * self.normal.cdf(p.d2)
            }
            OptionType::Put => {
                p.strike * p.discount * self.normal.cdf(-p.d2) - p.spot * self.normal.cdf(-p.d1)
            }
        }
    }

    /// Same for calls and puts. Quoted per 1% vol move.
    fn vega(&self, spec: &OptionSpec, sigma: f64) -> f64 {
        let p = PricingInputs::new(spec, sigma);
        if p.is_degenerate() {
            return 0.0;
        }
        p.spot * self.normal.pdf(p.d1) * p.sqrt_t * 0.01
    }
}
