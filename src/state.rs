use crate::errors::{CalcError, CalcResult};
use serde::Serialize;

// ── Option contract ──

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    Call,
    Put,
}

impl OptionType {
    /// Parse the interactive code: `c` for call, `p` for put (case-insensitive).
    pub fn from_code(raw: &str) -> CalcResult<Self> {
        match raw.trim().to_lowercase().as_str() {
            "c" => Ok(OptionType::Call),
            "p" => Ok(OptionType::Put),
            _ => Err(CalcError::InvalidOptionType(
                "Please input 'c' for call option or 'p' for put option".into(),
            )),
        }
    }

    /// Payoff direction: +1 for call, -1 for put
    #[inline]
    pub fn phi(&self) -> f64 {
        match self {
            OptionType::Call => 1.0,
            OptionType::Put => -1.0,
        }
    }
}

/// European option being solved. Immutable for one solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptionSpec {
    pub option_type: OptionType,
    pub spot: f64,
    pub strike: f64,
    pub ttl_years: f64,
    pub rate: f64,
}

// ── Precomputed pricing parameters ──

/// One (spec, sigma) evaluation point with the shared Black-Scholes terms
/// precomputed so price and vega agree on d1/d2.
#[derive(Debug, Clone, Copy)]
pub struct PricingInputs {
    pub spot: f64,
    pub strike: f64,
    pub sigma: f64,
    // Precomputed
    pub sqrt_t: f64,
    pub sigma_sqrt_t: f64,
    pub discount: f64,
    pub d1: f64,
    pub d2: f64,
}

impl PricingInputs {
    #[inline]
    pub fn new(spec: &OptionSpec, sigma: f64) -> Self {
        let sqrt_t = spec.ttl_years.sqrt();
        let sigma_sqrt_t = sigma * sqrt_t;
        let discount = (-spec.rate * spec.ttl_years).exp();
        let ln_s_k = (spec.spot / spec.strike).ln();
        let d1 = (ln_s_k + (spec.rate + 0.5 * sigma * sigma) * spec.ttl_years) / sigma_sqrt_t;
        let d2 = d1 - sigma_sqrt_t;
        Self {
            spot: spec.spot,
            strike: spec.strike,
            sigma,
            sqrt_t,
            sigma_sqrt_t,
            discount,
            d1,
            d2,
        }
    }

    /// No diffusion left: zero/negative vol or vanishing horizon.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.sigma <= 0.0 || self.sigma_sqrt_t < 1e-12 || !self.d1.is_finite()
    }
}

// ── Solver output ──

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Solution {
    /// Implied volatility as a fraction (0.2 = 20%)
    pub sigma: f64,
    pub iterations: u32,
    pub converged: bool,
    /// Model price at `sigma` minus market price
    pub price_error: f64,
}

impl Solution {
    /// Implied volatility in percent, the conventional reporting unit.
    #[inline]
    pub fn percent(&self) -> f64 {
        self.sigma * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_type_codes() {
        assert_eq!(OptionType::from_code("c").unwrap(), OptionType::Call);
        assert_eq!(OptionType::from_code(" P \n").unwrap(), OptionType::Put);
        assert!(matches!(
            OptionType::from_code("x"),
            Err(CalcError::InvalidOptionType(_))
        ));
        assert!(OptionType::from_code("call").is_err());
    }

    #[test]
    fn test_pricing_inputs_atm() {
        let spec = OptionSpec {
            option_type: OptionType::Call,
            spot: 100.0,
            strike: 100.0,
            ttl_years: 0.25,
            rate: 0.0,
        };
        let p = PricingInputs::new(&spec, 0.2);
        assert!((p.sqrt_t - 0.5).abs() < 1e-12);
        assert!((p.sigma_sqrt_t - 0.1).abs() < 1e-12);
        // ln(S/K)=0, r=0 -> d1 = sigma*sqrt(t)/2
        assert!((p.d1 - 0.05).abs() < 1e-12, "d1={}", p.d1);
        assert!((p.d2 + 0.05).abs() < 1e-12, "d2={}", p.d2);
        assert!(!p.is_degenerate());
    }

    #[test]
    fn test_zero_and_negative_vol_are_degenerate() {
        let spec = OptionSpec {
            option_type: OptionType::Put,
            spot: 100.0,
            strike: 90.0,
            ttl_years: 1.0,
            rate: 0.01,
        };
        assert!(PricingInputs::new(&spec, 0.0).is_degenerate());
        assert!(PricingInputs::new(&spec, -0.1).is_degenerate());
    }

    #[test]
    fn test_percent() {
        let s = Solution { sigma: 0.2, iterations: 4, converged: true, price_error: 0.0 };
        assert!((s.percent() - 20.0).abs() < 1e-12);
    }
}
