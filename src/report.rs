use crate::config::OutputFormat;
use crate::errors::CalcResult;
use crate::input::SolveRequest;
use crate::state::{OptionType, Solution};
use serde::Serialize;

/// JSON shape of one solve.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub option_type: OptionType,
    pub spot: f64,
    pub strike: f64,
    pub ttl_years: f64,
    pub rate: f64,
    pub market_price: f64,
    pub implied_volatility_pct: f64,
    pub iterations: u32,
    pub converged: bool,
    pub price_error: f64,
}

impl Report {
    pub fn new(request: &SolveRequest, solution: &Solution) -> Self {
        Self {
            option_type: request.spec.option_type,
            spot: request.spec.spot,
            strike: request.spec.strike,
            ttl_years: request.spec.ttl_years,
            rate: request.spec.rate,
            market_price: request.market_price,
            implied_volatility_pct: solution.percent(),
            iterations: solution.iterations,
            converged: solution.converged,
            price_error: solution.price_error,
        }
    }
}

/// Render the result line. Text output prints the raw float, unrounded.
pub fn render(format: OutputFormat, request: &SolveRequest, solution: &Solution) -> CalcResult<String> {
    match format {
        OutputFormat::Text => Ok(format!("Implied Volatility: {}%", solution.percent())),
        OutputFormat::Json => Ok(serde_json::to_string(&Report::new(request, solution))?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::OptionSpec;

    fn fixture() -> (SolveRequest, Solution) {
        let request = SolveRequest {
            spec: OptionSpec {
                option_type: OptionType::Call,
                spot: 100.0,
                strike: 100.0,
                ttl_years: 0.5,
                rate: 0.05,
            },
            market_price: 6.8887,
        };
        let solution = Solution { sigma: 0.25, iterations: 3, converged: true, price_error: 0.0 };
        (request, solution)
    }

    #[test]
    fn test_text_line() {
        let (req, sol) = fixture();
        assert_eq!(render(OutputFormat::Text, &req, &sol).unwrap(), "Implied Volatility: 25%");
    }

    #[test]
    fn test_text_is_not_rounded() {
        let (req, _) = fixture();
        let sol = Solution { sigma: 0.200000002127, iterations: 2, converged: true, price_error: 0.0 };
        let line = render(OutputFormat::Text, &req, &sol).unwrap();
        assert_eq!(line, format!("Implied Volatility: {}%", 0.200000002127 * 100.0));
    }

    #[test]
    fn test_json_fields() {
        let (req, sol) = fixture();
        let json = render(OutputFormat::Json, &req, &sol).unwrap();
        let v: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(v["option_type"], "call");
        assert_eq!(v["implied_volatility_pct"], 25.0);
        assert_eq!(v["iterations"], 3);
        assert_eq!(v["converged"], true);
        assert_eq!(v["market_price"], 6.8887);
    }
}
