use crate::config::SolverConfig;
use crate::errors::{CalcError, CalcResult};
use crate::models::PricingModel;
use crate::state::{OptionSpec, Solution};

/// Vega (per unit vol) below this is treated as zero.
const MIN_VEGA: f64 = 1e-12;

/// Newton-Raphson implied volatility.
///
/// sigma_{i+1} = sigma_i - (Price(sigma_i) - market) / Vega(sigma_i)
///
/// Stops when either the guess moves less than `tolerance` or the repriced
/// option lands within `tolerance` of the market price. Runs at most
/// `max_iterations` steps; hitting the cap returns the last guess unconverged
/// (or `NonConvergent` when `strict`). A vanishing vega or a non-finite step
/// is reported instead of propagating NaN.
pub fn solve(
    model: &dyn PricingModel,
    spec: &OptionSpec,
    market_price: f64,
    config: &SolverConfig,
) -> CalcResult<Solution> {
    let mut sigma = config.initial_guess;
    let mut price_error = model.price(spec, sigma) - market_price;

    for iteration in 0..config.max_iterations {
        let step = newton_step(model, spec, market_price, sigma, iteration)?;

        tracing::trace!(
            iteration,
            sigma,
            next = step.sigma,
            price_error = step.price_error,
            "newton step"
        );

        let converged = (sigma - step.sigma).abs() < config.tolerance
            || step.price_error.abs() < config.tolerance;
        sigma = step.sigma;
        price_error = step.price_error;

        if converged {
            return Ok(finish(
                model,
                Solution {
                    sigma,
                    iterations: iteration + 1,
                    converged: true,
                    price_error,
                },
            ));
        }
    }

    if config.strict {
        return Err(CalcError::NonConvergent {
            iterations: config.max_iterations,
            sigma,
        });
    }

    tracing::warn!(
        iterations = config.max_iterations,
        sigma,
        price_error,
        "implied volatility did not converge, returning last guess"
    );
    Ok(finish(
        model,
        Solution {
            sigma,
            iterations: config.max_iterations,
            converged: false,
            price_error,
        },
    ))
}

/// One iteration's outcome: the next guess and its repricing error.
#[derive(Debug, Clone, Copy)]
struct Step {
    sigma: f64,
    price_error: f64,
}

#[inline]
fn newton_step(
    model: &dyn PricingModel,
    spec: &OptionSpec,
    market_price: f64,
    sigma: f64,
    iteration: u32,
) -> CalcResult<Step> {
    let price = model.price(spec, sigma);
    // Vega is quoted per 1% move; scale to per unit of sigma
    let vega = model.vega(spec, sigma) * 100.0;

    if !vega.is_finite() || vega.abs() < MIN_VEGA {
        return Err(CalcError::DegenerateSensitivity {
            iteration,
            vega,
            sigma,
        });
    }

    let next = sigma - (price - market_price) / vega;
    let next_price = model.price(spec, next);

    if !next.is_finite() || !next_price.is_finite() {
        return Err(CalcError::NonFinite {
            iteration,
            sigma: next,
        });
    }

    Ok(Step {
        sigma: next,
        price_error: next_price - market_price,
    })
}

fn finish(model: &dyn PricingModel, solution: Solution) -> Solution {
    if solution.sigma < 0.0 {
        tracing::warn!(sigma = solution.sigma, "solver returned a negative volatility");
    }
    tracing::debug!(
        model = model.name(),
        sigma = solution.sigma,
        iterations = solution.iterations,
        converged = solution.converged,
        "solve finished"
    );
    solution
}
