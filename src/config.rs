use crate::errors::{CalcError, CalcResult};

/// Default convergence threshold on both sigma and price.
pub const DEFAULT_TOLERANCE: f64 = 1e-5;
/// Hard cap on Newton iterations.
pub const DEFAULT_MAX_ITERATIONS: u32 = 1000;
/// Starting volatility (30%).
pub const DEFAULT_INITIAL_GUESS: f64 = 0.3;

/// Solver knobs, passed explicitly into every solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    pub tolerance: f64,
    pub max_iterations: u32,
    pub initial_guess: f64,
    /// Report cap exhaustion as an error instead of returning the last guess.
    pub strict: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            initial_guess: DEFAULT_INITIAL_GUESS,
            strict: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub solver: SolverConfig,
    pub output: OutputFormat,
}

impl AppConfig {
    pub fn from_env() -> CalcResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> CalcResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let tolerance = var_or("IV_TOLERANCE", "0.00001")
            .trim()
            .parse::<f64>()
            .map_err(|e| CalcError::Config(format!("IV_TOLERANCE: {e}")))?;
        if !tolerance.is_finite() || tolerance <= 0.0 {
            return Err(CalcError::Config(format!(
                "IV_TOLERANCE: must be a positive number, got {tolerance}"
            )));
        }

        let max_iterations = var_or("IV_MAX_ITERATIONS", "1000")
            .trim()
            .parse::<u32>()
            .map_err(|e| CalcError::Config(format!("IV_MAX_ITERATIONS: {e}")))?;

        let initial_guess = var_or("IV_INITIAL_GUESS", "0.3")
            .trim()
            .parse::<f64>()
            .map_err(|e| CalcError::Config(format!("IV_INITIAL_GUESS: {e}")))?;
        if !initial_guess.is_finite() {
            return Err(CalcError::Config("IV_INITIAL_GUESS: must be finite".into()));
        }

        let strict = parse_bool(&var_or("IV_STRICT", "false"))
            .ok_or_else(|| CalcError::Config("IV_STRICT: expected true/false".into()))?;

        let output = match var_or("IV_OUTPUT", "text").trim().to_lowercase().as_str() {
            "text" => OutputFormat::Text,
            "json" => OutputFormat::Json,
            other => {
                return Err(CalcError::Config(format!(
                    "IV_OUTPUT: expected 'text' or 'json', got '{other}'"
                )))
            }
        };

        Ok(Self {
            solver: SolverConfig {
                tolerance,
                max_iterations,
                initial_guess,
                strict,
            },
            output,
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let cfg = AppConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(cfg.solver, SolverConfig::default());
        assert_eq!(cfg.output, OutputFormat::Text);
        assert_eq!(cfg.solver.max_iterations, 1000);
        assert!((cfg.solver.tolerance - 1e-5).abs() < 1e-15);
        assert!((cfg.solver.initial_guess - 0.3).abs() < 1e-15);
    }

    #[test]
    fn test_overrides() {
        let cfg = AppConfig::from_lookup(lookup_from(&[
            ("IV_TOLERANCE", "1e-8"),
            ("IV_MAX_ITERATIONS", "50"),
            ("IV_INITIAL_GUESS", "0.5"),
            ("IV_STRICT", "yes"),
            ("IV_OUTPUT", "JSON"),
        ]))
        .unwrap();
        assert_eq!(cfg.solver.max_iterations, 50);
        assert!(cfg.solver.strict);
        assert_eq!(cfg.output, OutputFormat::Json);
        assert!((cfg.solver.initial_guess - 0.5).abs() < 1e-15);
    }

    #[test]
    fn test_rejects_bad_values() {
        for (key, value) in [
            ("IV_TOLERANCE", "0"),
            ("IV_TOLERANCE", "abc"),
            ("IV_MAX_ITERATIONS", "-1"),
            ("IV_INITIAL_GUESS", "inf"),
            ("IV_STRICT", "maybe"),
            ("IV_OUTPUT", "xml"),
        ] {
            let err = AppConfig::from_lookup(lookup_from(&[(key, value)])).unwrap_err();
            assert!(
                matches!(&err, CalcError::Config(msg) if msg.starts_with(key)),
                "{key}={value} gave {err}"
            );
        }
    }
}
