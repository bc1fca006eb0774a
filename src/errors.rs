/// Domain-specific error types for the implied volatility calculator.
/// Input errors are recoverable (the prompt loop re-asks);
/// solver and config errors end the run.
#[derive(Debug, thiserror::Error)]
pub enum CalcError {
    #[error("parse error: {0}")]
    Parse(String),

    #[error("{0}")]
    InvalidOptionType(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(String),

    #[error("vega degenerate at iteration {iteration}: vega={vega}, sigma={sigma}")]
    DegenerateSensitivity { iteration: u32, vega: f64, sigma: f64 },

    #[error("non-finite value at iteration {iteration}: sigma={sigma}")]
    NonFinite { iteration: u32, sigma: f64 },

    #[error("no convergence after {iterations} iterations (last sigma={sigma})")]
    NonConvergent { iterations: u32, sigma: f64 },

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl CalcError {
    /// Errors the prompt loop can recover from by asking again.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            CalcError::Parse(_) | CalcError::InvalidOptionType(_) | CalcError::InvalidInput(_)
        )
    }
}

impl From<std::io::Error> for CalcError {
    fn from(e: std::io::Error) -> Self {
        CalcError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(e: serde_json::Error) -> Self {
        CalcError::Serialization(e.to_string())
    }
}

pub type CalcResult<T> = Result<T, CalcError>;
