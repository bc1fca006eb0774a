use crate::errors::{CalcError, CalcResult};
use crate::state::{OptionSpec, OptionType};
use chrono::NaiveDate;
use std::io::{BufRead, Write};

/// Maturities above this many years are read as days.
const MAX_YEARS_INPUT: f64 = 1.0;
const DAYS_PER_YEAR: f64 = 365.0;

/// Everything the user typed, validated and converted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolveRequest {
    pub spec: OptionSpec,
    pub market_price: f64,
}

// ── Field parsers (pure) ──

/// Accept `,` as a decimal separator.
#[inline]
pub fn normalize_decimal(raw: &str) -> String {
    raw.trim().replace(',', ".")
}

/// Parse a finite number, naming the field on failure.
pub fn parse_number(field: &str, raw: &str) -> CalcResult<f64> {
    let text = normalize_decimal(raw);
    let value = text
        .parse::<f64>()
        .map_err(|_| CalcError::Parse(format!("{field}: '{text}' is not a number")))?;
    if !value.is_finite() {
        return Err(CalcError::Parse(format!("{field}: must be finite")));
    }
    Ok(value)
}

pub fn parse_positive(field: &str, raw: &str) -> CalcResult<f64> {
    let value = parse_number(field, raw)?;
    if value <= 0.0 {
        return Err(CalcError::InvalidInput(format!("{field} must be positive, got {value}")));
    }
    Ok(value)
}

/// Time to maturity in years.
///
/// `t <= 1` is years, `t > 1` is days (`t / 365`). An ISO date (`YYYY-MM-DD`)
/// is an expiry date measured from `today`.
pub fn parse_maturity(raw: &str, today: NaiveDate) -> CalcResult<f64> {
    let text = normalize_decimal(raw);

    if let Ok(expiry) = NaiveDate::parse_from_str(&text, "%Y-%m-%d") {
        let days = (expiry - today).num_days();
        if days <= 0 {
            return Err(CalcError::InvalidInput(format!(
                "expiry {expiry} is not after today ({today})"
            )));
        }
        return Ok(days as f64 / DAYS_PER_YEAR);
    }

    let t = parse_positive("time to maturity", &text)?;
    if t > MAX_YEARS_INPUT {
        Ok(t / DAYS_PER_YEAR)
    } else {
        Ok(t)
    }
}

/// Risk-free rate as a fraction. `5%` and `0.05` are the same rate.
pub fn parse_rate(raw: &str) -> CalcResult<f64> {
    let text = normalize_decimal(raw);
    if text.contains('%') {
        Ok(parse_number("risk-free rate", &text.replace('%', ""))? / 100.0)
    } else {
        parse_number("risk-free rate", &text)
    }
}

// ── Interactive prompt loop ──

/// Asks for each field in turn. Any invalid field prints its error and
/// starts over from the first prompt.
pub struct Prompter<R, W> {
    reader: R,
    writer: W,
    today: NaiveDate,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(reader: R, writer: W, today: NaiveDate) -> Self {
        Self { reader, writer, today }
    }

    /// Prompt until a full valid request is read. Only I/O failures
    /// (including end of input) escape.
    pub fn read_request(&mut self) -> CalcResult<SolveRequest> {
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            match self.try_read_request() {
                Ok(request) => return Ok(request),
                Err(e) if e.is_input_error() => {
                    tracing::debug!(attempt, "invalid input: {e}");
                    writeln!(self.writer, "{e}")?;
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn try_read_request(&mut self) -> CalcResult<SolveRequest> {
        let option_type = OptionType::from_code(
            &self.ask("Option type - type 'c' for call option or 'p' for put option: ")?,
        )?;
        let spot = parse_positive("stock price", &self.ask("Current stock price: ")?)?;
        let strike = parse_positive("strike price", &self.ask("Strike price: ")?)?;
        let ttl_years = parse_maturity(&self.ask("Time to maturity (in years): ")?, self.today)?;
        let rate = parse_rate(&self.ask("Risk-free interest rate: ")?)?;
        let market_price =
            parse_positive("market price", &self.ask("Market price of the option: ")?)?;

        Ok(SolveRequest {
            spec: OptionSpec {
                option_type,
                spot,
                strike,
                ttl_years,
                rate,
            },
            market_price,
        })
    }

    fn ask(&mut self, prompt: &str) -> CalcResult<String> {
        write!(self.writer, "{prompt}")?;
        self.writer.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(CalcError::Io("unexpected end of input".into()));
        }
        Ok(line.trim().to_string())
    }

    pub fn into_writer(self) -> W {
        self.writer
    }
}
