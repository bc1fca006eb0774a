mod config;
mod errors;
mod input;
mod models;
mod report;
mod solver;
mod state;

use crate::errors::CalcResult;
use crate::input::Prompter;
use crate::models::black_scholes::BlackScholes;
use std::io::Write;

fn main() {
    // Structured logging on stderr so it never interleaves with prompts on stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

fn run() -> CalcResult<()> {
    let cfg = config::AppConfig::from_env()?;
    tracing::debug!(?cfg, "config loaded");

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let today = chrono::Local::now().date_naive();

    let mut prompter = Prompter::new(stdin.lock(), stdout.lock(), today);
    let request = prompter.read_request()?;
    let mut out = prompter.into_writer();

    let model = BlackScholes::new();
    let solution = solver::solve(&model, &request.spec, request.market_price, &cfg.solver)?;

    writeln!(out, "{}", report::render(cfg.output, &request, &solution)?)?;
    out.flush()?;
    Ok(())
}
