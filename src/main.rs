//! Prscout CLI entrypoint: scans the configured repository list and appends
//! matches to the result file.

use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

use ortho_config::OrthoConfig;
use prscout::{
    CsvMatchSink, OctocrabGraphqlGateway, RetryingGateway, ScanAborted, ScanError, ScanReport,
    Scanner, ScoutConfig, StopReason, read_repository_urls,
};
use thiserror::Error;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Debug, Error)]
enum RunError {
    #[error(transparent)]
    Setup(#[from] ScanError),
    #[error(transparent)]
    Aborted(#[from] ScanAborted),
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    match run().await {
        Ok(report) => {
            if write_summary(&report).is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
        Err(RunError::Aborted(aborted)) => {
            report_abort(&aborted);
            ExitCode::FAILURE
        }
        Err(RunError::Setup(error)) => {
            tracing::error!(%error, "scan could not start");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

async fn run() -> Result<ScanReport, RunError> {
    let config = load_config()?;

    let token = config.resolve_token()?;
    let settings = config.scan_settings()?;
    let urls = read_repository_urls(Path::new(&config.input), &config.url_column)?;
    tracing::info!(
        input = %config.input,
        repositories = urls.len(),
        threshold = settings.guard.threshold(),
        "starting scan"
    );

    let gateway = RetryingGateway::new(
        OctocrabGraphqlGateway::for_token(&token, &config.api_base)?,
        config.retry_policy(),
    );
    let mut sink = CsvMatchSink::open(Path::new(&config.output))?;

    let scanner = Scanner::new(&gateway, settings);
    Ok(scanner.run(&urls, &mut sink).await?)
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`ScanError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<ScoutConfig, ScanError> {
    ScoutConfig::load().map_err(|error| ScanError::Configuration {
        message: error.to_string(),
    })
}

fn report_abort(aborted: &ScanAborted) {
    match aborted.last_rate_limit {
        Some(status) => tracing::error!(
            repository = %aborted.repository,
            error = %aborted.error,
            limit = status.limit(),
            remaining = status.remaining(),
            reset_at = %status.reset_at(),
            "scan aborted"
        ),
        None => tracing::error!(
            repository = %aborted.repository,
            error = %aborted.error,
            "scan aborted before any rate limit was reported"
        ),
    }
}

fn write_summary(report: &ScanReport) -> Result<(), ScanError> {
    let stop = match &report.stop_reason {
        StopReason::InputExhausted => "all repositories processed".to_owned(),
        StopReason::RateLimitBudget {
            repository,
            rate_limit,
        } => format!(
            "stopped after {repository}: {} points left, resets at {}",
            rate_limit.remaining(),
            rate_limit.reset_at()
        ),
    };
    let message = format!(
        "Scanned {} repositories, {} matches, {} skipped ({stop})",
        report.repositories_scanned,
        report.matches.len(),
        report.skipped.len()
    );

    writeln!(io::stdout().lock(), "{message}").map_err(|error| ScanError::Io {
        message: error.to_string(),
    })
}
