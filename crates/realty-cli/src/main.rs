mod atomic;
mod logging;
mod settings;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::{ArgAction, Parser};
use rand::Rng;
use realty_core::{Catalog, Header};
use realty_generate::{
    GenerationError, GeneratorProfile, HeaderCheck, RowGenerator, TargetFile,
    append_synthetic_rows, seeded_rng,
};
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use logging::{LogConfig, init_logging};

const DEFAULT_TARGET: &str = "House_price/GiaChungCu_HCM_June2021_laydulieu_com.csv";

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Generation(#[from] GenerationError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("profile decode error: {0}")]
    ProfileDecode(#[from] toml::de::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("logging error: {0}")]
    Logging(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

#[derive(Parser, Debug)]
#[command(
    name = "realty-synth",
    version,
    about = "Append synthetic HCMC apartment listings to an existing CSV"
)]
struct Cli {
    /// Number of synthetic rows to generate.
    #[arg(long, short = 'n', default_value_t = 500)]
    count: usize,
    /// Path to the target CSV file to append to.
    #[arg(long, short = 'f', default_value = DEFAULT_TARGET)]
    file: PathBuf,
    /// Fixed RNG seed; drawn at random when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// TOML file overriding generation probabilities.
    #[arg(long, value_name = "PATH")]
    profile: Option<PathBuf>,
    /// Write the append report as JSON.
    #[arg(long, value_name = "PATH")]
    report: Option<PathBuf>,
    /// Append JSON log lines to this file.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
    /// Increase stderr log verbosity (repeatable).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_config = LogConfig {
        verbosity: cli.verbose,
        log_file: cli.log_file.clone(),
    };
    if let Err(err) = init_logging(&log_config) {
        println!("{}", error_line(&err));
        return ExitCode::FAILURE;
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(event = "run_failed", error = %err);
            println!("{}", error_line(&err));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let Cli {
        count,
        file,
        seed,
        profile,
        report,
        ..
    } = cli;

    let run_id = Uuid::new_v4().to_string();
    let profile = match profile {
        Some(path) => settings::load_profile(&path)?,
        None => GeneratorProfile::default(),
    };
    let seed = seed.unwrap_or_else(|| rand::rng().random());

    let catalog = Catalog::builtin();
    let generator = RowGenerator::new(&catalog, profile)?;

    info!(
        event = "run_started",
        run_id = %run_id,
        seed,
        count,
        path = %file.display()
    );
    let timer = Instant::now();

    let target = TargetFile::open(&file, generator.header())?;
    if let HeaderCheck::WidthDiffers { .. } = target.header_check(generator.header()) {
        for line in header_warning_lines(target.header(), generator.header()) {
            println!("{line}");
        }
    }

    let mut rng = seeded_rng(seed);
    let outcome = append_synthetic_rows(&target, count, &generator, &mut rng)?;

    if let Some(path) = report {
        atomic::write_json_atomic(&path, &outcome)?;
        info!(event = "report_written", path = %path.display());
    }

    println!(
        "Appended {} synthetic rows to {}",
        outcome.rows_appended,
        file.display()
    );

    let duration_ms = timer.elapsed().as_millis();
    info!(
        event = "run_finished",
        run_id = %run_id,
        status = "success",
        rows_appended = outcome.rows_appended,
        duration_ms = duration_ms
    );

    Ok(())
}

/// Console lines printed when the file header width differs from the
/// generator header.
fn header_warning_lines(existing: &Header, expected: &Header) -> Vec<String> {
    vec![
        "Warning: existing CSV header length differs from generator header.".to_string(),
        format!("Existing header ({}): {existing}", existing.width()),
        format!("Generator header ({}): {expected}", expected.width()),
    ]
}

fn error_line(err: &CliError) -> String {
    format!("Error: {err}")
}
