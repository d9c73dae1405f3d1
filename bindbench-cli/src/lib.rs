#![warn(missing_docs)]
//! bindbench CLI Library
//!
//! This module provides the CLI for the `bindbench` binary: argument
//! parsing, configuration layering, logging, capability discovery and the
//! sweep itself.
//!
//! # Example
//!
//! ```ignore
//! fn main() -> std::process::ExitCode {
//!     match bindbench_cli::run() {
//!         Ok(status) => status.exit_code(),
//!         Err(e) => {
//!             eprintln!("Error: {e:#}");
//!             std::process::ExitCode::FAILURE
//!         }
//!     }
//! }
//! ```

mod config;
mod executor;

pub use config::*;
pub use executor::{
    DEFAULT_NAME_A, DEFAULT_NAME_B, InputCase, SweepConfig, SweepDriver, SweepError,
    SweepOutcome, build_report, default_cases, filter_cases, format_case_block, format_header,
    format_human_output, format_summary_table, measure, report_config, slot_names,
};

use anyhow::Context;
use bindbench_core::{Capabilities, CapabilityProvider, TrialConfig};
use bindbench_ffi::{LibraryLocator, NativeProvider};
use bindbench_report::{OutputFormat, generate_json_report};
use clap::Parser;
use indicatif::ProgressBar;
use regex::Regex;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

/// bindbench CLI arguments
#[derive(Parser, Debug, Default)]
#[command(name = "bindbench")]
#[command(
    author,
    version,
    about = "bindbench - call overhead of a static binding vs a dynamically-loaded library"
)]
pub struct Cli {
    /// Calls per trial [default: 100000]
    #[arg(short, long, value_parser = parse_positive::<u64>)]
    pub iterations: Option<u64>,

    /// Recorded trials per binding and case [default: 10]
    #[arg(short, long, value_parser = parse_positive::<usize>)]
    pub trials: Option<usize>,

    /// Leading trials to run and discard [default: 0]
    #[arg(long)]
    pub warmup_trials: Option<usize>,

    /// Only run input cases whose label matches this regex
    #[arg(long)]
    pub filter: Option<String>,

    /// Output format: human, json
    #[arg(long)]
    pub format: Option<String>,

    /// Exact path of the shared library (disables searching)
    #[arg(long)]
    pub library: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Pin the measuring thread to this CPU (Linux only)
    #[arg(long)]
    pub pin_cpu: Option<usize>,

    /// Treat the static binding as unavailable
    #[arg(long)]
    pub no_static: bool,

    /// Treat the dynamic binding as unavailable
    #[arg(long)]
    pub no_dynamic: bool,

    /// Print a commented default configuration and exit
    #[arg(long)]
    pub print_config: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

fn parse_positive<T>(s: &str) -> Result<T, String>
where
    T: std::str::FromStr + PartialOrd + Default,
    T::Err: std::fmt::Display,
{
    let value: T = s.parse().map_err(|e: T::Err| e.to_string())?;
    if value <= T::default() {
        return Err("must be at least 1".to_string());
    }
    Ok(value)
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// Every case was measured and reported
    Completed,
    /// Neither binding was available; nothing was measured
    NoCapabilities,
}

impl RunStatus {
    /// Process exit code for this status
    pub fn exit_code(self) -> ExitCode {
        match self {
            RunStatus::Completed => ExitCode::SUCCESS,
            RunStatus::NoCapabilities => ExitCode::from(1),
        }
    }
}

/// Fully resolved run settings: defaults, then config file, then CLI flags
#[derive(Debug, Clone)]
pub struct RunSettings {
    /// Trial shape and CPU pinning
    pub sweep: SweepConfig,
    /// Input cases, already filtered
    pub cases: Vec<InputCase>,
    /// Output format
    pub format: OutputFormat,
    /// Shared library locator
    pub locator: LibraryLocator,
    /// Draw a progress bar on stderr
    pub show_progress: bool,
}

impl RunSettings {
    /// Layer CLI flags over a loaded configuration
    pub fn resolve(cli: &Cli, config: &BenchConfig) -> anyhow::Result<Self> {
        let trial = TrialConfig::new(
            cli.iterations.unwrap_or(config.runner.iterations),
            cli.trials.unwrap_or(config.runner.trials),
        )
        .with_warmup_trials(cli.warmup_trials.unwrap_or(config.runner.warmup_trials));
        trial.validate().context("invalid runner configuration")?;

        let format: OutputFormat = cli
            .format
            .as_deref()
            .unwrap_or(config.output.format.as_str())
            .parse()
            .map_err(anyhow::Error::msg)?;

        let filter = cli
            .filter
            .as_deref()
            .map(Regex::new)
            .transpose()
            .context("invalid --filter pattern")?;
        let cases = config.input_cases()?.unwrap_or_else(default_cases);
        let cases = filter_cases(cases, filter.as_ref());
        if cases.is_empty() {
            tracing::warn!("no input cases selected");
        }

        let mut locator = LibraryLocator::default();
        for dir in config.library.search_dirs.iter().rev() {
            locator = locator.with_search_dir(dir);
        }
        if let Some(path) = cli.library.clone().or_else(|| config.library.path.clone()) {
            locator = locator.with_path(path);
        }

        Ok(Self {
            sweep: SweepConfig {
                trial,
                pin_cpu: cli.pin_cpu.or(config.runner.pin_cpu),
            },
            cases,
            format,
            locator,
            show_progress: format == OutputFormat::Human,
        })
    }
}

/// Run the bindbench CLI with the process arguments.
/// This is the main entry point for the `bindbench` binary.
pub fn run() -> anyhow::Result<RunStatus> {
    let cli = Cli::parse();
    run_with_cli(cli)
}

/// Run the bindbench CLI with pre-parsed arguments.
pub fn run_with_cli(cli: Cli) -> anyhow::Result<RunStatus> {
    if cli.print_config {
        print!("{}", BenchConfig::default_toml());
        return Ok(RunStatus::Completed);
    }

    init_logging(cli.verbose);

    // Only an explicit --config touches the filesystem
    let config = match &cli.config {
        Some(path) => BenchConfig::load(path)?,
        None => BenchConfig::default(),
    };
    let settings = RunSettings::resolve(&cli, &config)?;

    let provider = NativeProvider::new(settings.locator.clone())
        .with_static(!cli.no_static)
        .with_dynamic(!cli.no_dynamic);
    let caps = provider.discover();
    tracing::info!(
        a = ?caps.a.as_ref().map(|b| b.name()),
        b = ?caps.b.as_ref().map(|b| b.name()),
        "bindings discovered"
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    execute(&caps, &settings, &mut out)
}

/// Run the sweep for `caps` and write the selected output to `out`.
///
/// Neither binding available is reported on stderr and yields
/// [`RunStatus::NoCapabilities`] without measuring anything.
pub fn execute(
    caps: &Capabilities,
    settings: &RunSettings,
    out: &mut dyn Write,
) -> anyhow::Result<RunStatus> {
    let (name_a, name_b) = slot_names(caps);
    let human = settings.format == OutputFormat::Human;

    let progress = if settings.show_progress {
        ProgressBar::new(0)
    } else {
        ProgressBar::hidden()
    };
    let driver = SweepDriver::new(settings.sweep).with_progress(progress);

    // Nothing reaches `out` for a configuration the sweep would reject
    if caps.any() {
        settings.sweep.trial.validate().map_err(SweepError::from)?;
    }

    if human && caps.any() {
        out.write_all(format_header(&report_config(&settings.sweep), name_a, name_b).as_bytes())?;
    }

    let mut sink = std::io::sink();
    let stream: &mut dyn Write = if human { &mut *out } else { &mut sink };

    let outcome = match driver.run(caps, &settings.cases, stream) {
        Ok(outcome) => outcome,
        Err(e @ SweepError::NoCapabilities { .. }) => {
            tracing::error!("{e}");
            eprintln!("Error: {e}.");
            eprintln!("Build the native library first:");
            eprintln!("  cargo build --release -p bindbench-native");
            return Ok(RunStatus::NoCapabilities);
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!(
        cases = outcome.rows.len(),
        duration_ms = outcome.duration.as_millis() as u64,
        "sweep complete"
    );

    match settings.format {
        OutputFormat::Human => {
            out.write_all(format_summary_table(&outcome.rows, name_a, name_b).as_bytes())?;
        }
        OutputFormat::Json => {
            let report = build_report(outcome, &settings.sweep, name_a, name_b);
            writeln!(out, "{}", generate_json_report(&report)?)?;
        }
    }
    out.flush()?;

    Ok(RunStatus::Completed)
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        "bindbench=debug"
    } else {
        "bindbench=info"
    };
    // Already set when embedded in a host that installed its own subscriber
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .ok();
}
