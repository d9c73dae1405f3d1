//! Sweep Execution
//!
//! Drives the trial runner over every input case, in order:
//!
//! ```text
//! for each case:
//!   A available? → run_trials_with → Measured | Failed
//!   B available? → run_trials_with → Measured | Failed
//!   both Measured → speedup
//!   append row, stream the case block
//! ```
//!
//! A failing cell never stops the sweep. The only fatal condition is having
//! no binding at all, which is checked before anything is measured.

use super::cases::InputCase;
use super::formatting::format_case_block;
use bindbench_core::{
    BindingError, Capabilities, StringBinding, TrialConfig, TrialError, pin_to_cpu,
    run_trials_with,
};
use bindbench_report::{BindingMetrics, Cell, FailureInfo, ResultRow};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Slot name for Callable-A when it is absent
pub const DEFAULT_NAME_A: &str = "static";
/// Slot name for Callable-B when it is absent
pub const DEFAULT_NAME_B: &str = "dynamic";

/// Errors that stop a sweep before or while it runs
#[derive(Debug, Error)]
pub enum SweepError {
    /// Neither binding was discovered
    #[error("Neither the {a} nor the {b} binding is available")]
    NoCapabilities {
        /// Slot name of Callable-A
        a: String,
        /// Slot name of Callable-B
        b: String,
    },

    /// The trial configuration is unusable
    #[error("invalid trial configuration: {0}")]
    InvalidConfig(#[from] TrialError),

    /// Writing a case block failed
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

/// Configuration for one sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SweepConfig {
    /// Per-cell trial shape
    pub trial: TrialConfig,
    /// Pin the measuring thread before the first case
    pub pin_cpu: Option<usize>,
}

/// Result table of a completed sweep
#[derive(Debug, Clone)]
pub struct SweepOutcome {
    /// One row per input case, in case order
    pub rows: Vec<ResultRow>,
    /// Wall-clock time of the whole sweep
    pub duration: Duration,
}

/// Runs the per-case measurements and owns the result table while doing so
pub struct SweepDriver {
    config: SweepConfig,
    progress: ProgressBar,
}

impl SweepDriver {
    /// Driver with a progress bar on stderr
    pub fn new(config: SweepConfig) -> Self {
        Self {
            config,
            progress: ProgressBar::new(0),
        }
    }

    /// Replace the progress bar (e.g. `ProgressBar::hidden()`)
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    /// Sweep configuration
    pub fn config(&self) -> &SweepConfig {
        &self.config
    }

    /// Measure every case against the available bindings.
    ///
    /// Each case block is written to `out` as soon as its row is complete.
    /// Pass `std::io::sink()` to suppress streaming.
    pub fn run(
        &self,
        caps: &Capabilities,
        cases: &[InputCase],
        out: &mut dyn Write,
    ) -> Result<SweepOutcome, SweepError> {
        let (name_a, name_b) = slot_names(caps);

        if !caps.any() {
            return Err(SweepError::NoCapabilities {
                a: name_a.to_string(),
                b: name_b.to_string(),
            });
        }
        self.config.trial.validate()?;

        if let Some(cpu) = self.config.pin_cpu {
            match pin_to_cpu(cpu) {
                Ok(()) => tracing::debug!(cpu, "pinned measuring thread"),
                Err(e) => tracing::warn!(cpu, "failed to pin measuring thread: {e}"),
            }
        }

        let cells_per_case = [caps.a.is_some(), caps.b.is_some()]
            .iter()
            .filter(|present| **present)
            .count();
        self.progress
            .set_length((cases.len() * cells_per_case) as u64);
        self.progress.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );

        let start = Instant::now();
        let mut rows = Vec::with_capacity(cases.len());

        for case in cases {
            tracing::debug!(case = %case.label, length = case.len(), "measuring case");

            let a = self.measure_cell(caps.a.as_deref(), case);
            let b = self.measure_cell(caps.b.as_deref(), case);
            let row = ResultRow::new(&case.label, case.len(), a, b);

            let block = format_case_block(&row, name_a, name_b);
            self.progress
                .suspend(|| out.write_all(block.as_bytes()).and_then(|()| out.flush()))?;

            rows.push(row);
        }

        self.progress.finish_and_clear();

        Ok(SweepOutcome {
            rows,
            duration: start.elapsed(),
        })
    }

    fn measure_cell(&self, binding: Option<&dyn StringBinding>, case: &InputCase) -> Cell {
        let Some(binding) = binding else {
            return Cell::Unavailable;
        };

        self.progress
            .set_message(format!("{} / {}", case.label, binding.name()));
        let cell = measure(binding, &case.payload, &self.config.trial);
        self.progress.inc(1);
        cell
    }
}

/// Measure one (binding, payload) cell, folding failures into the cell
pub fn measure(binding: &dyn StringBinding, payload: &str, trial: &TrialConfig) -> Cell {
    match run_trials_with(binding, payload, trial) {
        Ok(set) => {
            let stats = set.summarize();
            Cell::Measured(BindingMetrics::from_summary(
                set.binding(),
                set.iterations(),
                &stats,
                set.mean_cycles(),
            ))
        }
        Err(e) => {
            tracing::warn!(binding = binding.name(), "measurement failed: {e}");
            Cell::Failed(failure_info(binding.name(), &e))
        }
    }
}

fn failure_info(binding: &str, error: &TrialError) -> FailureInfo {
    let (kind, message) = match error {
        TrialError::ExecutionFailure { source, .. } => {
            let kind = match source {
                BindingError::Encode(_) => "encode",
                BindingError::Decode(_) => "decode",
                BindingError::Panicked(_) => "panic",
                BindingError::Native(_) => "native",
            };
            (kind, source.to_string())
        }
        other => ("config", other.to_string()),
    };
    FailureInfo {
        binding: binding.to_string(),
        kind: kind.to_string(),
        message,
    }
}

/// Names shown for the two slots: the binding's own name, or the default
pub fn slot_names(caps: &Capabilities) -> (&str, &str) {
    (
        caps.a.as_ref().map_or(DEFAULT_NAME_A, |b| b.name()),
        caps.b.as_ref().map_or(DEFAULT_NAME_B, |b| b.name()),
    )
}
