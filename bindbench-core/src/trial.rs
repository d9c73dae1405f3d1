//! Trial Runner
//!
//! A trial is one timed batch: `iterations` back-to-back calls inside a
//! single timed region, reported as the average time per call. A trial set
//! repeats that `trial_count` times, sequentially, on the calling thread.
//!
//! There is no warm-up by default. The first trial keeps whatever one-time
//! cost the binding pays on first use (lazy symbol binding, cold caches).
//! [`TrialConfig::warmup_trials`] opts into discarding leading trials.

use crate::binding::{BindingError, StringBinding};
use crate::measure::{HAS_CYCLE_COUNTER, Timer};
use bindbench_stats::{SummaryStatistics, compute_summary, summarize_micros};
use std::panic::{self, AssertUnwindSafe};
use std::time::Duration;
use thiserror::Error;

/// Errors from running a trial set
#[derive(Debug, Error)]
pub enum TrialError {
    /// `iterations` must be at least 1
    #[error("iterations must be at least 1")]
    ZeroIterations,

    /// `trial_count` must be at least 1
    #[error("trial count must be at least 1")]
    ZeroTrials,

    /// The binding failed during one of its invocations
    #[error("{name}: {source}")]
    ExecutionFailure {
        /// Name of the failing binding
        name: String,
        /// Underlying binding error
        #[source]
        source: BindingError,
    },
}

/// Shape of one trial set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrialConfig {
    /// Calls per trial
    pub iterations: u64,
    /// Recorded trials per (binding, input) pair
    pub trial_count: usize,
    /// Leading trials executed and discarded before recording
    pub warmup_trials: usize,
}

impl TrialConfig {
    /// Reference defaults: 100 000 calls per trial, 10 trials, no warm-up
    pub const DEFAULT_ITERATIONS: u64 = 100_000;
    /// Default number of recorded trials
    pub const DEFAULT_TRIAL_COUNT: usize = 10;

    /// Config with no warm-up phase
    pub fn new(iterations: u64, trial_count: usize) -> Self {
        Self {
            iterations,
            trial_count,
            warmup_trials: 0,
        }
    }

    /// Set the number of discarded warm-up trials
    pub fn with_warmup_trials(mut self, warmup_trials: usize) -> Self {
        self.warmup_trials = warmup_trials;
        self
    }

    /// Check the `iterations >= 1` and `trial_count >= 1` preconditions
    pub fn validate(&self) -> Result<(), TrialError> {
        if self.iterations == 0 {
            return Err(TrialError::ZeroIterations);
        }
        if self.trial_count == 0 {
            return Err(TrialError::ZeroTrials);
        }
        Ok(())
    }
}

impl Default for TrialConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ITERATIONS, Self::DEFAULT_TRIAL_COUNT)
    }
}

/// Ordered per-trial samples for one (binding, payload) pair
#[derive(Debug, Clone)]
pub struct TrialSet {
    binding: String,
    iterations: u64,
    /// Seconds per call, one entry per trial
    samples: Vec<f64>,
    /// Cycles per call, parallel with `samples`
    cycles: Vec<f64>,
}

impl TrialSet {
    /// Name of the measured binding
    pub fn binding(&self) -> &str {
        &self.binding
    }

    /// Calls per trial
    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    /// Per-trial seconds per call
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Per-trial cycles per call (zeros without a cycle counter)
    pub fn cycles(&self) -> &[f64] {
        &self.cycles
    }

    /// Number of recorded trials
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false for a set produced by the runner
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Summary statistics in microseconds
    pub fn summarize(&self) -> SummaryStatistics {
        summarize_micros(&self.samples)
    }

    /// Mean cycles per call, when the platform has a cycle counter
    pub fn mean_cycles(&self) -> Option<f64> {
        HAS_CYCLE_COUNTER.then(|| compute_summary(&self.cycles).mean)
    }
}

/// Run `trial_count` trials of `iterations` calls each, without warm-up.
pub fn run_trials<B>(
    binding: &B,
    payload: &str,
    iterations: u64,
    trial_count: usize,
) -> Result<TrialSet, TrialError>
where
    B: StringBinding + ?Sized,
{
    run_trials_with(binding, payload, &TrialConfig::new(iterations, trial_count))
}

/// Run a trial set as described by `config`.
///
/// Fails with [`TrialError::ExecutionFailure`] as soon as any call returns
/// an error or panics; no partial trial set is returned.
pub fn run_trials_with<B>(
    binding: &B,
    payload: &str,
    config: &TrialConfig,
) -> Result<TrialSet, TrialError>
where
    B: StringBinding + ?Sized,
{
    config.validate()?;

    let name = binding.name().to_string();
    let iterations = config.iterations;

    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        for _ in 0..config.warmup_trials {
            time_trial(binding, payload, iterations)?;
        }

        let mut samples = Vec::with_capacity(config.trial_count);
        let mut cycles = Vec::with_capacity(config.trial_count);
        for _ in 0..config.trial_count {
            let (elapsed, trial_cycles) = time_trial(binding, payload, iterations)?;
            samples.push(elapsed.as_secs_f64() / iterations as f64);
            cycles.push(trial_cycles as f64 / iterations as f64);
        }
        Ok::<_, BindingError>((samples, cycles))
    }));

    let outcome = match result {
        Ok(outcome) => outcome,
        Err(panic) => {
            let message = if let Some(s) = panic.downcast_ref::<&str>() {
                s.to_string()
            } else if let Some(s) = panic.downcast_ref::<String>() {
                s.clone()
            } else {
                "Unknown panic".to_string()
            };
            Err(BindingError::Panicked(message))
        }
    };

    match outcome {
        Ok((samples, cycles)) => {
            tracing::debug!(binding = %name, trials = samples.len(), iterations, "trial set complete");
            Ok(TrialSet {
                binding: name,
                iterations,
                samples,
                cycles,
            })
        }
        Err(source) => Err(TrialError::ExecutionFailure { name, source }),
    }
}

/// One continuously-timed batch of `iterations` calls
#[inline]
fn time_trial<B>(binding: &B, payload: &str, iterations: u64) -> Result<(Duration, u64), BindingError>
where
    B: StringBinding + ?Sized,
{
    let timer = Timer::start();
    for _ in 0..iterations {
        let output = binding.call(std::hint::black_box(payload))?;
        std::hint::black_box(output);
    }
    Ok(timer.stop())
}
