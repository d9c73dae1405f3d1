#![warn(missing_docs)]
//! # bindbench
//!
//! Micro-benchmark harness for the call overhead of two ways into the same
//! native routine:
//! - **static**: linked into the harness and called directly
//! - **dynamic**: a shared library opened at run time and called through
//!   resolved function pointers
//!
//! Each input case is timed as repeated trials of back-to-back calls,
//! reduced to mean/std/min/max in microseconds, and reported with the
//! speedup of the static path over the dynamic one.
//!
//! ## Quick Start
//!
//! ```ignore
//! use bindbench::prelude::*;
//!
//! let binding = FnBinding::new("upper", |s: &str| Ok(s.to_uppercase()));
//! let set = run_trials(&binding, "Hello, World!", 100_000, 10)?;
//! let stats = set.summarize();
//! println!("{:.3} μs/call", stats.mean);
//! ```

// Re-export core types
pub use bindbench_core::{
    BindingError, Capabilities, CapabilityProvider, FnBinding, HAS_CYCLE_COUNTER, StringBinding,
    Timer, TrialConfig, TrialError, TrialSet, pin_to_cpu, run_trials, run_trials_with,
};

// Re-export stats
pub use bindbench_stats::{
    MICROS_PER_SECOND, SummaryStatistics, compute_summary, speedup, summarize_micros,
};

// Re-export bindings
#[cfg(feature = "static-binding")]
pub use bindbench_ffi::StaticBinding;
pub use bindbench_ffi::{DynamicBinding, LibraryLocator, LoadError, NativeProvider};

// Re-export report types
pub use bindbench_report::{
    BindingMetrics, Cell, FailureInfo, OutputFormat, Report, ResultRow, generate_json_report,
};

// Re-export the driver
pub use bindbench_cli::{
    BenchConfig, Cli, InputCase, RunSettings, RunStatus, SweepConfig, SweepDriver, SweepError,
    default_cases, execute,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        Capabilities, CapabilityProvider, FnBinding, StringBinding, SummaryStatistics,
        TrialConfig, run_trials, run_trials_with,
    };
}

/// Run the bindbench CLI.
///
/// ```ignore
/// fn main() -> std::process::ExitCode {
///     match bindbench::run() {
///         Ok(status) => status.exit_code(),
///         Err(_) => std::process::ExitCode::FAILURE,
///     }
/// }
/// ```
pub use bindbench_cli::run;
