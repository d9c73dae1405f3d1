#![warn(missing_docs)]
//! bindbench Core - Measurement Runtime
//!
//! This crate provides the measuring side of the harness:
//! - `StringBinding`, the callable-under-test abstraction
//! - `CapabilityProvider`, the seam behind which bindings are discovered
//! - `run_trials`, the repeated-trial timer
//! - High-precision timing (Instant plus RDTSCP/CNTVCT cycle counts)
//! - CPU affinity pinning for stable readings

mod binding;
mod capability;
mod measure;
mod trial;

pub use binding::{BindingError, FnBinding, StringBinding};
pub use capability::{Capabilities, CapabilityProvider};
/// Whether this platform provides hardware cycle counters (x86_64 RDTSCP or AArch64 CNTVCT_EL0).
/// When `false`, cycle counts are reported as 0 and only wall-clock time is available.
pub use measure::HAS_CYCLE_COUNTER;
pub use measure::{Timer, pin_to_cpu};
pub use trial::{TrialConfig, TrialError, TrialSet, run_trials, run_trials_with};
