#![warn(missing_docs)]
//! bindbench Statistical Engine
//!
//! Reduces raw per-trial timings into descriptive statistics:
//! - Mean, sample standard deviation, min, max and total
//! - Unit scaling from seconds to microseconds
//! - Relative speedup between two bindings
//!
//! Only derived sample statistics are reported. There are no confidence
//! intervals, outlier rejection or significance tests.

mod comparison;
mod summary;

pub use comparison::{speedup, speedup_verdict};
pub use summary::{MICROS_PER_SECOND, SummaryStatistics, compute_summary, summarize_micros};
