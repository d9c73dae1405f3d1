//! Sweep Executor
//!
//! Runs the input cases against the available bindings and turns the
//! result table into output.
//!
//! ## Pipeline Overview
//!
//! ```text
//! Capabilities + InputCases
//!       │
//!       ▼
//! ┌─────────────┐
//! │    sweep    │  Trial sets per cell, speedup per row, case blocks streamed
//! └──────┬──────┘
//!        │
//!        ▼
//! ┌─────────────┐
//! │   report    │  Report with run metadata and cell counts
//! └──────┬──────┘
//!        │
//!        ▼
//! ┌─────────────┐
//! │ formatting  │  Header, case blocks, summary table
//! └─────────────┘
//! ```

mod cases;
mod formatting;
mod report;
mod sweep;

pub use cases::{InputCase, default_cases, filter_cases};
pub use formatting::{format_case_block, format_header, format_human_output, format_summary_table};
pub use report::{build_report, report_config};
pub use sweep::{
    DEFAULT_NAME_A, DEFAULT_NAME_B, SweepConfig, SweepDriver, SweepError, SweepOutcome, measure,
    slot_names,
};
