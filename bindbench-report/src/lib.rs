#![warn(missing_docs)]
//! bindbench Report - Result Model and Output
//!
//! Holds the per-case result table and serializes it:
//! - JSON (machine-readable)
//! - Human-readable terminal output is rendered by the CLI from the same model

mod json;
mod report;

pub use json::generate_json_report;
pub use report::{
    BindingMetrics, Cell, FailureInfo, Report, ReportConfig, ReportMeta, ReportSummary, ResultRow,
};

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Per-case blocks plus summary table
    #[default]
    Human,
    /// JSON report
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "human" | "text" => Ok(OutputFormat::Human),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}
