//! Report Data Structures

use bindbench_stats::{SummaryStatistics, speedup};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Complete sweep report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub meta: ReportMeta,
    pub rows: Vec<ResultRow>,
    pub summary: ReportSummary,
}

impl Report {
    /// Assemble a report, deriving the summary counts from `rows`
    pub fn new(meta: ReportMeta, rows: Vec<ResultRow>, total_duration_ms: f64) -> Self {
        let summary = ReportSummary::from_rows(&rows, total_duration_ms);
        Self {
            meta,
            rows,
            summary,
        }
    }
}

/// Report metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMeta {
    pub schema_version: u32,
    pub version: String,
    pub timestamp: DateTime<Utc>,
    pub os: String,
    pub arch: String,
    pub config: ReportConfig,
    /// Name of Callable-A
    pub binding_a: String,
    /// Name of Callable-B
    pub binding_b: String,
}

impl ReportMeta {
    /// Current schema version of the JSON output
    pub const SCHEMA_VERSION: u32 = 1;

    /// Metadata stamped with the current time and host platform
    pub fn new(
        config: ReportConfig,
        binding_a: impl Into<String>,
        binding_b: impl Into<String>,
    ) -> Self {
        Self {
            schema_version: Self::SCHEMA_VERSION,
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: Utc::now(),
            os: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
            config,
            binding_a: binding_a.into(),
            binding_b: binding_b.into(),
        }
    }
}

/// Runner configuration captured in report metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    pub iterations: u64,
    pub trial_count: usize,
    /// Leading trials run and discarded; 0 means the first trial is kept
    pub warmup_trials: usize,
    pub pin_cpu: Option<usize>,
}

/// One input case: a cell per callable plus the speedup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultRow {
    pub label: String,
    pub payload_length: usize,
    pub a: Cell,
    pub b: Cell,
    /// `stats_b.mean / stats_a.mean` when both were measured
    pub speedup: Option<f64>,
}

impl ResultRow {
    /// Build a row and compute its speedup
    pub fn new(label: impl Into<String>, payload_length: usize, a: Cell, b: Cell) -> Self {
        let speedup = match (a.metrics(), b.metrics()) {
            (Some(a), Some(b)) => speedup(a.mean_us, b.mean_us),
            _ => None,
        };
        Self {
            label: label.into(),
            payload_length,
            a,
            b,
            speedup,
        }
    }

    /// Summary for Callable-A, if measured
    pub fn stats_a(&self) -> Option<SummaryStatistics> {
        self.a.metrics().map(BindingMetrics::summary)
    }

    /// Summary for Callable-B, if measured
    pub fn stats_b(&self) -> Option<SummaryStatistics> {
        self.b.metrics().map(BindingMetrics::summary)
    }
}

/// Outcome of measuring one callable on one input case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Cell {
    /// Trials completed
    Measured(BindingMetrics),
    /// The callable raised during a trial
    Failed(FailureInfo),
    /// The callable was not discovered
    Unavailable,
}

impl Cell {
    /// Metrics when measured
    pub fn metrics(&self) -> Option<&BindingMetrics> {
        match self {
            Cell::Measured(m) => Some(m),
            _ => None,
        }
    }
}

/// Per-call timing metrics in microseconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BindingMetrics {
    pub binding: String,
    pub trials: usize,
    pub iterations: u64,
    pub mean_us: f64,
    pub std_dev_us: f64,
    pub min_us: f64,
    pub max_us: f64,
    pub total_us: f64,
    // CPU cycles per call (x86_64/aarch64 only)
    pub mean_cycles: Option<f64>,
}

impl BindingMetrics {
    /// Metrics from a microsecond summary
    pub fn from_summary(
        binding: impl Into<String>,
        iterations: u64,
        stats: &SummaryStatistics,
        mean_cycles: Option<f64>,
    ) -> Self {
        Self {
            binding: binding.into(),
            trials: stats.sample_count,
            iterations,
            mean_us: stats.mean,
            std_dev_us: stats.std_dev,
            min_us: stats.min,
            max_us: stats.max,
            total_us: stats.total,
            mean_cycles,
        }
    }

    /// Back to the statistics shape
    pub fn summary(&self) -> SummaryStatistics {
        SummaryStatistics {
            mean: self.mean_us,
            std_dev: self.std_dev_us,
            min: self.min_us,
            max: self.max_us,
            total: self.total_us,
            sample_count: self.trials,
        }
    }
}

/// Failure information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureInfo {
    pub binding: String,
    pub kind: String,
    pub message: String,
}

/// Report summary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total_cases: usize,
    pub measured_cells: usize,
    pub failed_cells: usize,
    pub unavailable_cells: usize,
    pub total_duration_ms: f64,
}

impl ReportSummary {
    /// Count cell outcomes across `rows`
    pub fn from_rows(rows: &[ResultRow], total_duration_ms: f64) -> Self {
        let mut summary = Self {
            total_cases: rows.len(),
            total_duration_ms,
            ..Self::default()
        };
        for cell in rows.iter().flat_map(|row| [&row.a, &row.b]) {
            match cell {
                Cell::Measured(_) => summary.measured_cells += 1,
                Cell::Failed(_) => summary.failed_cells += 1,
                Cell::Unavailable => summary.unavailable_cells += 1,
            }
        }
        summary
    }
}
