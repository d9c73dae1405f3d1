//! Report Building
//!
//! Wraps a finished sweep in a [`Report`]: run metadata (timestamp, host
//! platform, trial configuration, slot names) plus the result table and
//! its cell counts.

use super::sweep::{SweepConfig, SweepOutcome};
use bindbench_report::{Report, ReportConfig, ReportMeta};

/// Report configuration captured from the sweep configuration
pub fn report_config(config: &SweepConfig) -> ReportConfig {
    ReportConfig {
        iterations: config.trial.iterations,
        trial_count: config.trial.trial_count,
        warmup_trials: config.trial.warmup_trials,
        pin_cpu: config.pin_cpu,
    }
}

/// Build a complete Report from a sweep outcome
pub fn build_report(
    outcome: SweepOutcome,
    config: &SweepConfig,
    name_a: &str,
    name_b: &str,
) -> Report {
    let meta = ReportMeta::new(report_config(config), name_a, name_b);
    let total_duration_ms = outcome.duration.as_secs_f64() * 1000.0;
    Report::new(meta, outcome.rows, total_duration_ms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bindbench_core::TrialConfig;
    use bindbench_report::{Cell, ResultRow};
    use std::time::Duration;

    #[test]
    fn test_build_report() {
        let config = SweepConfig {
            trial: TrialConfig::new(100, 3).with_warmup_trials(1),
            pin_cpu: Some(0),
        };
        let outcome = SweepOutcome {
            rows: vec![ResultRow::new("x", 1, Cell::Unavailable, Cell::Unavailable)],
            duration: Duration::from_millis(250),
        };

        let report = build_report(outcome, &config, "static", "dynamic");
        assert_eq!(report.meta.config.iterations, 100);
        assert_eq!(report.meta.config.warmup_trials, 1);
        assert_eq!(report.meta.config.pin_cpu, Some(0));
        assert_eq!(report.meta.binding_b, "dynamic");
        assert_eq!(report.summary.total_cases, 1);
        assert_eq!(report.summary.unavailable_cells, 2);
        assert!((report.summary.total_duration_ms - 250.0).abs() < 1e-9);
    }
}
