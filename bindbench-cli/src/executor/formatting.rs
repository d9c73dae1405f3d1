//! Output Formatting
//!
//! Human-readable output for sweep reports.
//!
//! Generates terminal-friendly output with:
//! - A run header naming both callables and the trial configuration
//! - One block per input case (mean, std, min, max in μs, or the reason a
//!   cell has no numbers)
//! - A fixed-width summary table with the speedup of A over B

use bindbench_report::{Cell, Report, ReportConfig, ResultRow};
use bindbench_stats::speedup_verdict;

const RULE_WIDTH: usize = 80;

/// Run header
pub fn format_header(config: &ReportConfig, name_a: &str, name_b: &str) -> String {
    let mut output = String::new();

    output.push_str(&"=".repeat(RULE_WIDTH));
    output.push('\n');
    output.push_str(&format!("Performance Benchmark: {} vs {}\n", name_a, name_b));
    output.push_str(&"=".repeat(RULE_WIDTH));
    output.push('\n');
    output.push_str(&format!(
        "{} iterations x {} trials per case\n",
        config.iterations, config.trial_count
    ));
    if config.warmup_trials == 0 {
        output.push_str("No warm-up: the first trial of each set includes cold-start cost\n");
    } else {
        output.push_str(&format!(
            "Warm-up: {} trials discarded per set\n",
            config.warmup_trials
        ));
    }
    output.push('\n');

    output
}

/// Block for one completed input case
pub fn format_case_block(row: &ResultRow, name_a: &str, name_b: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Testing: {} (length: {})\n",
        row.label, row.payload_length
    ));
    output.push_str(&"-".repeat(RULE_WIDTH));
    output.push('\n');

    push_cell(&mut output, name_a, &row.a);
    output.push('\n');
    push_cell(&mut output, name_b, &row.b);

    if let Some(ratio) = row.speedup {
        output.push('\n');
        output.push_str(&format!(
            "Speedup: {} is {:.2}x {} than {}\n",
            name_a,
            ratio,
            speedup_verdict(ratio),
            name_b
        ));
    }

    output.push('\n');
    output
}

fn push_cell(output: &mut String, name: &str, cell: &Cell) {
    match cell {
        Cell::Measured(m) => {
            output.push_str(&format!("{}:\n", name));
            output.push_str(&format!("  Mean:   {:.3} μs\n", m.mean_us));
            output.push_str(&format!("  Std:    {:.3} μs\n", m.std_dev_us));
            output.push_str(&format!("  Min:    {:.3} μs\n", m.min_us));
            output.push_str(&format!("  Max:    {:.3} μs\n", m.max_us));
        }
        Cell::Failed(failure) => {
            output.push_str(&format!("{}: ERROR - {}\n", name, failure.message));
        }
        Cell::Unavailable => {
            output.push_str(&format!("{}: Not available\n", name));
        }
    }
}

/// Final fixed-width table over every row
pub fn format_summary_table(rows: &[ResultRow], name_a: &str, name_b: &str) -> String {
    let mut output = String::new();

    output.push_str(&"=".repeat(RULE_WIDTH));
    output.push_str("\nSummary\n");
    output.push_str(&"=".repeat(RULE_WIDTH));
    output.push('\n');
    output.push_str(&format!(
        "{:<20} {:<10} {:<15} {:<15} {:<10}\n",
        "Test Case",
        "Length",
        format!("{} (μs)", name_a),
        format!("{} (μs)", name_b),
        "Speedup"
    ));
    output.push_str(&"-".repeat(RULE_WIDTH));
    output.push('\n');

    for row in rows {
        let mean_a = mean_or_na(&row.a);
        let mean_b = mean_or_na(&row.b);
        let speedup = row
            .speedup
            .map(|s| format!("{:.2}x", s))
            .unwrap_or_else(|| "N/A".to_string());

        output.push_str(&format!(
            "{:<20} {:<10} {:<15} {:<15} {:<10}\n",
            row.label, row.payload_length, mean_a, mean_b, speedup
        ));
    }

    output.push('\n');
    output
}

fn mean_or_na(cell: &Cell) -> String {
    cell.metrics()
        .map(|m| format!("{:.3}", m.mean_us))
        .unwrap_or_else(|| "N/A".to_string())
}

/// Format a complete report for human-readable terminal display
pub fn format_human_output(report: &Report) -> String {
    let (a, b) = (&report.meta.binding_a, &report.meta.binding_b);
    let mut output = format_header(&report.meta.config, a, b);
    for row in &report.rows {
        output.push_str(&format_case_block(row, a, b));
    }
    output.push_str(&format_summary_table(&report.rows, a, b));
    output
}
