//! Integration tests for bindbench
//!
//! These tests verify the end-to-end behavior of the sweep: discovery,
//! trial timing, aggregation and reporting.

use bindbench::{
    BindingError, Capabilities, Cell, FnBinding, InputCase, LibraryLocator, OutputFormat,
    RunSettings, RunStatus, StringBinding, SweepConfig, SweepDriver, TrialConfig, TrialError,
    compute_summary, execute, run_trials,
};
use indicatif::ProgressBar;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

fn echo(name: &str) -> Box<dyn StringBinding> {
    Box::new(FnBinding::new(name, |s: &str| Ok(s.to_string())))
}

fn settings(iterations: u64, trials: usize, cases: Vec<InputCase>) -> RunSettings {
    RunSettings {
        sweep: SweepConfig {
            trial: TrialConfig::new(iterations, trials),
            pin_cpu: None,
        },
        cases,
        format: OutputFormat::Human,
        locator: LibraryLocator::new(Vec::new()),
        show_progress: false,
    }
}

fn hidden_driver(iterations: u64, trials: usize) -> SweepDriver {
    SweepDriver::new(SweepConfig {
        trial: TrialConfig::new(iterations, trials),
        pin_cpu: None,
    })
    .with_progress(ProgressBar::hidden())
}

/// Test that identical samples aggregate exactly
#[test]
fn test_identical_samples() {
    let d = 0.75;
    let stats = compute_summary(&[d; 8]);
    assert_eq!(stats.mean, d);
    assert_eq!(stats.std_dev, 0.0);
    assert_eq!(stats.min, d);
    assert_eq!(stats.max, d);
    assert_eq!(stats.total, d * 8.0);
}

/// Test the trial runner's invocation count and precondition
#[test]
fn test_trial_runner_contract() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let binding = FnBinding::new("counted", move |s: &str| {
        counter.fetch_add(1, Ordering::Relaxed);
        Ok(s.to_string())
    });

    let set = run_trials(&binding, "Hello, World!", 100, 3).unwrap();
    assert_eq!(set.len(), 3);
    assert_eq!(calls.load(Ordering::Relaxed), 300);

    let stats = set.summarize();
    assert!(stats.min >= 0.0);
    assert!(stats.mean.is_finite());
    assert!(stats.min <= stats.mean && stats.mean <= stats.max);

    assert!(matches!(
        run_trials(&binding, "x", 0, 3),
        Err(TrialError::ZeroIterations)
    ));
    assert_eq!(calls.load(Ordering::Relaxed), 300);
}

/// Test that a missing static binding still yields a row per case
#[test]
fn test_only_dynamic_available() {
    let caps = Capabilities::new(None, Some(echo("dynamic")));
    let outcome = hidden_driver(50, 2)
        .run(&caps, &bindbench::default_cases(), &mut std::io::sink())
        .unwrap();

    assert_eq!(outcome.rows.len(), 4);
    for row in &outcome.rows {
        assert!(row.stats_a().is_none());
        assert!(row.stats_b().is_some());
        assert!(row.speedup.is_none());
    }

    let mut out = Vec::new();
    let status = execute(
        &caps,
        &settings(50, 2, bindbench::default_cases()),
        &mut out,
    )
    .unwrap();
    assert_eq!(status, RunStatus::Completed);
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("static: Not available"));
}

/// Test that no bindings means no rows and exit status 1
#[test]
fn test_neither_available() {
    let mut out = Vec::new();
    let status = execute(
        &Capabilities::none(),
        &settings(50, 2, bindbench::default_cases()),
        &mut out,
    )
    .unwrap();
    assert_eq!(status, RunStatus::NoCapabilities);
    assert!(out.is_empty());

    let result = hidden_driver(50, 2).run(
        &Capabilities::none(),
        &bindbench::default_cases(),
        &mut std::io::sink(),
    );
    assert!(result.is_err());
}

/// Test near-zero mocked callables on a 13-byte payload
#[test]
fn test_near_zero_callables() {
    let caps = Capabilities::new(Some(echo("static")), Some(echo("dynamic")));
    let cases = vec![InputCase::new("Short string", "Hello, World!")];
    let outcome = hidden_driver(100, 3)
        .run(&caps, &cases, &mut std::io::sink())
        .unwrap();

    let row = &outcome.rows[0];
    assert_eq!(row.payload_length, 13);
    let a = row.stats_a().unwrap();
    let b = row.stats_b().unwrap();
    for stats in [a, b] {
        assert_eq!(stats.sample_count, 3);
        assert!(stats.min >= 0.0);
        assert!(stats.mean.is_finite());
    }

    // Exact quotient when defined, absent on a zero mean
    match row.speedup {
        Some(s) => assert_eq!(s, b.mean / a.mean),
        None => assert!(a.mean <= 0.0),
    }
}

/// Test that one failing binding is contained to its cells
#[test]
fn test_failure_is_contained() {
    let failing = FnBinding::new("dynamic", |_: &str| {
        Err(BindingError::Native("symbol vanished".to_string()))
    });
    let caps = Capabilities::new(Some(echo("static")), Some(Box::new(failing)));
    let outcome = hidden_driver(10, 2)
        .run(&caps, &bindbench::default_cases(), &mut std::io::sink())
        .unwrap();

    assert_eq!(outcome.rows.len(), 4);
    for row in &outcome.rows {
        assert!(matches!(row.a, Cell::Measured(_)));
        assert!(matches!(&row.b, Cell::Failed(f) if f.message == "symbol vanished"));
    }
}

/// Test the JSON report shape
#[test]
fn test_json_report() {
    let caps = Capabilities::new(Some(echo("static")), Some(echo("dynamic")));
    let mut settings = settings(20, 2, vec![InputCase::new("Medium string", "A".repeat(100))]);
    settings.format = OutputFormat::Json;

    let mut out = Vec::new();
    execute(&caps, &settings, &mut out).unwrap();

    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(value["meta"]["config"]["iterations"], 20);
    assert_eq!(value["rows"][0]["label"], "Medium string");
    assert_eq!(value["rows"][0]["payload_length"], 100);
    assert_eq!(value["rows"][0]["a"]["status"], "measured");
    assert_eq!(value["rows"][0]["a"]["trials"], 2);
    assert_eq!(value["summary"]["measured_cells"], 2);
}

/// Test the real bindings against the cdylib cargo builds alongside the tests
#[cfg(feature = "static-binding")]
#[test]
fn test_native_bindings_agree() {
    use bindbench::{DynamicBinding, StaticBinding};

    let payload = "C".repeat(10000);
    assert_eq!(StaticBinding.call(&payload).unwrap(), payload);

    let path = LibraryLocator::default()
        .locate()
        .expect("bindbench-native cdylib should sit next to the test binary");
    let dynamic = DynamicBinding::load(&path).unwrap();
    assert_eq!(dynamic.call(&payload).unwrap(), payload);
    assert_eq!(dynamic.call("").unwrap(), "");
}

/// Test that building without `static-binding` leaves slot A empty
#[cfg(not(feature = "static-binding"))]
#[test]
fn test_static_binding_compiled_out() {
    use bindbench::{CapabilityProvider, NativeProvider};

    let provider = NativeProvider::new(LibraryLocator::new(Vec::new())).with_dynamic(false);
    let caps = provider.discover();
    assert!(caps.a.is_none());
    assert!(caps.b.is_none());
}
