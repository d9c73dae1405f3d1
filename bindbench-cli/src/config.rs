//! Configuration loading from a TOML file
//!
//! bindbench runs with built-in defaults. A configuration file is only read
//! when passed with `--config`; CLI flags override anything it sets.

use crate::executor::InputCase;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// bindbench configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BenchConfig {
    /// Trial runner configuration
    #[serde(default)]
    pub runner: RunnerConfig,
    /// Shared library discovery
    #[serde(default)]
    pub library: LibraryConfig,
    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
    /// Input cases; empty means the built-in sweep
    #[serde(default)]
    pub cases: Vec<CaseConfig>,
}

/// Trial runner configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Calls per trial
    #[serde(default = "default_iterations")]
    pub iterations: u64,
    /// Recorded trials per (binding, case)
    #[serde(default = "default_trials")]
    pub trials: usize,
    /// Leading trials run and discarded
    #[serde(default)]
    pub warmup_trials: usize,
    /// Pin the measuring thread to this CPU
    #[serde(default)]
    pub pin_cpu: Option<usize>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            iterations: default_iterations(),
            trials: default_trials(),
            warmup_trials: 0,
            pin_cpu: None,
        }
    }
}

fn default_iterations() -> u64 {
    bindbench_core::TrialConfig::DEFAULT_ITERATIONS
}
fn default_trials() -> usize {
    bindbench_core::TrialConfig::DEFAULT_TRIAL_COUNT
}

/// Shared library discovery
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LibraryConfig {
    /// Exact path to the shared library; disables searching
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Extra directories searched before the defaults
    #[serde(default)]
    pub search_dirs: Vec<PathBuf>,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default output format: "human" or "json"
    #[serde(default = "default_format")]
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
        }
    }
}

fn default_format() -> String {
    "human".to_string()
}

/// One `[[cases]]` entry.
///
/// Either `payload` is given literally, or `fill` is repeated `length`
/// times (`fill` defaults to `"A"`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseConfig {
    /// Case label
    pub label: String,
    /// Literal payload
    #[serde(default)]
    pub payload: Option<String>,
    /// Text repeated to build the payload
    #[serde(default)]
    pub fill: Option<String>,
    /// Repetitions of `fill`
    #[serde(default)]
    pub length: Option<usize>,
}

impl CaseConfig {
    /// Build the input case this entry describes
    pub fn to_case(&self) -> anyhow::Result<InputCase> {
        match (&self.payload, self.length) {
            (Some(payload), None) => Ok(InputCase::new(&self.label, payload.clone())),
            (None, Some(length)) => {
                let fill = self.fill.as_deref().unwrap_or("A");
                if fill.is_empty() {
                    anyhow::bail!("case '{}': fill must not be empty", self.label);
                }
                Ok(InputCase::new(&self.label, fill.repeat(length)))
            }
            (Some(_), Some(_)) => {
                anyhow::bail!("case '{}': set either payload or length, not both", self.label)
            }
            (None, None) => anyhow::bail!("case '{}': missing payload or length", self.label),
        }
    }
}

impl BenchConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        Ok(config)
    }

    /// Configured input cases, or `None` to use the built-in sweep
    pub fn input_cases(&self) -> anyhow::Result<Option<Vec<InputCase>>> {
        if self.cases.is_empty() {
            return Ok(None);
        }
        self.cases
            .iter()
            .map(CaseConfig::to_case)
            .collect::<anyhow::Result<Vec<_>>>()
            .map(Some)
    }

    /// Generate a default configuration as TOML string
    pub fn default_toml() -> String {
        r#"# bindbench Configuration

[runner]
# Calls per trial
iterations = 100000
# Recorded trials per binding and case
trials = 10
# Leading trials to run and discard (0 keeps the first trial)
warmup_trials = 0
# Pin the measuring thread to a CPU (uncomment to enable, Linux only)
# pin_cpu = 2

[library]
# Exact shared library path (uncomment to enable; disables searching)
# path = "target/release/libbindbench_native.so"
# Directories searched before the defaults
search_dirs = []

[output]
# Output format: human, json
format = "human"

# Input cases (uncomment to replace the built-in sweep)
# [[cases]]
# label = "Short string"
# payload = "Hello, World!"
#
# [[cases]]
# label = "Huge string"
# fill = "D"
# length = 100000
"#
        .to_string()
    }
}
