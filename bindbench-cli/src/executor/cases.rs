//! Input Cases
//!
//! The payloads swept by the driver. The default set spans four orders of
//! magnitude so per-byte cost separates from fixed call overhead.

use regex::Regex;

/// One labelled payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputCase {
    /// Label shown in reports
    pub label: String,
    /// String passed to each binding
    pub payload: String,
}

impl InputCase {
    /// Create a case
    pub fn new(label: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            payload: payload.into(),
        }
    }

    /// Payload length in bytes
    pub fn len(&self) -> usize {
        self.payload.len()
    }

    /// Whether the payload is empty
    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }
}

/// The built-in sweep: 13, 100, 1000 and 10000 bytes
pub fn default_cases() -> Vec<InputCase> {
    vec![
        InputCase::new("Short string", "Hello, World!"),
        InputCase::new("Medium string", "A".repeat(100)),
        InputCase::new("Long string", "B".repeat(1000)),
        InputCase::new("Very long string", "C".repeat(10000)),
    ]
}

/// Keep the cases whose label matches `filter`, preserving order
pub fn filter_cases(cases: Vec<InputCase>, filter: Option<&Regex>) -> Vec<InputCase> {
    match filter {
        Some(re) => cases.into_iter().filter(|c| re.is_match(&c.label)).collect(),
        None => cases,
    }
}
