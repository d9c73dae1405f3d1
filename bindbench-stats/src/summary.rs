//! Summary Statistics
//!
//! Reduces a set of per-trial samples to mean, sample standard deviation,
//! extremes and total. No outlier rejection is applied: every sample
//! contributes to every statistic.

use serde::{Deserialize, Serialize};

/// Seconds to microseconds
pub const MICROS_PER_SECOND: f64 = 1e6;

/// Summary statistics over one set of samples
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryStatistics {
    /// Arithmetic mean
    pub mean: f64,
    /// Sample standard deviation (n - 1 divisor), 0 for a single sample
    pub std_dev: f64,
    /// Smallest sample
    pub min: f64,
    /// Largest sample
    pub max: f64,
    /// Sum of all samples
    pub total: f64,
    /// Number of samples summarized
    pub sample_count: usize,
}

impl SummaryStatistics {
    /// All-zero summary for an empty sample set
    pub const EMPTY: Self = Self {
        mean: 0.0,
        std_dev: 0.0,
        min: 0.0,
        max: 0.0,
        total: 0.0,
        sample_count: 0,
    };

    /// Rescale every value-bearing field by `factor` (e.g. seconds → μs)
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            mean: self.mean * factor,
            std_dev: self.std_dev * factor,
            min: self.min * factor,
            max: self.max * factor,
            total: self.total * factor,
            sample_count: self.sample_count,
        }
    }

    /// Coefficient of variation (relative stddev, percent)
    pub fn coefficient_of_variation(&self) -> f64 {
        if self.mean == 0.0 {
            0.0
        } else {
            (self.std_dev / self.mean) * 100.0
        }
    }
}

/// Compute summary statistics, preserving the unit of `samples`.
pub fn compute_summary(samples: &[f64]) -> SummaryStatistics {
    if samples.is_empty() {
        return SummaryStatistics::EMPTY;
    }

    let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
    let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let total: f64 = samples.iter().sum();

    // Summation rounding can push the mean a few ulps outside the observed range
    let mean = (total / samples.len() as f64).max(min).min(max);

    let std_dev = if samples.len() < 2 || min == max {
        0.0
    } else {
        let variance =
            samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (samples.len() - 1) as f64;
        variance.sqrt()
    };

    SummaryStatistics {
        mean,
        std_dev,
        min,
        max,
        total,
        sample_count: samples.len(),
    }
}

/// Summarize samples recorded in seconds, reporting microseconds.
pub fn summarize_micros(samples_secs: &[f64]) -> SummaryStatistics {
    compute_summary(samples_secs).scaled(MICROS_PER_SECOND)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        let tol = 1e-9 * a.abs().max(b.abs()).max(1.0);
        assert!((a - b).abs() <= tol, "{} != {}", a, b);
    }

    #[test]
    fn test_basic_summary() {
        let samples = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let summary = compute_summary(&samples);

        assert!((summary.mean - 3.0).abs() < 0.01);
        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.max, 5.0);
        assert_eq!(summary.total, 15.0);
        assert_eq!(summary.sample_count, 5);
        // sqrt(10 / 4)
        assert_close(summary.std_dev, 2.5f64.sqrt());
    }

    #[test]
    fn test_identical_samples() {
        for n in 1..=12 {
            for d in [0.1, 2.5e-7, 3.0, 1.0 / 3.0] {
                let samples = vec![d; n];
                let summary = compute_summary(&samples);

                assert_eq!(summary.mean, d);
                assert_eq!(summary.std_dev, 0.0);
                assert_eq!(summary.min, d);
                assert_eq!(summary.max, d);
                assert_close(summary.total, d * n as f64);
            }
        }
    }

    #[test]
    fn test_single_sample_has_zero_std() {
        let summary = compute_summary(&[4.2]);
        assert_eq!(summary.std_dev, 0.0);
        assert_eq!(summary.sample_count, 1);
    }

    #[test]
    fn test_mean_within_extremes() {
        let sets: Vec<Vec<f64>> = vec![
            vec![0.1, 0.1, 0.1],
            vec![1e-7, 3e-7, 2e-7, 9e-8],
            vec![5.0, 1.0, 1000.0, 0.001],
            vec![0.3, 0.2, 0.1, 0.4, 0.5, 0.6, 0.7],
        ];
        for samples in sets {
            let summary = compute_summary(&samples);
            assert!(summary.min <= summary.mean);
            assert!(summary.mean <= summary.max);
            assert_close(summary.total, summary.mean * samples.len() as f64);
        }
    }

    #[test]
    fn test_order_independence() {
        let samples = vec![3.2e-7, 1.1e-7, 4.8e-7, 2.05e-7, 9.9e-8, 6.1e-7];
        let base = compute_summary(&samples);

        let mut reversed = samples.clone();
        reversed.reverse();
        let mut rotated = samples.clone();
        rotated.rotate_left(2);
        let mut sorted = samples.clone();
        sorted.sort_by(|a, b| a.total_cmp(b));

        for permuted in [reversed, rotated, sorted] {
            let other = compute_summary(&permuted);
            assert_close(base.mean, other.mean);
            assert_close(base.std_dev, other.std_dev);
            assert_close(base.total, other.total);
            assert_eq!(base.min, other.min);
            assert_eq!(base.max, other.max);
        }
    }

    #[test]
    fn test_empty_samples() {
        let summary = compute_summary(&[]);
        assert_eq!(summary, SummaryStatistics::EMPTY);
    }

    #[test]
    fn test_summarize_micros() {
        let summary = summarize_micros(&[1e-6, 3e-6]);
        assert_close(summary.mean, 2.0);
        assert_close(summary.min, 1.0);
        assert_close(summary.max, 3.0);
        assert_close(summary.total, 4.0);
        assert_close(summary.std_dev, 2.0f64.sqrt());
    }

    #[test]
    fn test_coefficient_of_variation() {
        let summary = compute_summary(&[100.0, 100.0, 100.0]);
        assert!((summary.coefficient_of_variation() - 0.0).abs() < f64::EPSILON);
    }
}
