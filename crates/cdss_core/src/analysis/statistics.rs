//! Descriptive statistics over a result set

use serde::Serialize;

use crate::config::{SimulationConfig, StdDevConvention};
use crate::error::{Result, SimulationError};
use crate::model::ResultSet;

/// Two-sided 97.5th percentile of the standard normal distribution
pub const Z_95: f64 = 1.959_963_984_540_054;

/// Percentile reported for response time
pub const RESPONSE_TIME_PERCENTILE: f64 = 99.0;

/// Summary statistics of one run
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatisticsReport {
    /// Number of trials the statistics were computed from
    pub sample_size: usize,
    pub mean_accuracy: f64,
    pub std_accuracy: f64,
    /// Lower bound of the 95% confidence interval on the mean
    pub ci95_lower: f64,
    /// Upper bound of the 95% confidence interval on the mean
    pub ci95_upper: f64,
    pub p99_response_time: f64,
    pub std_convention: StdDevConvention,
}

impl StatisticsReport {
    #[must_use]
    pub fn ci95(&self) -> (f64, f64) {
        (self.ci95_lower, self.ci95_upper)
    }

    /// Half-width of the confidence interval
    #[must_use]
    pub fn ci95_margin(&self) -> f64 {
        (self.ci95_upper - self.ci95_lower) / 2.0
    }
}

/// Computes a [`StatisticsReport`] from a finalized or partial result set
#[derive(Debug, Clone, Copy, Default)]
pub struct StatisticsCalculator {
    convention: StdDevConvention,
}

impl StatisticsCalculator {
    #[must_use]
    pub fn new(convention: StdDevConvention) -> Self {
        Self { convention }
    }

    #[must_use]
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self::new(config.std_convention)
    }

    /// Fails with [`SimulationError::EmptyResultSet`] when no trials completed.
    /// A single trial gives a zero standard deviation and a point interval.
    pub fn calculate(&self, results: &ResultSet) -> Result<StatisticsReport> {
        if results.is_empty() {
            return Err(SimulationError::EmptyResultSet);
        }

        let accuracies: Vec<f64> = results.accuracies().collect();
        let mut response_times: Vec<f64> = results.response_times().collect();
        response_times.sort_unstable_by(f64::total_cmp);

        let k = accuracies.len();
        let mean_accuracy = mean(&accuracies);
        let std_accuracy = std_dev(&accuracies, self.convention);
        let margin = Z_95 * std_accuracy / (k as f64).sqrt();

        Ok(StatisticsReport {
            sample_size: k,
            mean_accuracy,
            std_accuracy,
            ci95_lower: mean_accuracy - margin,
            ci95_upper: mean_accuracy + margin,
            p99_response_time: percentile_sorted(&response_times, RESPONSE_TIME_PERCENTILE),
            std_convention: self.convention,
        })
    }
}

/// Arithmetic mean; NaN for an empty slice
#[must_use]
pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Standard deviation using two passes. Returns 0 when the divisor would be
/// zero (a single value under the sample convention).
#[must_use]
pub fn std_dev(values: &[f64], convention: StdDevConvention) -> f64 {
    let n = values.len();
    let divisor = match convention {
        StdDevConvention::Population => n,
        StdDevConvention::Sample => n.saturating_sub(1),
    };
    if divisor == 0 {
        return 0.0;
    }

    let m = mean(values);
    let sum_sq: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    (sum_sq / divisor as f64).sqrt()
}

/// Interpolated-rank percentile (`p` in [0, 100]) of unsorted values.
/// Returns `None` for an empty slice or a `p` outside [0, 100] (including NaN).
#[must_use]
pub fn percentile(values: &[f64], p: f64) -> Option<f64> {
    if values.is_empty() || !(0.0..=100.0).contains(&p) {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_unstable_by(f64::total_cmp);
    Some(percentile_sorted(&sorted, p))
}

/// Interpolated-rank percentile of an ascending, non-empty slice with `p` in
/// [0, 100]: rank = p/100 * (k - 1), linear between the bracketing order
/// statistics.
fn percentile_sorted(sorted: &[f64], p: f64) -> f64 {
    debug_assert!((0.0..=100.0).contains(&p));
    let last = sorted.len() - 1;
    let rank = p / 100.0 * last as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let weight = rank - lower as f64;

    sorted[lower] + (sorted[upper] - sorted[lower]) * weight
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentile_interpolates() {
        let values: Vec<f64> = (1..=10).map(f64::from).collect();
        let p99 = percentile(&values, 99.0).unwrap();
        assert!((p99 - 9.91).abs() < 1e-12, "p99 = {p99}");

        assert_eq!(percentile(&values, 0.0), Some(1.0));
        assert_eq!(percentile(&values, 100.0), Some(10.0));
        assert_eq!(percentile(&values, 50.0), Some(5.5));
    }

    #[test]
    fn test_percentile_ignores_input_order() {
        let values = [10.0, 3.0, 7.0, 1.0, 9.0, 2.0, 8.0, 5.0, 4.0, 6.0];
        let p99 = percentile(&values, 99.0).unwrap();
        assert!((p99 - 9.91).abs() < 1e-12);
    }

    #[test]
    fn test_percentile_edge_cases() {
        assert_eq!(percentile(&[], 99.0), None);
        assert_eq!(percentile(&[4.2], 99.0), Some(4.2));
    }

    #[test]
    fn test_percentile_rejects_out_of_range_p() {
        let values = [1.0, 2.0, 3.0];
        assert_eq!(percentile(&values, -0.5), None);
        assert_eq!(percentile(&values, 100.5), None);
        assert_eq!(percentile(&values, f64::NAN), None);
        assert_eq!(percentile(&values, f64::INFINITY), None);
    }

    #[test]
    fn test_std_dev_conventions() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(mean(&values), 5.0);
        assert_eq!(std_dev(&values, StdDevConvention::Population), 2.0);

        let sample = std_dev(&values, StdDevConvention::Sample);
        assert!((sample - (32.0_f64 / 7.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_std_dev_single_value_is_zero() {
        assert_eq!(std_dev(&[3.0], StdDevConvention::Population), 0.0);
        assert_eq!(std_dev(&[3.0], StdDevConvention::Sample), 0.0);
    }

    #[test]
    fn test_report_margin() {
        let report = StatisticsReport {
            sample_size: 4,
            mean_accuracy: 50.0,
            std_accuracy: 2.0,
            ci95_lower: 48.0,
            ci95_upper: 52.0,
            p99_response_time: 9.0,
            std_convention: StdDevConvention::Population,
        };
        assert_eq!(report.ci95(), (48.0, 52.0));
        assert_eq!(report.ci95_margin(), 2.0);
    }
}
