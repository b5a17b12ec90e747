//! Text chart rendering
//!
//! Histograms are drawn with eighth-block characters so each row resolves
//! eight height steps. A marker row under the axis pins reference values
//! (mean, interval bounds, targets) to the bin that contains them.

use std::fmt::Write;

use cdss_core::{ResultSet, SensitivityReport, StatisticsReport};

use crate::util::format::{format_accuracy, format_seconds};

/// Block characters for sub-character precision (from empty to full)
const BIN_CHARS: [&str; 9] = [" ", "▁", "▂", "▃", "▄", "▅", "▆", "▇", "█"];

/// Horizontal partial blocks for bar charts (from empty to seven eighths)
const BAR_CHARS: [&str; 8] = ["", "▏", "▎", "▍", "▌", "▋", "▊", "▉"];

/// Smallest value span a histogram covers, so constant data still bins
const MIN_RANGE: f64 = 0.01;

/// Label column width in the sensitivity bar chart
const LABEL_WIDTH: usize = 20;

/// A reference value pinned under a histogram
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub symbol: char,
    pub label: String,
    pub value: f64,
}

impl Marker {
    pub fn new(symbol: char, label: impl Into<String>, value: f64) -> Self {
        Self {
            symbol,
            label: label.into(),
            value,
        }
    }
}

/// Equal-width bin counts over the observed range of the values
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    min: f64,
    bin_width: f64,
    counts: Vec<usize>,
}

impl Histogram {
    /// `None` when there is nothing to bin
    #[must_use]
    pub fn new(values: &[f64], bins: usize) -> Option<Self> {
        if values.is_empty() || bins == 0 {
            return None;
        }

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let bin_width = (max - min).max(MIN_RANGE) / bins as f64;

        let mut counts = vec![0usize; bins];
        for &value in values {
            let bin = ((value - min) / bin_width).floor() as usize;
            counts[bin.min(bins - 1)] += 1;
        }

        Some(Self {
            min,
            bin_width,
            counts,
        })
    }

    #[must_use]
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    #[must_use]
    pub fn min(&self) -> f64 {
        self.min
    }

    #[must_use]
    pub fn max(&self) -> f64 {
        self.min + self.bin_width * self.counts.len() as f64
    }

    /// Bin containing `value`, or `None` when it lies outside the range
    #[must_use]
    pub fn bin_of(&self, value: f64) -> Option<usize> {
        if !value.is_finite() || value < self.min || value > self.max() {
            return None;
        }
        let bin = ((value - self.min) / self.bin_width).floor() as usize;
        Some(bin.min(self.counts.len() - 1))
    }

    /// Render bars `height` rows tall, an axis, the marker row and a legend
    #[must_use]
    pub fn render(&self, height: usize, markers: &[Marker], format: fn(f64) -> String) -> String {
        let height = height.max(1);
        let max_count = self.counts.iter().copied().max().unwrap_or(0).max(1);
        let height_units = height * 8;
        let bar_heights: Vec<usize> = self
            .counts
            .iter()
            .map(|&c| ((c as f64 / max_count as f64) * height_units as f64).round() as usize)
            .collect();

        let mut out = String::new();
        for row in 0..height {
            let row_base = (height - 1 - row) * 8;
            let row_top = row_base + 8;
            out.push_str("  │");
            for &bar_h in &bar_heights {
                let cell = if bar_h >= row_top {
                    BIN_CHARS[8]
                } else if bar_h > row_base {
                    BIN_CHARS[bar_h - row_base]
                } else {
                    BIN_CHARS[0]
                };
                out.push_str(cell);
            }
            out.push('\n');
        }

        let _ = writeln!(out, "  └{}", "─".repeat(self.counts.len()));

        let mut marker_row = vec![' '; self.counts.len()];
        for marker in markers {
            if let Some(bin) = self.bin_of(marker.value) {
                marker_row[bin] = marker.symbol;
            }
        }
        let _ = writeln!(out, "   {}", marker_row.iter().collect::<String>().trim_end());

        let lo = format(self.min);
        let hi = format(self.max());
        let gap = self.counts.len().saturating_sub(lo.chars().count() + hi.chars().count());
        let _ = writeln!(out, "   {lo}{}{hi}", " ".repeat(gap.max(1)));

        for marker in markers {
            let note = if self.bin_of(marker.value).is_some() {
                ""
            } else {
                " (off scale)"
            };
            let _ = writeln!(
                out,
                "   {} {}: {}{note}",
                marker.symbol,
                marker.label,
                format(marker.value)
            );
        }

        out
    }
}

/// Accuracy histogram marked at the mean and both interval bounds
#[must_use]
pub fn accuracy_chart(
    results: &ResultSet,
    stats: &StatisticsReport,
    bins: usize,
    height: usize,
) -> Option<String> {
    let values: Vec<f64> = results.accuracies().collect();
    let histogram = Histogram::new(&values, bins)?;
    let markers = [
        Marker::new('[', "95% CI lower", stats.ci95_lower),
        Marker::new('|', "mean", stats.mean_accuracy),
        Marker::new(']', "95% CI upper", stats.ci95_upper),
    ];
    Some(format!(
        "Diagnostic Accuracy Distribution\n{}",
        histogram.render(height, &markers, format_accuracy)
    ))
}

/// Response time histogram marked at the target and the 99th percentile
#[must_use]
pub fn response_time_chart(
    results: &ResultSet,
    stats: &StatisticsReport,
    target: f64,
    bins: usize,
    height: usize,
) -> Option<String> {
    let values: Vec<f64> = results.response_times().collect();
    let histogram = Histogram::new(&values, bins)?;
    let markers = [
        Marker::new('T', "target", target),
        Marker::new('P', "99th percentile", stats.p99_response_time),
    ];
    Some(format!(
        "Response Time Distribution\n{}",
        histogram.render(height, &markers, format_seconds)
    ))
}

/// Horizontal bars, most influential factor first; `width` cells is 100%
#[must_use]
pub fn sensitivity_chart(report: &SensitivityReport, width: usize) -> String {
    let mut out = String::from("Factor Impact on Diagnostic Accuracy\n");

    for entry in report.ranked() {
        let eighths = (entry.contribution / 100.0 * (width * 8) as f64).round() as usize;
        let bar = format!("{}{}", "█".repeat(eighths / 8), BAR_CHARS[eighths % 8]);
        let _ = writeln!(
            out,
            "  {:<LABEL_WIDTH$} {bar} {:.1}%",
            entry.factor.label(),
            entry.contribution
        );
    }

    out
}
