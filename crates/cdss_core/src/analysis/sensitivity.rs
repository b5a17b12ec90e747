//! Correlation-based sensitivity analysis
//!
//! Each factor's contribution is its absolute Pearson correlation with the
//! output, normalized so the contributions sum to 100%. This is a linear
//! proxy for ranking factor influence, not a formal variance decomposition.
//!
//! A factor whose values are all identical has no defined correlation. It is
//! reported as [`Correlation::Degenerate`], contributes 0%, and the remaining
//! factors are renormalized. If no factor has a usable correlation the
//! analysis fails with [`SimulationError::DegenerateSensitivity`].

use serde::Serialize;
use tracing::debug;

use super::statistics::mean;
use crate::error::{Result, SimulationError};
use crate::model::{Factor, ResultSet};

/// Correlation outcome for one factor
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Correlation {
    /// Pearson coefficient in [-1, 1]
    Defined(f64),
    /// The factor or the output is constant, so correlation is undefined
    Degenerate,
}

impl Correlation {
    #[must_use]
    pub fn value(self) -> Option<f64> {
        match self {
            Self::Defined(r) => Some(r),
            Self::Degenerate => None,
        }
    }

    #[must_use]
    pub fn is_degenerate(self) -> bool {
        matches!(self, Self::Degenerate)
    }
}

/// One factor's entry in the sensitivity report
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FactorSensitivity {
    pub factor: Factor,
    pub correlation: Correlation,
    /// Share of the total absolute correlation, in percent
    pub contribution: f64,
}

/// Per-factor contribution percentages, in [`Factor::ALL`] order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensitivityReport {
    sample_size: usize,
    factors: Vec<FactorSensitivity>,
}

impl SensitivityReport {
    #[must_use]
    pub fn sample_size(&self) -> usize {
        self.sample_size
    }

    #[must_use]
    pub fn factors(&self) -> &[FactorSensitivity] {
        &self.factors
    }

    pub fn iter(&self) -> impl Iterator<Item = &FactorSensitivity> {
        self.factors.iter()
    }

    #[must_use]
    pub fn get(&self, factor: Factor) -> Option<&FactorSensitivity> {
        self.factors.iter().find(|f| f.factor == factor)
    }

    /// Contribution of one factor in percent (0 for a degenerate factor)
    #[must_use]
    pub fn contribution(&self, factor: Factor) -> f64 {
        self.get(factor).map_or(0.0, |f| f.contribution)
    }

    /// Factors ordered from most to least influential
    #[must_use]
    pub fn ranked(&self) -> Vec<FactorSensitivity> {
        let mut ranked = self.factors.clone();
        ranked.sort_by(|a, b| b.contribution.total_cmp(&a.contribution));
        ranked
    }

    /// Sum of all contributions; 100 up to rounding
    #[must_use]
    pub fn total(&self) -> f64 {
        self.factors.iter().map(|f| f.contribution).sum()
    }
}

/// Attributes output variance to the four input factors
#[derive(Debug, Clone, Copy, Default)]
pub struct SensitivityAnalyzer;

impl SensitivityAnalyzer {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Needs at least two trials; one trial makes every factor constant.
    pub fn analyze(&self, results: &ResultSet) -> Result<SensitivityReport> {
        if results.is_empty() {
            return Err(SimulationError::EmptyResultSet);
        }
        let trials = results.len();
        let accuracies: Vec<f64> = results.accuracies().collect();

        let correlations: Vec<(Factor, Correlation)> = Factor::ALL
            .iter()
            .map(|&factor| {
                let values: Vec<f64> = results.factor_values(factor).collect();
                let correlation = match pearson_correlation(&values, &accuracies) {
                    Some(r) => Correlation::Defined(r),
                    None => {
                        debug!(%factor, trials, "factor has no defined correlation");
                        Correlation::Degenerate
                    }
                };
                (factor, correlation)
            })
            .collect();

        let total: f64 = correlations
            .iter()
            .filter_map(|(_, c)| c.value())
            .map(f64::abs)
            .sum();
        if total == 0.0 {
            return Err(SimulationError::DegenerateSensitivity { trials });
        }

        let factors = correlations
            .into_iter()
            .map(|(factor, correlation)| FactorSensitivity {
                factor,
                correlation,
                contribution: correlation.value().map_or(0.0, |r| r.abs() / total * 100.0),
            })
            .collect();

        Ok(SensitivityReport {
            sample_size: trials,
            factors,
        })
    }
}

/// Pearson correlation coefficient of two equal-length series.
///
/// Returns `None` when either series is constant (including a single point),
/// when the lengths differ, or when the series are empty.
#[must_use]
pub fn pearson_correlation(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() != ys.len() || is_constant(xs) || is_constant(ys) {
        return None;
    }

    let mean_x = mean(xs);
    let mean_y = mean(ys);
    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    let denom = (sxx * syy).sqrt();
    if denom == 0.0 || !denom.is_finite() {
        return None;
    }
    Some((sxy / denom).clamp(-1.0, 1.0))
}

/// Exact check: true when every value equals the first (or there are none)
fn is_constant(values: &[f64]) -> bool {
    match values.split_first() {
        Some((first, rest)) => rest.iter().all(|v| v == first),
        None => true,
    }
}
