//! Simulation configuration
//!
//! The main configuration type is `SimulationConfig`, consumed by
//! [`SimulationRunner::new`](crate::simulation::SimulationRunner::new).
//!
//! # Builder DSL
//!
//! ```ignore
//! use cdss_core::config::SimulationBuilder;
//!
//! let config = SimulationBuilder::new()
//!     .trials(50_000)
//!     .seed(2024)
//!     .base_rate(88.0)
//!     .build()?;
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimulationError};
use crate::model::{AccuracyModel, DEFAULT_BASE_ACCURACY_RATE};

pub mod builder;

pub use builder::SimulationBuilder;

/// Trial count used when none is configured
pub const DEFAULT_TRIAL_COUNT: usize = 10_000;

fn default_trial_count() -> usize {
    DEFAULT_TRIAL_COUNT
}

fn default_base_accuracy_rate() -> f64 {
    DEFAULT_BASE_ACCURACY_RATE
}

fn default_true() -> bool {
    true
}

/// Estimator used for the reported standard deviation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StdDevConvention {
    /// Divide the sum of squared deviations by k
    #[default]
    Population,
    /// Divide by k - 1 (Bessel's correction)
    Sample,
}

/// Complete simulation configuration. Unknown keys are rejected so a
/// misspelled setting cannot silently fall back to its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulationConfig {
    /// Number of trials to run; must be positive
    #[serde(default = "default_trial_count")]
    pub trial_count: usize,

    /// Fixes reproducibility. `None` seeds from the operating system.
    #[serde(default)]
    pub random_seed: Option<u64>,

    /// Base accuracy under ideal conditions, in percent
    #[serde(default = "default_base_accuracy_rate")]
    pub base_accuracy_rate: f64,

    /// Standard deviation estimator for the statistics report
    #[serde(default)]
    pub std_convention: StdDevConvention,

    /// Run batches on the rayon pool when the `parallel` feature is enabled.
    /// Results are identical either way.
    #[serde(default = "default_true")]
    pub parallel: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            trial_count: default_trial_count(),
            random_seed: None,
            base_accuracy_rate: default_base_accuracy_rate(),
            std_convention: StdDevConvention::default(),
            parallel: true,
        }
    }
}

impl SimulationConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check that the configuration can be run
    pub fn validate(&self) -> Result<()> {
        if self.trial_count == 0 {
            return Err(SimulationError::InvalidConfiguration(
                "trial_count must be a positive integer".to_string(),
            ));
        }
        if !self.base_accuracy_rate.is_finite() || self.base_accuracy_rate <= 0.0 {
            return Err(SimulationError::InvalidConfiguration(format!(
                "base_accuracy_rate must be a positive finite percentage, got {}",
                self.base_accuracy_rate
            )));
        }
        Ok(())
    }

    /// The accuracy model this configuration describes
    #[must_use]
    pub fn accuracy_model(&self) -> AccuracyModel {
        AccuracyModel::with_base_rate(self.base_accuracy_rate)
    }

    /// Create a variant with a different trial count
    #[must_use]
    pub fn with_trial_count(&self, trial_count: usize) -> Self {
        Self {
            trial_count,
            ..self.clone()
        }
    }

    /// Create a variant with a fixed seed
    #[must_use]
    pub fn with_seed(&self, seed: u64) -> Self {
        Self {
            random_seed: Some(seed),
            ..self.clone()
        }
    }
}
