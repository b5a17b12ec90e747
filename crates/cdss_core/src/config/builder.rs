//! Simulation Builder
//!
//! Fluent construction of a [`SimulationConfig`]; `build` validates.

use super::{SimulationConfig, StdDevConvention};
use crate::error::Result;

/// Builder for [`SimulationConfig`]
#[derive(Debug, Clone, Default)]
pub struct SimulationBuilder {
    config: SimulationConfig,
}

impl SimulationBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration (e.g. one loaded from a file)
    #[must_use]
    pub fn from_config(config: SimulationConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn trials(mut self, trial_count: usize) -> Self {
        self.config.trial_count = trial_count;
        self
    }

    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.random_seed = Some(seed);
        self
    }

    /// Seed from the operating system at run time
    #[must_use]
    pub fn unseeded(mut self) -> Self {
        self.config.random_seed = None;
        self
    }

    /// Base accuracy rate in percent
    #[must_use]
    pub fn base_rate(mut self, rate: f64) -> Self {
        self.config.base_accuracy_rate = rate;
        self
    }

    #[must_use]
    pub fn std_convention(mut self, convention: StdDevConvention) -> Self {
        self.config.std_convention = convention;
        self
    }

    /// Use the k - 1 estimator for the standard deviation
    #[must_use]
    pub fn sample_std(self) -> Self {
        self.std_convention(StdDevConvention::Sample)
    }

    /// Force single-threaded execution
    #[must_use]
    pub fn sequential(mut self) -> Self {
        self.config.parallel = false;
        self
    }

    pub fn build(self) -> Result<SimulationConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
