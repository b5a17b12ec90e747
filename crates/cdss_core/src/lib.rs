//! Clinical decision-support accuracy simulation library
//!
//! This crate estimates, by Monte Carlo sampling, the distribution of
//! diagnostic accuracy under uncertain operating conditions. It provides:
//! - A seedable sampler for the four uncertain input factors
//! - A deterministic accuracy model
//! - A batched, optionally parallel runner with progress and cancellation
//! - Descriptive statistics (mean, standard deviation, 95% CI, percentiles)
//! - Correlation-based sensitivity analysis with explicit degenerate handling
//!
//! # Example
//!
//! ```ignore
//! use cdss_core::{SensitivityAnalyzer, SimulationBuilder, SimulationRunner, StatisticsCalculator};
//!
//! let config = SimulationBuilder::new().trials(10_000).seed(42).build()?;
//! let runner = SimulationRunner::new(config)?;
//! let results = runner.run();
//!
//! let stats = StatisticsCalculator::from_config(runner.config()).calculate(&results)?;
//! let sensitivity = SensitivityAnalyzer::new().analyze(&results)?;
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod analysis;
pub mod error;
pub mod sampler;
pub mod simulation;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod config;
pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use analysis::{SensitivityAnalyzer, SensitivityReport, StatisticsCalculator, StatisticsReport};
pub use config::{SimulationBuilder, SimulationConfig, StdDevConvention};
pub use error::SimulationError;
pub use model::{AccuracyModel, Factor, ParameterSample, ResultSet, RunStatus, TrialRecord};
pub use sampler::ParameterSampler;
pub use simulation::{SimulationProgress, SimulationRunner};
