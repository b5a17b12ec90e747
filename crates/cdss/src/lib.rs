//! Command-line front end for the CDSS accuracy simulation
//!
//! Everything here consumes the outputs of `cdss_core`:
//! - YAML configuration loading with command-line overrides
//! - Logging setup
//! - Text summary and text charts of a run
//! - Summary export to JSON or YAML

#![warn(clippy::all)]

// ============================================================================
// Run pipeline
// ============================================================================

pub mod analysis;
pub mod logging;
pub mod settings;
pub mod watch;

// ============================================================================
// Output
// ============================================================================

pub mod chart;
pub mod export;
pub mod report;

// ============================================================================
// Utilities
// ============================================================================

pub mod util;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use analysis::{Analysis, analyze};
pub use logging::init_logging;
pub use settings::{Overrides, load_config};
pub use watch::run_watched;
