//! Post-run analysis of a [`ResultSet`](crate::model::ResultSet).
//!
//! Both analyzers read a frozen result set and never modify it, so they can
//! be run in any order, repeatedly, or on a partial set:
//!
//! ```ignore
//! use cdss_core::analysis::{SensitivityAnalyzer, StatisticsCalculator};
//!
//! let results = runner.run();
//! let stats = StatisticsCalculator::from_config(runner.config()).calculate(&results)?;
//! let sensitivity = SensitivityAnalyzer::new().analyze(&results)?;
//! ```

mod sensitivity;
mod statistics;

pub use sensitivity::*;
pub use statistics::*;
