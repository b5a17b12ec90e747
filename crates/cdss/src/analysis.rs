//! Runs both analyzers over a finished result set

use cdss_core::{
    ResultSet, SensitivityAnalyzer, SensitivityReport, SimulationConfig, SimulationError,
    StatisticsCalculator, StatisticsReport,
};

/// Outcome of both analyses. Each can fail on its own; a degenerate
/// sensitivity analysis does not hide the statistics.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub statistics: Result<StatisticsReport, SimulationError>,
    pub sensitivity: Result<SensitivityReport, SimulationError>,
}

impl Analysis {
    /// True when neither analysis produced a report
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.statistics.is_err() && self.sensitivity.is_err()
    }
}

pub fn analyze(results: &ResultSet, config: &SimulationConfig) -> Analysis {
    let statistics = StatisticsCalculator::from_config(config).calculate(results);
    let sensitivity = SensitivityAnalyzer::new().analyze(results);

    if let Err(err) = &statistics {
        tracing::warn!(%err, "statistics unavailable");
    }
    if let Err(err) = &sensitivity {
        tracing::warn!(%err, "sensitivity analysis unavailable");
    }

    Analysis {
        statistics,
        sensitivity,
    }
}
